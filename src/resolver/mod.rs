use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_DOMAIN: Domain = Domain { min: -50, max: 50 };

pub const DEFAULT_MAX_CELLS: u64 = 10_000;

/// Largest absolute bound a domain may have: the square still fits in `i64`,
/// so every product of two endpoints does too.
pub const MAX_DOMAIN_MAGNITUDE: i64 = 3_037_000_499;

/// Inclusive bounds every endpoint must fall within.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Domain {
    min: i64,
    max: i64,
}

impl Domain {
    /// `None` when `min > max` or either bound exceeds `MAX_DOMAIN_MAGNITUDE`.
    pub fn new(min: i64, max: i64) -> Option<Self> {
        if min > max || !within_magnitude(min) || !within_magnitude(max) {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub fn within_magnitude(value: i64) -> bool {
    (-MAX_DOMAIN_MAGNITUDE..=MAX_DOMAIN_MAGNITUDE).contains(&value)
}

impl Default for Domain {
    fn default() -> Self {
        DEFAULT_DOMAIN
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    HStart,
    HEnd,
    VStart,
    VEnd,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::HStart,
        Endpoint::HEnd,
        Endpoint::VStart,
        Endpoint::VEnd,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Endpoint::HStart => "hStart",
            Endpoint::HEnd => "hEnd",
            Endpoint::VStart => "vStart",
            Endpoint::VEnd => "vEnd",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw endpoints as submitted, in any order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeInput {
    pub h_start: i64,
    pub h_end: i64,
    pub v_start: i64,
    pub v_end: i64,
}

impl RangeInput {
    pub fn new(h_start: i64, h_end: i64, v_start: i64, v_end: i64) -> Self {
        Self {
            h_start,
            h_end,
            v_start,
            v_end,
        }
    }

    pub fn value(&self, endpoint: Endpoint) -> i64 {
        match endpoint {
            Endpoint::HStart => self.h_start,
            Endpoint::HEnd => self.h_end,
            Endpoint::VStart => self.v_start,
            Endpoint::VEnd => self.v_end,
        }
    }
}

/// A range whose pairs satisfy `low <= high`. Only `resolve` builds one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedRange {
    h_low: i64,
    h_high: i64,
    v_low: i64,
    v_high: i64,
}

impl NormalizedRange {
    pub fn h_low(&self) -> i64 {
        self.h_low
    }

    pub fn h_high(&self) -> i64 {
        self.h_high
    }

    pub fn v_low(&self) -> i64 {
        self.v_low
    }

    pub fn v_high(&self) -> i64 {
        self.v_high
    }

    /// Number of columns (the h pair).
    pub fn width(&self) -> u64 {
        span(self.h_low, self.h_high)
    }

    /// Number of rows (the v pair).
    pub fn height(&self) -> u64 {
        span(self.v_low, self.v_high)
    }

    /// Cell count, saturating at `u64::MAX`.
    pub fn cells(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    pub fn title(&self) -> String {
        format!(
            "[{} to {}] x [{} to {}]",
            self.h_low, self.h_high, self.v_low, self.v_high
        )
    }
}

impl fmt::Display for NormalizedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{field} = {value} is outside the allowed range {min}..{max}")]
    OutOfDomain {
        field: Endpoint,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Table too large ({cells} cells). Please reduce the range. Max is {max_cells}")]
    TooLarge { cells: u64, max_cells: u64 },

    #[error("range produces an empty table")]
    EmptyRange,
}

fn span(low: i64, high: i64) -> u64 {
    if high < low {
        return 0;
    }
    high.abs_diff(low).saturating_add(1)
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Checks every endpoint against `domain`, swaps each pair into ascending
/// order and rejects tables with more than `max_cells` cells.
pub fn resolve(
    raw: RangeInput,
    domain: Domain,
    max_cells: u64,
) -> Result<NormalizedRange, ResolveError> {
    for endpoint in Endpoint::ALL {
        let value = raw.value(endpoint);
        if !domain.contains(value) {
            return Err(ResolveError::OutOfDomain {
                field: endpoint,
                value,
                min: domain.min(),
                max: domain.max(),
            });
        }
    }

    let (h_low, h_high) = ordered(raw.h_start, raw.h_end);
    let (v_low, v_high) = ordered(raw.v_start, raw.v_end);
    let range = NormalizedRange {
        h_low,
        h_high,
        v_low,
        v_high,
    };

    let cells = range
        .width()
        .checked_mul(range.height())
        .ok_or(ResolveError::TooLarge {
            cells: u64::MAX,
            max_cells,
        })?;
    if cells == 0 {
        return Err(ResolveError::EmptyRange);
    }
    if cells > max_cells {
        return Err(ResolveError::TooLarge { cells, max_cells });
    }
    Ok(range)
}
