//! Field-level validation of the four raw form values.
//!
//! Every field is checked against three rules in order (required, number,
//! range) and the first rule it breaks is reported. Messages name the
//! violated rule so a host can show them next to the field or as a single
//! aggregated line.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::resolver::{Domain, Endpoint, RangeInput};

/// Raw field values as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    pub h_start: String,
    pub h_end: String,
    pub v_start: String,
    pub v_end: String,
}

impl FormValues {
    pub fn new(
        h_start: impl Into<String>,
        h_end: impl Into<String>,
        v_start: impl Into<String>,
        v_end: impl Into<String>,
    ) -> Self {
        Self {
            h_start: h_start.into(),
            h_end: h_end.into(),
            v_start: v_start.into(),
            v_end: v_end.into(),
        }
    }

    pub fn get(&self, field: Endpoint) -> &str {
        match field {
            Endpoint::HStart => &self.h_start,
            Endpoint::HEnd => &self.h_end,
            Endpoint::VStart => &self.v_start,
            Endpoint::VEnd => &self.v_end,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    Required,
    Number,
    Range,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Number => "number",
            Rule::Range => "range",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Endpoint,
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            // already names its field
            Rule::Required => f.write_str(&self.message),
            _ => write!(f, "{}: {}", field_label(self.field), self.message),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStyle {
    #[default]
    PerField,
    Aggregated,
}

impl MessageStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "per_field" | "per-field" | "field" => Some(Self::PerField),
            "aggregated" | "aggregate" | "single" => Some(Self::Aggregated),
            _ => None,
        }
    }
}

pub fn field_label(field: Endpoint) -> &'static str {
    match field {
        Endpoint::HStart => "Horizontal start",
        Endpoint::HEnd => "Horizontal end",
        Endpoint::VStart => "Vertical start",
        Endpoint::VEnd => "Vertical end",
    }
}

// The h pair is worded "row" and the v pair "column", as users of the form
// have always seen it, even though h spans the header row's columns.
fn required_message(field: Endpoint) -> &'static str {
    match field {
        Endpoint::HStart => "The minimum row value is required.",
        Endpoint::HEnd => "The maximum row value is required.",
        Endpoint::VStart => "The minimum column value is required.",
        Endpoint::VEnd => "The maximum column value is required.",
    }
}

fn range_message(domain: Domain) -> String {
    format!(
        "Please enter a value between {} and {}.",
        domain.min(),
        domain.max()
    )
}

fn fits_i64(f: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which itself does not fit
    f >= i64::MIN as f64 && f < i64::MAX as f64
}

fn check_field(field: Endpoint, raw: &str, domain: Domain) -> Result<i64, FieldError> {
    let fail = |rule: Rule, message: String| FieldError {
        field,
        rule,
        message,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(fail(Rule::Required, required_message(field).to_string()));
    }

    let value = match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(_) => match trimmed.parse::<f64>() {
            // "5.0", "1e1"
            Ok(f) if f.is_finite() && f.fract() == 0.0 && fits_i64(f) => f as i64,
            Ok(f) if f.is_finite() && f.fract() == 0.0 => {
                return Err(fail(Rule::Range, range_message(domain)));
            }
            Ok(f) if f.is_finite() => {
                return Err(fail(Rule::Number, "Must be a whole number.".to_string()));
            }
            _ => return Err(fail(Rule::Number, "Must be a valid number.".to_string())),
        },
    };

    if !domain.contains(value) {
        return Err(fail(Rule::Range, range_message(domain)));
    }
    Ok(value)
}

/// Validates all four fields. Errors come back in field order, at most one
/// per field.
pub fn validate_fields(
    values: &FormValues,
    domain: Domain,
) -> Result<RangeInput, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut parsed = [0i64; 4];
    for (slot, field) in parsed.iter_mut().zip(Endpoint::ALL) {
        match check_field(field, values.get(field), domain) {
            Ok(v) => *slot = v,
            Err(e) => errors.push(e),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    let [h_start, h_end, v_start, v_end] = parsed;
    Ok(RangeInput::new(h_start, h_end, v_start, v_end))
}

pub fn render_messages(errors: &[FieldError], style: MessageStyle) -> Vec<String> {
    match style {
        MessageStyle::PerField => errors.iter().map(|e| e.to_string()).collect(),
        MessageStyle::Aggregated => {
            if errors.is_empty() {
                return Vec::new();
            }
            let fields = errors.iter().map(|e| field_label(e.field)).join(", ");
            let rules = errors.iter().map(|e| e.rule.name()).unique().join("/");
            vec![format!("Invalid input in {fields} ({rules}).")]
        }
    }
}
