use crate::resolver::{self, Domain, MAX_DOMAIN_MAGNITUDE};

/// Parses `MIN..MAX` (also `MIN:MAX`). A plain `-` separator would be
/// ambiguous with negative bounds.
pub fn parse_domain_range(value: &str) -> Result<Domain, String> {
    let trimmed = value.trim();
    let (min, max) = trimmed
        .split_once("..")
        .or_else(|| trimmed.split_once(':'))
        .ok_or_else(|| "expected format MIN..MAX".to_string())?;
    let min: i64 = min
        .trim()
        .parse()
        .map_err(|_| "invalid MIN value".to_string())?;
    let max: i64 = max
        .trim()
        .trim_start_matches('=')
        .parse()
        .map_err(|_| "invalid MAX value".to_string())?;
    validate_domain(min, max)
}

pub fn parse_max_cells(value: &str) -> Result<u64, String> {
    let cleaned: String = value.trim().chars().filter(|c| *c != '_' && *c != ',').collect();
    let n: u64 = cleaned
        .parse()
        .map_err(|_| "expected a positive integer".to_string())?;
    if n == 0 {
        return Err("expected a positive integer".to_string());
    }
    Ok(n)
}

pub fn validate_domain(min: i64, max: i64) -> Result<Domain, String> {
    if !resolver::within_magnitude(min) || !resolver::within_magnitude(max) {
        return Err(format!(
            "invalid domain {min}..{max}, bounds must lie within -{MAX_DOMAIN_MAGNITUDE}..{MAX_DOMAIN_MAGNITUDE}"
        ));
    }
    Domain::new(min, max).ok_or_else(|| format!("invalid domain {min}..{max}, MIN > MAX"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_domain_range_accepts_negative_bounds() {
        assert_eq!(parse_domain_range("-50..50").unwrap(), Domain::new(-50, 50).unwrap());
        assert_eq!(parse_domain_range(" -9:-1 ").unwrap(), Domain::new(-9, -1).unwrap());
        assert_eq!(parse_domain_range("0..=10").unwrap(), Domain::new(0, 10).unwrap());
    }

    #[test]
    fn parse_domain_range_rejects_invalid() {
        assert!(parse_domain_range("50").is_err());
        assert!(parse_domain_range("a..5").is_err());
        assert!(parse_domain_range("5..").is_err());
        assert!(parse_domain_range("10..-10").is_err());
    }

    #[test]
    fn domain_bounds_are_capped_so_products_fit() {
        assert!(parse_domain_range("-3037000499..3037000499").is_ok());
        let err = parse_domain_range("-5000000000..5000000000").unwrap_err();
        assert!(err.contains("bounds must lie within"));
        assert!(validate_domain(i64::MIN + 1, i64::MAX).is_err());
        assert!(validate_domain(0, MAX_DOMAIN_MAGNITUDE + 1).is_err());
        assert!(validate_domain(-1, 1).is_ok());
    }

    #[test]
    fn parse_max_cells_allows_separators() {
        assert_eq!(parse_max_cells("100_000").unwrap(), 100_000);
        assert_eq!(parse_max_cells("10,000").unwrap(), 10_000);
        assert!(parse_max_cells("0").is_err());
        assert!(parse_max_cells("-5").is_err());
    }
}
