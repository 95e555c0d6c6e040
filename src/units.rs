//! Inch values as woodworkers write them: `12`, `6.5`, `3/4`, `1-1/2`.

const COMMON_FRACTIONS: [(f64, &str); 7] = [
    (0.125, "1/8"),
    (0.25, "1/4"),
    (0.375, "3/8"),
    (0.5, "1/2"),
    (0.625, "5/8"),
    (0.75, "3/4"),
    (0.875, "7/8"),
];

/// Parses a whole number, decimal, fraction, or mixed number (`1-1/2`, `1 1/2`).
pub fn parse_fractional_inches(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Mixed number: whole part, then '-' or whitespace, then a fraction
    if let Some(split) = trimmed.find(|c: char| c == '-' || c.is_whitespace())
        && split > 0
        && trimmed[split..].contains('/')
    {
        let whole = parse_digits(&trimmed[..split])?;
        let rest = trimmed[split..].trim_start_matches(|c: char| c == '-' || c.is_whitespace());
        return parse_fraction(rest).map(|frac| whole as f64 + frac);
    }

    if trimmed.contains('/') {
        return parse_fraction(trimmed);
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_fraction(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/')?;
    let num = parse_digits(num)?;
    let den = parse_digits(den)?;
    if den == 0 {
        return None;
    }
    Some(num as f64 / den as f64)
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Formats inches for display, preferring eighth fractions (`1-1/2`, `3/4`).
pub fn format_dimension(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 {
        return format!("{}", value);
    }

    let whole = value.floor();
    let fractional = ((value - whole) * 1000.0).round() / 1000.0;

    if let Some((_, frac)) = COMMON_FRACTIONS.iter().find(|(v, _)| *v == fractional) {
        if whole == 0.0 {
            return frac.to_string();
        }
        return format!("{}-{}", whole, frac);
    }

    format!("{}", (value * 1000.0).round() / 1000.0)
}
