//! Cell formatting shared by every table. Absent values render as "".

/// Probability as a percentage: `0.61` → `61.00%`.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => String::new(),
    }
}

/// Signed percentage: `0.03` → `+3.00%`, `-0.012` → `-1.20%`.
pub fn signed_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:+.2}%", v * 100.0),
        _ => String::new(),
    }
}

/// Profit columns already hold percentages: `0.25` → `0.25%`.
pub fn profit(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}%"),
        _ => String::new(),
    }
}

/// Sample size as an integer.
pub fn count(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.0}", v),
        _ => String::new(),
    }
}
