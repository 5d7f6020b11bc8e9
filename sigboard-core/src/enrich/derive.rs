//! Derived-column functions. All are pure and total over nullable inputs.

use crate::domain::{Condition, Confidence, Verdict, VolatilityRegime};

/// Signal strength at or above this is favourable on its own.
pub const FAVOURABLE_STRENGTH: f64 = 0.03;
/// Average profit (percent) at or above this is favourable on its own.
pub const FAVOURABLE_AVG_PROFIT: f64 = 0.25;

/// Confidence tier from sample size.
pub fn confidence_from_n(n: Option<f64>) -> Confidence {
    match n {
        None => Confidence::Unknown,
        Some(n) if n.is_nan() => Confidence::Unknown,
        Some(n) if n >= 1000.0 => Confidence::High,
        Some(n) if n >= 300.0 => Confidence::Medium,
        Some(n) if n > 0.0 => Confidence::Low,
        Some(_) => Confidence::None,
    }
}

/// Model probability minus historical ratio. Null if either side is null.
pub fn signal_strength(ml_pred_prob: Option<f64>, historical_win_ratio: Option<f64>) -> Option<f64> {
    Some(ml_pred_prob? - historical_win_ratio?)
}

/// Classify a row from its signal strength and average profit.
///
/// The favourable branch is an OR and the marginal branch an AND; both
/// comparisons are inclusive. A null operand counts as zero here unless both
/// are null. NaN is treated as null.
pub fn verdict(signal_strength: Option<f64>, avg_profit_pct: Option<f64>) -> Verdict {
    let signal_strength = signal_strength.filter(|v| !v.is_nan());
    let avg_profit_pct = avg_profit_pct.filter(|v| !v.is_nan());
    if signal_strength.is_none() && avg_profit_pct.is_none() {
        return Verdict::InsufficientData;
    }
    let s = signal_strength.unwrap_or(0.0);
    let a = avg_profit_pct.unwrap_or(0.0);

    if s >= FAVOURABLE_STRENGTH || a >= FAVOURABLE_AVG_PROFIT {
        Verdict::Favourable
    } else if s >= 0.0 && a >= 0.0 {
        Verdict::Marginal
    } else {
        Verdict::Unfavourable
    }
}

/// Volatility regime from a raw condition label (case-insensitive).
pub fn regime_label(condition: &str) -> VolatilityRegime {
    if Condition::Above.matches_side(condition) {
        VolatilityRegime::Trend
    } else {
        VolatilityRegime::Range
    }
}

/// Half-width of the Wilson interval, when both bounds are known.
pub fn margin_of_error(wilson_l: Option<f64>, wilson_u: Option<f64>) -> Option<f64> {
    Some((wilson_u? - wilson_l?) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_tiers() {
        assert_eq!(confidence_from_n(Some(1000.0)), Confidence::High);
        assert_eq!(confidence_from_n(Some(999.0)), Confidence::Medium);
        assert_eq!(confidence_from_n(Some(300.0)), Confidence::Medium);
        assert_eq!(confidence_from_n(Some(299.0)), Confidence::Low);
        assert_eq!(confidence_from_n(Some(1.0)), Confidence::Low);
        assert_eq!(confidence_from_n(Some(0.0)), Confidence::None);
        assert_eq!(confidence_from_n(Some(-5.0)), Confidence::None);
        assert_eq!(confidence_from_n(None), Confidence::Unknown);
        assert_eq!(confidence_from_n(Some(f64::NAN)), Confidence::Unknown);
    }

    #[test]
    fn verdict_boundaries_are_inclusive() {
        assert_eq!(verdict(Some(0.03), Some(0.0)), Verdict::Favourable);
        assert_eq!(verdict(Some(-1.0), Some(0.25)), Verdict::Favourable);
        assert_eq!(verdict(Some(0.029999), Some(-0.01)), Verdict::Unfavourable);
        assert_eq!(verdict(Some(0.0), Some(0.0)), Verdict::Marginal);
        assert_eq!(verdict(None, None), Verdict::InsufficientData);
    }

    #[test]
    fn verdict_treats_single_null_as_zero() {
        assert_eq!(verdict(None, Some(0.1)), Verdict::Marginal);
        assert_eq!(verdict(Some(0.01), None), Verdict::Marginal);
        assert_eq!(verdict(Some(-0.01), None), Verdict::Unfavourable);
        assert_eq!(verdict(None, Some(0.3)), Verdict::Favourable);
    }

    #[test]
    fn marginal_needs_both_non_negative() {
        assert_eq!(verdict(Some(0.02), Some(-0.1)), Verdict::Unfavourable);
        assert_eq!(verdict(Some(-0.001), Some(0.2)), Verdict::Unfavourable);
    }

    #[test]
    fn nan_inputs_count_as_null() {
        assert_eq!(verdict(Some(f64::NAN), None), Verdict::InsufficientData);
        assert_eq!(verdict(Some(f64::NAN), Some(f64::NAN)), Verdict::InsufficientData);
        assert_eq!(verdict(Some(f64::NAN), Some(0.3)), Verdict::Favourable);
    }

    #[test]
    fn signal_strength_propagates_null() {
        assert_eq!(signal_strength(None, Some(0.5)), None);
        assert_eq!(signal_strength(Some(0.6), None), None);
        let s = signal_strength(Some(0.6), Some(0.5)).unwrap();
        assert!((s - 0.1).abs() < 1e-12);
    }

    #[test]
    fn regime_from_condition() {
        assert_eq!(regime_label("above"), VolatilityRegime::Trend);
        assert_eq!(regime_label("ABOVE"), VolatilityRegime::Trend);
        assert_eq!(regime_label("below"), VolatilityRegime::Range);
        assert_eq!(regime_label("sideways"), VolatilityRegime::Range);
    }

    #[test]
    fn margin_requires_both_bounds() {
        assert_eq!(margin_of_error(Some(0.4), Some(0.6)), Some((0.6 - 0.4) / 2.0));
        assert_eq!(margin_of_error(None, Some(0.6)), None);
        assert_eq!(margin_of_error(Some(0.4), None), None);
    }
}
