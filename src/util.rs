/// Divides, short-circuiting to zero whenever the result would not be finite.
pub(crate) fn ratio(numerator: impl Into<f64>, denominator: impl Into<f64>) -> f64 {
    let denominator = denominator.into();
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator.into() / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Runs per six balls.
pub(crate) fn per_over(runs: impl Into<f64>, balls: u32) -> f64 {
    ratio(runs, balls) * 6.0
}

/// Runs per hundred balls.
pub(crate) fn per_hundred(runs: impl Into<f64>, balls: u32) -> f64 {
    ratio(runs, balls) * 100.0
}

/// Cricket's X.Y over notation, where Y is the number of balls into the next over.
/// This is a display value and not a true decimal.
pub(crate) fn overs_notation(balls: u32) -> f64 {
    f64::from(balls / 6) + f64::from(balls % 6) / 10.0
}

pub(crate) fn over_ball_label(balls: u32) -> String {
    format!("{}.{}", balls / 6, balls % 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_never_divides_by_zero() {
        assert_eq!(ratio(10_u32, 0_u32), 0.0);
        assert_eq!(per_over(10_u32, 0), 0.0);
        assert_eq!(per_hundred(0_u32, 0), 0.0);
        assert_eq!(ratio(f64::MAX, 1e-300), 0.0);
    }

    #[test]
    fn notation_carries_partial_overs() {
        assert!((overs_notation(6) - 1.0).abs() < f64::EPSILON);
        assert!((overs_notation(23) - 3.5).abs() < 1e-9);
        assert_eq!(over_ball_label(14), "2.2");
        assert_eq!(over_ball_label(0), "0.0");
    }
}
