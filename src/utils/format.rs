/// Renders a parsed quantity the way price lists usually show it: integral
/// values keep one decimal (`60.0`), everything else uses the shortest
/// representation that parses back to the same value.
pub fn format_quantity(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub fn format_ratio(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(60.0), "60.0");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.125), "0.125");
    }

    #[test]
    fn test_format_ratio_rounds_to_one_digit() {
        assert_eq!(format_ratio(30.0), "30.0");
        assert_eq!(format_ratio(33.333), "33.3");
        assert_eq!(format_ratio(12.96), "13.0");
    }
}
