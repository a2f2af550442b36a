/// How a metric value is turned into display text.
#[derive(Debug, Clone, Copy, Default)]
pub enum MetricFormat {
    /// The number as-is.
    #[default]
    Plain,
    /// £ billions with two decimals, e.g. `-£0.15bn`.
    Billions,
    /// Unsigned percentage with one decimal, e.g. `4.2%`.
    Percent,
    /// Signed percentage with two decimals, e.g. `-0.31%`.
    SignedPercent,
    /// Signed percentage points, e.g. `+0.45pp`.
    PercentagePoints,
    /// Signed whole pounds, e.g. `+£120`.
    SignedPounds,
    Custom(fn(f64) -> String),
}

impl PartialEq for MetricFormat {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Same formatter means same function address.
            (MetricFormat::Custom(a), MetricFormat::Custom(b)) => *a as usize == *b as usize,
            (MetricFormat::Custom(_), _) | (_, MetricFormat::Custom(_)) => false,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl MetricFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            MetricFormat::Plain => value.to_string(),
            MetricFormat::Billions => {
                let v = round_off_negative_zero(value, 2);
                let sign = if v < 0.0 { "-" } else { "" };
                format!("{}£{:.2}bn", sign, v.abs())
            }
            MetricFormat::Percent => format!("{:.1}%", round_off_negative_zero(value, 1)),
            MetricFormat::SignedPercent => {
                format!("{:+.2}%", round_off_negative_zero(value, 2))
            }
            MetricFormat::PercentagePoints => {
                format!("{:+.2}pp", round_off_negative_zero(value, 2))
            }
            MetricFormat::SignedPounds => {
                let v = round_off_negative_zero(value, 0);
                let sign = if v < 0.0 { "-" } else { "+" };
                format!("{}£{:.0}", sign, v.abs())
            }
            MetricFormat::Custom(f) => f(value),
        }
    }
}

/// Map values that would print as a negative zero at `decimals` places to
/// `0.0`, so a tween passing through zero never flashes `-0.00`.
fn round_off_negative_zero(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    if (value * scale).round() == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_identity_text() {
        assert_eq!(MetricFormat::default().format(1.5), "1.5");
        assert_eq!(MetricFormat::Plain.format(-3.0), "-3");
    }

    #[test]
    fn billions_put_sign_before_currency() {
        assert_eq!(MetricFormat::Billions.format(-0.154), "-£0.15bn");
        assert_eq!(MetricFormat::Billions.format(1.2), "£1.20bn");
    }

    #[test]
    fn percentages() {
        assert_eq!(MetricFormat::Percent.format(4.26), "4.3%");
        assert_eq!(MetricFormat::SignedPercent.format(-0.314), "-0.31%");
        assert_eq!(MetricFormat::SignedPercent.format(1.0), "+1.00%");
        assert_eq!(MetricFormat::PercentagePoints.format(-0.45), "-0.45pp");
    }

    #[test]
    fn pounds_are_signed_and_whole() {
        assert_eq!(MetricFormat::SignedPounds.format(120.4), "+£120");
        assert_eq!(MetricFormat::SignedPounds.format(-5.6), "-£6");
    }

    #[test]
    fn values_near_zero_never_show_negative_zero() {
        assert_eq!(MetricFormat::SignedPercent.format(-0.0001), "+0.00%");
        assert_eq!(MetricFormat::Billions.format(-0.001), "£0.00bn");
        assert_eq!(MetricFormat::SignedPounds.format(-0.2), "+£0");
        assert_eq!(MetricFormat::Percent.format(-0.01), "0.0%");
    }

    #[test]
    fn custom_formatter_is_called() {
        fn households(v: f64) -> String {
            format!("{:.0} households", v)
        }
        assert_eq!(
            MetricFormat::Custom(households).format(1234.0),
            "1234 households"
        );
    }

    #[test]
    fn formats_compare_by_variant_and_function() {
        fn pounds(v: f64) -> String {
            format!("£{}", v)
        }
        fn pence(v: f64) -> String {
            format!("{}p", v)
        }
        assert_eq!(MetricFormat::Percent, MetricFormat::Percent);
        assert_ne!(MetricFormat::Percent, MetricFormat::SignedPercent);
        assert_eq!(MetricFormat::Custom(pounds), MetricFormat::Custom(pounds));
        assert_ne!(MetricFormat::Custom(pounds), MetricFormat::Custom(pence));
        assert_ne!(MetricFormat::Custom(pounds), MetricFormat::Plain);
    }
}
