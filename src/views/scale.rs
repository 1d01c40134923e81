//! Log-scale helpers shared by the bar chart and the heatmap colour axis.

/// `12345` → `"12,345"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Colour-bar label showing the raw count next to its base-10 log:
/// `1000` → `"1,000 (log₁₀=3.0)"`.
pub fn log_tick_label(tick: f64) -> String {
    format!("{} (log₁₀={:.1})", thousands(tick.round() as u64), tick.log10())
}

/// Tick label for an axis that plots `log10(value)`: integral exponents are
/// printed as the value they stand for, everything else is left blank.
pub fn log_axis_label(exponent: f64) -> String {
    if (exponent - exponent.round()).abs() > 1e-9 || exponent < 0.0 {
        return String::new();
    }
    thousands(10f64.powi(exponent.round() as i32) as u64)
}

/// Maps positive counts onto `[0, 1]` along a log10 scale spanning the
/// smallest and largest positive value seen. Zero has no logarithm and maps
/// to `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogColorScale {
    low: f64,
    high: f64,
}

impl LogColorScale {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| *v > 0.0) {
            low = low.min(v);
            high = high.max(v);
        }
        (low <= high).then_some(LogColorScale { low, high })
    }

    pub fn normalize(&self, value: f64) -> Option<f64> {
        if value <= 0.0 {
            return None;
        }
        let (lo, hi) = (self.low.log10(), self.high.log10());
        if hi - lo < f64::EPSILON {
            return Some(1.0);
        }
        Some(((value.log10() - lo) / (hi - lo)).clamp(0.0, 1.0))
    }

    /// Whether a reference tick falls inside the scale's domain.
    pub fn covers(&self, tick: f64) -> bool {
        self.low <= tick && tick <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(70000), "70,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn reference_tick_labels() {
        assert_eq!(log_tick_label(1000.0), "1,000 (log₁₀=3.0)");
        assert_eq!(log_tick_label(5000.0), "5,000 (log₁₀=3.7)");
        assert_eq!(log_tick_label(25000.0), "25,000 (log₁₀=4.4)");
        assert_eq!(log_tick_label(70000.0), "70,000 (log₁₀=4.8)");
    }

    #[test]
    fn log_axis_labels_only_on_decades() {
        assert_eq!(log_axis_label(0.0), "1");
        assert_eq!(log_axis_label(3.0), "1,000");
        assert_eq!(log_axis_label(2.5), "");
    }

    #[test]
    fn color_scale_ignores_zero() {
        let scale = LogColorScale::from_values([0.0, 10.0, 1000.0]).unwrap();
        assert_eq!(scale.normalize(0.0), None);
        assert_eq!(scale.normalize(10.0), Some(0.0));
        assert_eq!(scale.normalize(1000.0), Some(1.0));
        assert!((scale.normalize(100.0).unwrap() - 0.5).abs() < 1e-12);
        assert!(scale.covers(500.0));
        assert!(!scale.covers(5000.0));
    }

    #[test]
    fn all_zero_has_no_scale() {
        assert_eq!(LogColorScale::from_values([0.0, 0.0]), None);
    }
}
