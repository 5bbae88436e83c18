/// Format a USD amount with thousands separators and two decimals: `$1,234.56`.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Format a percentage with one decimal: `42.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// A horizontal bar scaled so that `max` fills `width` characters.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 || width == 0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    // Anything above zero gets at least one cell so it stays visible
    "█".repeat(len.clamp(1, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(1.2), "$1.20");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_usd(-12.5), "-$12.50");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(42.46), "42.5%");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(10.0, 10.0, 20).chars().count(), 20);
        assert_eq!(bar(5.0, 10.0, 20).chars().count(), 10);
        assert_eq!(bar(0.001, 10.0, 20).chars().count(), 1);
        assert_eq!(bar(0.0, 10.0, 20), "");
        assert_eq!(bar(5.0, 0.0, 20), "");
    }
}
