// src/common/money.rs

/// Formata centavos como dólar americano: 123456 -> "$1,234.56".
pub fn format_usd(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let rest = abs % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, rest)
}

#[cfg(test)]
mod tests {
    use super::format_usd;

    #[test]
    fn formats_zero() {
        assert_eq!(format_usd(0), "$0.00");
    }

    #[test]
    fn formats_cents_and_thousands() {
        assert_eq!(format_usd(5), "$0.05");
        assert_eq!(format_usd(12_345), "$123.45");
        assert_eq!(format_usd(123_456), "$1,234.56");
        assert_eq!(format_usd(100_000_000), "$1,000,000.00");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_usd(-250), "-$2.50");
    }
}
