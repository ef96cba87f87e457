#![forbid(unsafe_code)]

/// Fixed exchange rate used for the rupiah label.
pub const USD_TO_IDR: f64 = 16_700.0;

/// Whether a cost label offers a USD/IDR toggle.
pub fn is_convertible(price: &str) -> bool {
    !matches!(price, "Free" | "Official") && price.contains('$')
}

/// Convert the first `$<amount>` in `price` to rupiah, e.g. `$5` → `Rp 83.500`.
///
/// Labels without a dollar amount are returned unchanged.
pub fn convert_to_idr(price: &str) -> String {
    if matches!(price, "Free" | "Official") {
        return price.to_owned();
    }
    match usd_amount(price).and_then(to_rupiah) {
        Some(idr) => format!("Rp {}", group_thousands(idr)),
        None => price.to_owned(),
    }
}

/// Rounded rupiah amount, or `None` when it does not fit a `u64`.
fn to_rupiah(usd: f64) -> Option<u64> {
    let idr = (usd * USD_TO_IDR).round();
    // Upper bound is 2^64.
    (idr.is_finite() && (0.0..18_446_744_073_709_551_616.0).contains(&idr)).then(|| idr as u64)
}

fn usd_amount(price: &str) -> Option<f64> {
    price.match_indices('$').find_map(|(at, _)| {
        let rest = &price[at + 1..];
        let whole = leading_digits(rest);
        if whole == 0 {
            return None;
        }
        let mut end = whole;
        if let Some(fraction) = rest[whole..].strip_prefix('.') {
            let digits = leading_digits(fraction);
            if digits > 0 {
                end += 1 + digits;
            }
        }
        rest[..end].parse().ok()
    })
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

// Indonesian grouping: `1.234.567`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_dollar_amounts() {
        assert_eq!(convert_to_idr("$10"), "Rp 167.000");
        assert_eq!(convert_to_idr("$5.99/week"), "Rp 100.033");
        assert_eq!(convert_to_idr("from $0.5"), "Rp 8.350");
        assert_eq!(convert_to_idr("$ or $100"), "Rp 1.670.000");
    }

    #[test]
    fn absurd_amounts_keep_the_raw_label() {
        let huge = format!("${}", "9".repeat(30));
        assert_eq!(convert_to_idr(&huge), huge);
        let overflow = format!("${}", "9".repeat(400));
        assert_eq!(convert_to_idr(&overflow), overflow);
    }

    #[test]
    fn passes_through_non_prices() {
        assert_eq!(convert_to_idr("Free"), "Free");
        assert_eq!(convert_to_idr("Official"), "Official");
        assert_eq!(convert_to_idr("Paid"), "Paid");
        assert_eq!(convert_to_idr("$"), "$");
    }

    #[test]
    fn toggle_only_for_dollar_labels() {
        assert!(is_convertible("$4.99"));
        assert!(!is_convertible("Free"));
        assert!(!is_convertible("Paid"));
    }

    #[test]
    fn groups_small_numbers_untouched() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
    }
}
