/// Derived display values
///
/// Pure helpers for the two aggregates the presentation layer shows:
/// the basket's total weight and human-readable file sizes.

use crate::store::data::CartItem;

const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

/// Sum of the basket's weights, formatted with exactly two decimals.
/// Entries without a numeric weight contribute 0.
pub fn total_weight(cart: &[CartItem]) -> String {
    let sum: f64 = cart.iter().map(|item| item.weight.unwrap_or(0.0)).sum();
    format!("{sum:.2}")
}

/// Format a byte count with binary (1024-based) units.
///
/// Picks the largest unit where the scaled value is at least 1 and keeps
/// at most two decimals, trimming trailing zeros: `1024` is "1KiB",
/// `1536` is "1.5KiB". Zero is the literal "0 Bytes".
pub fn format_byte_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((63 - bytes.leading_zeros() as u64) / 10).min(UNITS.len() as u64 - 1);
    let scaled = bytes as f64 / (1u64 << (exponent * 10)) as f64;

    let mut value = format!("{scaled:.2}");
    while value.ends_with('0') {
        value.pop();
    }
    if value.ends_with('.') {
        value.pop();
    }

    format!("{value}{}", UNITS[exponent as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(weight: Option<f64>) -> CartItem {
        CartItem {
            id: 1,
            image_id: 1,
            title: String::new(),
            url: String::new(),
            weight,
            image_data: String::new(),
            file_size: 0,
            added_at: 0,
        }
    }

    #[test]
    fn test_total_weight_two_decimals() {
        let cart = vec![entry(Some(1.5)), entry(Some(2.25))];
        assert_eq!(total_weight(&cart), "3.75");
    }

    #[test]
    fn test_total_weight_missing_contributes_zero() {
        let cart = vec![entry(Some(1.0)), entry(None)];
        assert_eq!(total_weight(&cart), "1.00");
    }

    #[test]
    fn test_total_weight_empty_cart() {
        assert_eq!(total_weight(&[]), "0.00");
    }

    #[test]
    fn test_byte_size_zero() {
        assert_eq!(format_byte_size(0), "0 Bytes");
    }

    #[test]
    fn test_byte_size_exact_unit() {
        assert_eq!(format_byte_size(1024), "1KiB");
        assert_eq!(format_byte_size(1), "1B");
        assert_eq!(format_byte_size(1024 * 1024), "1MiB");
    }

    #[test]
    fn test_byte_size_fractional() {
        assert_eq!(format_byte_size(1536), "1.5KiB");
        assert_eq!(format_byte_size(500), "500B");
    }

    #[test]
    fn test_byte_size_caps_at_gib() {
        assert_eq!(format_byte_size(2 * 1024 * 1024 * 1024 * 1024), "2048GiB");
    }
}
