/// Reads a float the lenient way the data files and query strings expect.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12.5m"` reads as `12.5`. Input with no numeric prefix yields NaN.
pub fn parse_lenient_f64(input: &str) -> f64 {
    let text = input.trim_start();
    let prefix = numeric_prefix(text);
    if prefix.is_empty() {
        return f64::NAN;
    }
    let unsigned = prefix.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return if prefix.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    prefix.parse::<f64>().unwrap_or(f64::NAN)
}

/// Like [`parse_lenient_f64`] but only accepts finite values.
pub fn parse_finite_f64(input: &str) -> Option<f64> {
    let value = parse_lenient_f64(input);
    value.is_finite().then_some(value)
}

fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return &text[..end + "Infinity".len()];
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    &text[..end]
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(parse_lenient_f64("3"), 3.0);
        assert_eq!(parse_lenient_f64("-4.25"), -4.25);
        assert_eq!(parse_lenient_f64(".5"), 0.5);
        assert_eq!(parse_lenient_f64("7."), 7.0);
        assert_eq!(parse_lenient_f64("1e3"), 1000.0);
    }

    #[test]
    fn leading_whitespace_and_trailing_garbage_are_ignored() {
        assert_eq!(parse_lenient_f64("  12.5m"), 12.5);
        assert_eq!(parse_lenient_f64("2e"), 2.0);
        assert_eq!(parse_lenient_f64("2e+x"), 2.0);
        assert_eq!(parse_lenient_f64("1.2.3"), 1.2);
    }

    #[test]
    fn no_numeric_prefix_is_nan() {
        assert!(parse_lenient_f64("").is_nan());
        assert!(parse_lenient_f64("abc").is_nan());
        assert!(parse_lenient_f64("-").is_nan());
        assert!(parse_lenient_f64(".").is_nan());
        assert!(parse_lenient_f64("nan").is_nan());
        assert!(parse_lenient_f64("inf").is_nan());
    }

    #[test]
    fn infinity_literal_is_recognised_but_not_finite() {
        assert_eq!(parse_lenient_f64("Infinity"), f64::INFINITY);
        assert_eq!(parse_lenient_f64("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_finite_f64("Infinity"), None);
        assert_eq!(parse_finite_f64("x"), None);
        assert_eq!(parse_finite_f64(" 8 "), Some(8.0));
    }
}
