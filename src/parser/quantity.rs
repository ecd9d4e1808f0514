//! Numeric quantity tokens

use crate::nutrition::round2;

fn vulgar_fraction(c: char) -> Option<f64> {
    let value = match c {
        '¼' => 0.25,
        '½' => 0.5,
        '¾' => 0.75,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '⅕' => 0.2,
        '⅖' => 0.4,
        '⅗' => 0.6,
        '⅘' => 0.8,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 0.125,
        '⅜' => 0.375,
        '⅝' => 0.625,
        '⅞' => 0.875,
        _ => return None,
    };
    Some(value)
}

/// Quantities are finite and non-negative
fn is_quantity(value: &f64) -> bool {
    value.is_finite() && *value >= 0.0
}

fn parse_plain(token: &str) -> Option<f64> {
    if let Some((num, den)) = token.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den == 0.0 {
            return None;
        }
        return Some(num / den).filter(is_quantity);
    }
    token.parse::<f64>().ok().filter(is_quantity)
}

/// Parse a quantity token: `2`, `0.5`, `1/2`, `½`, `1½`, or a range `2-3`
/// (lower bound)
pub fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Some((low, _high)) = token.split_once(['-', '–']) {
        if !low.is_empty() {
            return parse_number(low);
        }
    }

    let mut chars = token.chars();
    if let Some(last) = chars.next_back() {
        if let Some(frac) = vulgar_fraction(last) {
            let whole = chars.as_str();
            if whole.is_empty() {
                return Some(frac);
            }
            return parse_plain(whole).map(|w| w + frac);
        }
    }

    parse_plain(token)
}

/// True for tokens like `1/2` or `½` that add onto a preceding whole number
pub(crate) fn is_fraction_token(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if vulgar_fraction(c).is_some() => true,
        _ => token.contains('/') && parse_plain(token).is_some_and(|v| v < 1.0),
    }
}

fn format_quantity(value: f64) -> String {
    let rounded = round2(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// Fold a leading run of number and fraction tokens into one decimal
///
/// `"1 1/2 cups flour"` becomes `"1.5 cups flour"`. Lines that do not start
/// with a number are returned unchanged.
pub fn normalize_mixed_fractions(line: &str) -> String {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let mut value = 0.0;
    let mut consumed = 0;
    for token in &tokens {
        match parse_number(token) {
            Some(v) if consumed == 0 || is_fraction_token(token) => {
                value += v;
                consumed += 1;
            }
            _ => break,
        }
    }

    if consumed == 0 {
        return tokens.join(" ");
    }

    let mut out = vec![format_quantity(value)];
    out.extend(tokens[consumed..].iter().map(|t| t.to_string()));
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("2"), Some(2.0));
        assert_eq!(parse_number("0.5"), Some(0.5));
        assert_eq!(parse_number("1/4"), Some(0.25));
        assert_eq!(parse_number("½"), Some(0.5));
        assert_eq!(parse_number("1½"), Some(1.5));
        assert_eq!(parse_number("2-3"), Some(2.0));
    }

    #[test]
    fn test_parse_number_rejects_words() {
        assert_eq!(parse_number("flour"), None);
        assert_eq!(parse_number("1/0"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-2"), None);
        assert_eq!(parse_number("-1/2"), None);
        assert_eq!(parse_number("inf/2"), None);
        assert_eq!(parse_number("nan/1"), None);
        assert_eq!(parse_number("1/-2"), None);
    }

    #[test]
    fn test_fraction_tokens() {
        assert!(is_fraction_token("1/2"));
        assert!(is_fraction_token("¾"));
        assert!(!is_fraction_token("3/2"));
        assert!(!is_fraction_token("2"));
    }

    #[test]
    fn test_normalize_mixed_fractions() {
        assert_eq!(normalize_mixed_fractions("1 1/2 cups flour"), "1.5 cups flour");
        assert_eq!(normalize_mixed_fractions("1/3 cup sugar"), "0.33 cup sugar");
        assert_eq!(normalize_mixed_fractions("2 eggs"), "2 eggs");
        assert_eq!(normalize_mixed_fractions("salt to taste"), "salt to taste");
    }

    #[test]
    fn test_normalize_does_not_sum_whole_numbers() {
        assert_eq!(normalize_mixed_fractions("2 3 oz cans"), "2 3 oz cans");
    }
}
