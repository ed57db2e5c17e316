//! Range regex synthesis for decimal-text cell values.
//!
//! The target store compares values only by byte equality, substring, or
//! regex match, so a relational predicate such as `> 18` is compiled into a
//! pattern that matches exactly the decimal strings whose numeric value
//! satisfies the inequality. Each operator produces a `|`-union of
//! independent, fully anchored `^...$` alternatives:
//!
//! - `< 55.06`  => `^-\d+(?:|\.\d+)$|^(?:|[0-4])\d{1,1}(?:|\.\d+)$|^5[0-4](?:|\.\d+)$|^55(?:|\.[0]+)$|^55\.0(?:|[0-5]\d*)$`
//! - `> -8.3`   => `^\d+(?:|\.\d+)$|^-(?:|[0-7])(?:|\.\d+)$|^-8(?:|\.[0-2]\d*)$`
//! - `> 18`     => `^18\.\d*[1-9]+\d*$|^[1-9]\d{2,}(?:|\.\d+)$|^[2-9]\d{1}(?:|\.\d+)$|^1[9-9](?:|\.\d+)$`
//! - `< -13`    => `^-[1-9]\d{2,}(?:|\.\d+)$|^-[2-9]\d{1}(?:|\.\d+)$|^-1[4-9](?:|\.\d+)$|^-13\.\d*[1-9]+\d*$`
//!
//! The construction walks the literal's digits left to right. For "greater"
//! an alternative widens one digit position upward and frees everything to
//! its right; a `9` position is skipped since no digit exceeds it. For
//! "less" the widening runs downward and `0` positions are skipped. A
//! longer integer run is unconditionally larger, a shorter one smaller, and
//! extra non-zero digits past the literal's stated precision decide ties.
//! Negative literals are compiled against the positive magnitude with the
//! widen direction swapped and the result prefixed with `-`.

use super::errors::NumericResult;
use super::literal::DecimalLiteral;

/// Matches every non-negative decimal string.
const ALL_NON_NEGATIVE: &str = r"^\d+(?:|\.\d+)$";
/// Matches every negative decimal string.
const ALL_NEGATIVE: &str = r"^-\d+(?:|\.\d+)$";

/// Relational operators the compiler can synthesize patterns for.
///
/// `Ne` compiles to the same pattern as `Eq`; the caller inverts the match
/// outcome instead of compiling a negated expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl RangeOp {
    /// Returns the operator's query-language spelling.
    pub fn symbol(&self) -> &'static str {
        match self {
            RangeOp::Lt => "<",
            RangeOp::Le => "<=",
            RangeOp::Gt => ">",
            RangeOp::Ge => ">=",
            RangeOp::Eq => "=",
            RangeOp::Ne => "!=",
        }
    }
}

/// Compiles `literal` and `op` into a regex pattern over decimal text.
///
/// The output is deterministic: the same input always yields a
/// byte-identical pattern.
pub fn compile(literal: &str, op: RangeOp) -> NumericResult<String> {
    let lit = DecimalLiteral::parse(literal)?;
    let alternatives = match op {
        RangeOp::Lt => less_than(&lit),
        RangeOp::Le => less_or_equal(&lit),
        RangeOp::Gt => greater_than(&lit),
        RangeOp::Ge => greater_or_equal(&lit),
        RangeOp::Eq | RangeOp::Ne => equal(&lit),
    };
    Ok(alternatives.join("|"))
}

/// Alternatives matching exactly the literal's value: the normalized text
/// plus any run of trailing zero fractional digits.
fn equal(lit: &DecimalLiteral) -> Vec<String> {
    let sign = if lit.is_negative() { "-" } else { "" };
    let int = lit.int_digits();
    match lit.frac_digits() {
        None => vec![format!(r"^{sign}{int}(?:|\.[0]+)$")],
        Some(frac) => vec![format!(r"^{sign}{int}\.{frac}[0]*$")],
    }
}

fn greater_than(lit: &DecimalLiteral) -> Vec<String> {
    if lit.is_negative() {
        // Crossing zero satisfies the relation outright; negatives qualify
        // when their magnitude is smaller.
        let mut alts = vec![ALL_NON_NEGATIVE.to_string()];
        alts.extend(less_magnitude("-", lit));
        alts
    } else {
        let mut alts = vec![hidden_precision("", lit)];
        alts.extend(greater_magnitude("", lit));
        alts
    }
}

fn less_than(lit: &DecimalLiteral) -> Vec<String> {
    if lit.is_negative() {
        let mut alts = greater_magnitude("-", lit);
        alts.push(hidden_precision("-", lit));
        alts
    } else {
        let mut alts = vec![ALL_NEGATIVE.to_string()];
        alts.extend(less_magnitude("", lit));
        alts
    }
}

fn greater_or_equal(lit: &DecimalLiteral) -> Vec<String> {
    let mut alts = greater_than(lit);
    alts.extend(equal(lit));
    alts
}

fn less_or_equal(lit: &DecimalLiteral) -> Vec<String> {
    let mut alts = less_than(lit);
    alts.extend(equal(lit));
    alts
}

/// The alternative matching values that display the literal's own digits
/// but carry additional non-zero fractional digits past its precision.
fn hidden_precision(sign: &str, lit: &DecimalLiteral) -> String {
    let int = lit.int_digits();
    match lit.frac_digits() {
        None => format!(r"^{sign}{int}\.\d*[1-9]+\d*$"),
        Some(frac) => format!(r"^{sign}{int}\.{frac}\d*[1-9]+\d*$"),
    }
}

/// Alternatives matching magnitudes strictly greater than the literal's.
fn greater_magnitude(sign: &str, lit: &DecimalLiteral) -> Vec<String> {
    let mut alts = greater_integer(sign, lit.int_digits());
    if let Some(frac) = lit.frac_digits() {
        alts.extend(greater_fraction(sign, lit.int_digits(), frac));
    }
    alts
}

/// Alternatives matching magnitudes strictly less than the literal's.
fn less_magnitude(sign: &str, lit: &DecimalLiteral) -> Vec<String> {
    let mut alts = less_integer(sign, lit.int_digits());
    if let Some(frac) = lit.frac_digits() {
        alts.extend(less_fraction(sign, lit.int_digits(), frac));
    }
    alts
}

/// One alternative per widenable integer position, preceded by the
/// more-integer-digits catch-all.
fn greater_integer(sign: &str, digits: &str) -> Vec<String> {
    let mut alts = vec![format!(
        r"^{sign}[1-9]\d{{{len},}}(?:|\.\d+)$",
        len = digits.len()
    )];
    for (i, b) in digits.bytes().enumerate() {
        let d = b - b'0';
        if d == 9 {
            continue;
        }
        let pre = &digits[..i];
        let free = digits.len() - 1 - i;
        let low = d + 1;
        if free == 0 {
            alts.push(format!(r"^{sign}{pre}[{low}-9](?:|\.\d+)$"));
        } else {
            alts.push(format!(r"^{sign}{pre}[{low}-9]\d{{{free}}}(?:|\.\d+)$"));
        }
    }
    alts
}

/// One alternative per widenable fractional position; the integer part is
/// fixed and anything after the widened digit is free.
fn greater_fraction(sign: &str, int: &str, frac: &str) -> Vec<String> {
    let mut alts = Vec::new();
    for (i, b) in frac.bytes().enumerate() {
        let d = b - b'0';
        if d == 9 {
            continue;
        }
        let pre = &frac[..i];
        let low = d + 1;
        alts.push(format!(r"^{sign}{int}\.{pre}[{low}-9]\d*$"));
    }
    alts
}

/// One alternative per narrowable integer position. The leading position
/// admits an optional empty prefix so shorter digit runs match too.
fn less_integer(sign: &str, digits: &str) -> Vec<String> {
    let mut alts = Vec::new();
    for (i, b) in digits.bytes().enumerate() {
        let d = b - b'0';
        if d == 0 {
            continue;
        }
        let high = d - 1;
        let mut alt = format!("^{sign}");
        if i > 0 {
            let pre = &digits[..i];
            alt.push_str(&format!("{pre}[0-{high}]"));
        } else if d == 1 {
            alt.push_str("(?:|[0])");
        } else {
            alt.push_str(&format!("(?:|[0-{high}])"));
        }
        let free = digits.len() - 1 - i;
        if free == 0 {
            alt.push_str(r"(?:|\.\d+)$");
        } else {
            alt.push_str(&format!(r"\d{{1,{free}}}(?:|\.\d+)$"));
        }
        alts.push(alt);
    }
    alts
}

/// One alternative per fractional position: truncations and downward
/// widenings, with the dot folded into the optional group at position 0.
fn less_fraction(sign: &str, int: &str, frac: &str) -> Vec<String> {
    let mut alts = Vec::new();
    for (i, b) in frac.bytes().enumerate() {
        let d = b - b'0';
        if i == 0 {
            if d == 0 {
                alts.push(format!(r"^{sign}{int}(?:|\.[0]+)$"));
            } else {
                let high = d - 1;
                alts.push(format!(r"^{sign}{int}(?:|\.[0-{high}]\d*)$"));
            }
        } else {
            let pre = &frac[..i];
            if d == 0 {
                alts.push(format!(r"^{sign}{int}\.{pre}[0]*$"));
            } else {
                let high = d - 1;
                alts.push(format!(r"^{sign}{int}\.{pre}(?:|[0-{high}]\d*)$"));
            }
        }
    }
    alts
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn matches(pattern: &str, candidate: &str) -> bool {
        Regex::new(pattern).unwrap().is_match(candidate)
    }

    #[test]
    fn test_less_than_fraction_pattern() {
        assert_eq!(
            compile("55.06", RangeOp::Lt).unwrap(),
            r"^-\d+(?:|\.\d+)$|^(?:|[0-4])\d{1,1}(?:|\.\d+)$|^5[0-4](?:|\.\d+)$|^55(?:|\.[0]+)$|^55\.0(?:|[0-5]\d*)$"
        );
    }

    #[test]
    fn test_greater_than_negative_pattern() {
        assert_eq!(
            compile("-8.3", RangeOp::Gt).unwrap(),
            r"^\d+(?:|\.\d+)$|^-(?:|[0-7])(?:|\.\d+)$|^-8(?:|\.[0-2]\d*)$"
        );
    }

    #[test]
    fn test_greater_than_integer_pattern() {
        assert_eq!(
            compile("18", RangeOp::Gt).unwrap(),
            r"^18\.\d*[1-9]+\d*$|^[1-9]\d{2,}(?:|\.\d+)$|^[2-9]\d{1}(?:|\.\d+)$|^1[9-9](?:|\.\d+)$"
        );
    }

    #[test]
    fn test_less_than_negative_integer_pattern() {
        assert_eq!(
            compile("-13", RangeOp::Lt).unwrap(),
            r"^-[1-9]\d{2,}(?:|\.\d+)$|^-[2-9]\d{1}(?:|\.\d+)$|^-1[4-9](?:|\.\d+)$|^-13\.\d*[1-9]+\d*$"
        );
    }

    #[test]
    fn test_greater_than_18_match_set() {
        let pattern = compile("18", RangeOp::Gt).unwrap();
        for hit in ["19", "180", "18.0001", "100", "18.5"] {
            assert!(matches(&pattern, hit), "{hit} should match > 18");
        }
        for miss in ["17.999", "18", "18.0", "-19", "0", "9"] {
            assert!(!matches(&pattern, miss), "{miss} should not match > 18");
        }
    }

    #[test]
    fn test_equal_accepts_trailing_zero_run_only() {
        let pattern = compile("55.06", RangeOp::Eq).unwrap();
        for hit in ["55.06", "55.060", "55.06000"] {
            assert!(matches(&pattern, hit), "{hit} should match = 55.06");
        }
        for miss in ["55", "55.0", "55.061", "55.6", "155.06", "-55.06"] {
            assert!(!matches(&pattern, miss), "{miss} should not match = 55.06");
        }
    }

    #[test]
    fn test_equal_integer_accepts_zero_fraction() {
        let pattern = compile("7", RangeOp::Eq).unwrap();
        for hit in ["7", "7.0", "7.000"] {
            assert!(matches(&pattern, hit));
        }
        for miss in ["70", "7.0001", "-7", "17"] {
            assert!(!matches(&pattern, miss));
        }
    }

    #[test]
    fn test_not_equal_reuses_equal_pattern() {
        assert_eq!(
            compile("55.06", RangeOp::Ne).unwrap(),
            compile("55.06", RangeOp::Eq).unwrap()
        );
    }

    #[test]
    fn test_greater_or_equal_includes_boundary() {
        let pattern = compile("18", RangeOp::Ge).unwrap();
        for hit in ["18", "18.0", "18.01", "19", "200"] {
            assert!(matches(&pattern, hit), "{hit} should match >= 18");
        }
        for miss in ["17.999", "17", "-18", "18.5.5"] {
            assert!(!matches(&pattern, miss), "{miss} should not match >= 18");
        }
    }

    #[test]
    fn test_less_or_equal_excludes_larger_fractions() {
        let pattern = compile("55", RangeOp::Le).unwrap();
        for hit in ["55", "55.0", "54.999", "0", "-100"] {
            assert!(matches(&pattern, hit), "{hit} should match <= 55");
        }
        // The boundary admits only trailing zeros, not arbitrary fractions.
        for miss in ["55.9", "55.01", "56", "100"] {
            assert!(!matches(&pattern, miss), "{miss} should not match <= 55");
        }
    }

    #[test]
    fn test_zero_literal() {
        let gt = compile("0", RangeOp::Gt).unwrap();
        for hit in ["0.0001", "1", "9", "10", "3.5"] {
            assert!(matches(&gt, hit), "{hit} should match > 0");
        }
        for miss in ["0", "0.0", "-1", "-0.5"] {
            assert!(!matches(&gt, miss), "{miss} should not match > 0");
        }

        // No digit narrows below zero, so < 0 is the negative catch-all.
        assert_eq!(compile("0", RangeOp::Lt).unwrap(), r"^-\d+(?:|\.\d+)$");
        assert_eq!(compile("-0", RangeOp::Lt).unwrap(), r"^-\d+(?:|\.\d+)$");
    }

    #[test]
    fn test_all_nine_fraction_widens_integer_only() {
        // Every fractional position is 9, so only integer alternatives and
        // the hidden-precision tail remain.
        let pattern = compile("1.99", RangeOp::Gt).unwrap();
        assert_eq!(
            pattern,
            r"^1\.99\d*[1-9]+\d*$|^[1-9]\d{1,}(?:|\.\d+)$|^[2-9](?:|\.\d+)$"
        );
        for hit in ["2", "1.991", "10", "1.999"] {
            assert!(matches(&pattern, hit), "{hit} should match > 1.99");
        }
        for miss in ["1.99", "1.990", "1.9", "1"] {
            assert!(!matches(&pattern, miss), "{miss} should not match > 1.99");
        }
    }

    #[test]
    fn test_nine_digit_skips_widen_up() {
        // 9 positions contribute no alternative; longer runs cover them.
        let pattern = compile("9", RangeOp::Gt).unwrap();
        assert_eq!(pattern, r"^9\.\d*[1-9]+\d*$|^[1-9]\d{1,}(?:|\.\d+)$");
        assert!(matches(&pattern, "10"));
        assert!(matches(&pattern, "9.1"));
        assert!(!matches(&pattern, "9"));
        assert!(!matches(&pattern, "8.9"));
    }

    #[test]
    fn test_trailing_zeros_normalized_before_compile() {
        assert_eq!(
            compile("55.0600", RangeOp::Lt).unwrap(),
            compile("55.06", RangeOp::Lt).unwrap()
        );
    }

    #[test]
    fn test_compile_is_idempotent() {
        for (literal, op) in [
            ("55.06", RangeOp::Lt),
            ("-8.3", RangeOp::Gt),
            ("18", RangeOp::Ge),
            ("0", RangeOp::Eq),
        ] {
            assert_eq!(compile(literal, op).unwrap(), compile(literal, op).unwrap());
        }
    }

    #[test]
    fn test_malformed_literal_rejected() {
        assert!(compile("1e3", RangeOp::Gt).is_err());
        assert!(compile("abc", RangeOp::Lt).is_err());
        assert!(compile("", RangeOp::Eq).is_err());
    }

    #[test]
    fn test_negative_boundary_with_equal() {
        let pattern = compile("-8.3", RangeOp::Le).unwrap();
        for hit in ["-8.3", "-8.30", "-8.31", "-8.4", "-9", "-100.5"] {
            assert!(matches(&pattern, hit), "{hit} should match <= -8.3");
        }
        for miss in ["-8.2", "-8", "0", "8.3"] {
            assert!(!matches(&pattern, miss), "{miss} should not match <= -8.3");
        }
    }
}
