use lazy_static::lazy_static;
use regex::Regex;

use crate::warning::Warning;

/// The character removed from every field before comparison.
pub const DELIMITER_SPACE: char = ' ';

/// Removes every embedded space from a field.
///
/// The remaining fragments are joined as-is; nothing is put where the spaces
/// were. `" p I N t"` becomes `"pINt"`.
pub fn strip_spaces(field: &str) -> String {
    field.split(DELIMITER_SPACE).collect()
}

/// Lower-cases the ASCII capitals of a unit name.
///
/// Only `A` through `Z` are mapped. Every other character passes through
/// unchanged. A unit name containing an ASCII digit still keeps the digit, but
/// a warning is pushed onto `warnings`, since such a name is probably a typo
/// (`0unce` for `ounce`).
pub fn lower_case(field: &str, warnings: &mut Vec<Warning>) -> String {
    let mut lowered = String::with_capacity(field.len());
    let mut has_digit = false;

    for character in field.chars() {
        match character {
            'A'..='Z' => lowered.push(((character as u8) + 32) as char),
            '0'..='9' => {
                has_digit = true;
                lowered.push(character);
            }
            _ => lowered.push(character),
        }
    }

    if has_digit {
        tracing::warn!(unit = field, "Numeric character in unit name");
        warnings.push(Warning::NumericUnit(field.to_string()));
    }

    lowered
}

/// Normalizes a unit name for comparison: strips spaces, then lower-cases.
pub fn unit(field: &str, warnings: &mut Vec<Warning>) -> String {
    lower_case(&strip_spaces(field), warnings)
}

/// Checks that a field looks like a positive number.
///
/// The field passes if it is not exactly `"0"` and consists only of ASCII
/// digits and decimal points. The check is lax: `"4.5.2"` and `""` pass, so
/// callers still have to parse the field. A leading sign never passes, which
/// means `"-1"` is rejected as non-numeric rather than as negative.
pub fn ensure_numeric(field: &str) -> bool {
    lazy_static! {
        static ref REGEX: Regex = Regex::new(r"^[0-9.]*$").unwrap();
    }

    field != "0" && REGEX.is_match(field)
}

/// Validates and parses a space-stripped numeric field.
///
/// Returns `None` if the field fails [`ensure_numeric`] or is not a well-formed
/// decimal number.
pub fn parse_numeric(field: &str) -> Option<f64> {
    if !ensure_numeric(field) {
        return None;
    }

    field.parse::<f64>().ok()
}



#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("ounce"          , "ounce")]
    #[case(" p I N t"       , "pINt")]
    #[case("  l iT re "     , "liTre")]
    #[case("fluid ounce"    , "fluidounce")]
    #[case(""               , "")]
    #[case("   "            , "")]
    #[case("tab\tkept"      , "tab\tkept")]
    #[trace]
    fn test_strip_spaces(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(strip_spaces(field), expected);
    }

    #[rstest]
    #[case("OUNCE"   , "ounce"  , false)]
    #[case("pINt"    , "pint"   , false)]
    #[case("Mètre"   , "mètre"  , false)]
    #[case("ÉTÉ"     , "Été"    , false)]
    #[case("0unce"   , "0unce"  , true)]
    #[case("M2"      , "m2"     , true)]
    #[case("_-/"     , "_-/"    , false)]
    #[trace]
    fn test_lower_case(
        #[case] field: &str,
        #[case] expected: &str,
        #[case] warned: bool,
    ) {
        let mut warnings = vec![];

        assert_eq!(lower_case(field, &mut warnings), expected);

        if warned {
            assert_eq!(warnings, vec![Warning::NumericUnit(field.to_string())]);
        }
        else {
            assert!(warnings.is_empty());
        }
    }

    #[rstest]
    #[case(" p I N t")]
    #[case("  l iT re ")]
    #[case("Fluid Ounce")]
    #[case("KILO gram")]
    #[case("already")]
    #[trace]
    fn test_unit_idempotent(#[case] field: &str) {
        let mut warnings = vec![];

        let once = unit(field, &mut warnings);
        let twice = unit(&once, &mut warnings);

        assert_eq!(once, twice);
    }

    // The validator only checks characters, so malformed decimals pass.
    #[rstest]
    #[case("0"      , false)]
    #[case("-1"     , false)]
    #[case("4.5"    , true)]
    #[case("4.5.2"  , true)]
    #[case("28.35"  , true)]
    #[case("00"     , true)]
    #[case("0.0"    , true)]
    #[case("."      , true)]
    #[case(""       , true)]
    #[case("1e3"    , false)]
    #[case("+1"     , false)]
    #[case("1 "     , false)]
    #[case("inch"   , false)]
    #[case("٣"      , false)]
    #[trace]
    fn test_ensure_numeric(#[case] field: &str, #[case] expected: bool) {
        assert_eq!(ensure_numeric(field), expected);
    }

    #[rstest]
    #[case("4.5"    , Some(4.5))]
    #[case("28.35"  , Some(28.35))]
    #[case("00"     , Some(0.0))]
    #[case("0"      , None)]
    #[case("-1"     , None)]
    #[case("4.5.2"  , None)]
    #[case("."      , None)]
    #[case(""       , None)]
    #[trace]
    fn test_parse_numeric(#[case] field: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_numeric(field), expected);
    }
}
