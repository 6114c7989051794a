use thiserror::Error;

/// A non-fatal problem found while reading rules or requests.
///
/// Warnings never stop the converter. They are collected by the code that finds
/// them and handed back to the caller, which decides how to show them.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Warning {
    /// A rule line that does not have exactly three fields.
    #[error("Line {line}: expected \"from,to,multiplier\" but found {fields} field(s); the line was skipped.")]
    MalformedLine {
        line: usize,
        fields: usize,
    },

    /// A rule line whose multiplier is not a positive decimal number.
    #[error("{from} to {to} conversion cannot be added because of invalid characters in the multiplier part of the file.")]
    InvalidMultiplier {
        line: usize,
        from: String,
        to: String,
    },

    /// A unit name that contains an ASCII digit.
    #[error("Numeric character detected in word - please check conversion file and your own input for errors.")]
    NumericUnit(String),
}
