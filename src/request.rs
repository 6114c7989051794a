use itertools::Itertools;
use thiserror::Error;

use crate::converter::DELIMITER_FIELD;
use crate::normalize;
use crate::warning::Warning;

/// An error rejecting a single conversion request.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RequestError {
    /// The request has fewer than three comma-separated parts.
    #[error("Please check the format of your input and try again.")]
    MissingFields(usize),

    /// The request has a valid amount but is missing a unit.
    #[error("Error! Please ensure that you input in the correct format.")]
    MissingUnits(usize),

    /// The amount is not a positive decimal number.
    #[error("Please check 0-9 and \".\" characters only before first comma and that it is greater than zero")]
    NonNumericAmount(String),
}

/// A request to convert an amount from one unit to another.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionRequest {
    /// The amount as typed, minus spaces.
    string_amount: String,
    amount: f64,
    unit_source: String,
    unit_destination: String,
}

impl ConversionRequest {
    /// Creates a request from already normalized parts.
    pub fn new(
        string_amount: impl Into<String>,
        amount: f64,
        unit_source: impl Into<String>,
        unit_destination: impl Into<String>,
    ) -> ConversionRequest {
        ConversionRequest {
            string_amount: string_amount.into(),
            amount,
            unit_source: unit_source.into(),
            unit_destination: unit_destination.into(),
        }
    }

    /// Parses a request of the form `amount,from,to`.
    ///
    /// Spaces are removed from every part and unit names are lower-cased.
    /// Parts after the third are ignored. A request with fewer than three parts
    /// fails with [`RequestError::MissingUnits`] if its amount is valid and
    /// [`RequestError::MissingFields`] otherwise. Unit names containing digits
    /// are accepted but reported through `warnings`.
    pub fn parse(line: &str, warnings: &mut Vec<Warning>)
    -> Result<ConversionRequest, RequestError> {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some((field_amount, field_source, field_destination))
        = line.split(DELIMITER_FIELD).next_tuple::<(&str, &str, &str)>() else {
            let count_fields = line.split(DELIMITER_FIELD).count();
            let field_amount = line.split(DELIMITER_FIELD).next().unwrap_or_default();

            return match normalize::parse_numeric(&normalize::strip_spaces(field_amount)) {
                Some(_) => Err(RequestError::MissingUnits(count_fields)),
                None => Err(RequestError::MissingFields(count_fields)),
            };
        };

        let string_amount = normalize::strip_spaces(field_amount);

        let Some(amount) = normalize::parse_numeric(&string_amount) else {
            return Err(RequestError::NonNumericAmount(string_amount));
        };

        let unit_source = normalize::unit(field_source, warnings);
        let unit_destination = normalize::unit(field_destination, warnings);

        Ok(ConversionRequest::new(string_amount, amount, unit_source, unit_destination))
    }

    pub fn string_amount(&self) -> &str {
        &self.string_amount
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn unit_source(&self) -> &str {
        &self.unit_source
    }

    pub fn unit_destination(&self) -> &str {
        &self.unit_destination
    }
}
