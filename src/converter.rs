mod rule;

use itertools::Itertools;
use std::collections::VecDeque;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::converter::rule::ConversionRule;
use crate::normalize;
use crate::request::ConversionRequest;
use crate::warning::Warning;

/// The character separating the fields of rules and requests.
pub const DELIMITER_FIELD: char = ',';

/// An error preventing a rule file from being loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Conversion file not found: {}", .path.display())]
    NotFound {
        path: PathBuf,
    },

    #[error("Unable to read conversion file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },
}

/// An error returned when no rule relates the requested units.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error("No conversion from {from} to {to}")]
    NotFound {
        from: String,
        to: String,
    },
}

/// A unit converter.
///
/// This structure holds an ordered set of conversion rules. Rules are searched
/// front to back and the first rule relating two units wins, so when rules
/// conflict, the one loaded last takes precedence. Rules are never combined:
/// knowing `a -> b` and `b -> c` does not allow `a -> c`.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    rules: VecDeque<ConversionRule>,
}

/// A freshly loaded converter along with the lines it had to skip.
#[derive(Debug)]
pub struct Loaded {
    pub converter: Converter,
    pub warnings: Vec<Warning>,
}

impl Converter {
    /// Returns a converter without rules.
    pub fn new() -> Converter {
        Converter::default()
    }

    /// Loads rules from the file at the given path.
    ///
    /// See [`Converter::read`] for the file format.
    pub fn load(path: impl AsRef<Path>) -> Result<Loaded, LoadError> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {path: path.to_path_buf()},
            _ => LoadError::Io {path: path.to_path_buf(), source: error},
        })?;

        let loaded = Converter::read(BufReader::new(file)).map_err(|error| {
            LoadError::Io {path: path.to_path_buf(), source: error}
        })?;

        tracing::info!(
            path = %path.display(),
            rules = loaded.converter.len(),
            skipped = loaded.warnings.len(),
            "Loaded conversion file"
        );

        Ok(loaded)
    }

    /// Reads rules from a rule file.
    ///
    /// Each line of a rule file reads `from,to,multiplier`, meaning one `from`
    /// is `multiplier` of `to`. Spaces may appear anywhere and are removed.
    /// Blank lines are ignored, as is anything after the third field. Lines
    /// with fewer than three fields, or with a multiplier that is not a
    /// positive number, are skipped and reported as warnings; reading carries
    /// on with the next line. Bytes that are not valid UTF-8 are replaced
    /// rather than rejected.
    pub fn read(reader: impl BufRead) -> Result<Loaded, io::Error> {
        let mut converter = Converter::new();
        let mut warnings = vec![];

        for (bytes, number) in reader.split(b'\n').zip(1..) {
            let bytes = bytes?;

            // Undecodable bytes become U+FFFD instead of failing the whole file.
            let line = String::from_utf8_lossy(&bytes);
            let line = line.trim_end_matches('\r');

            // Skip blank lines.
            if line.trim().is_empty() {
                continue;
            }

            // Fields after the multiplier are ignored.
            let Some((string_from, string_to, string_multiplier))
            = line.split(DELIMITER_FIELD)
            .map(normalize::strip_spaces)
            .next_tuple::<(String, String, String)>() else {
                let count_fields = line.split(DELIMITER_FIELD).count();

                tracing::warn!(line = number, fields = count_fields, "Malformed conversion rule");
                warnings.push(Warning::MalformedLine {line: number, fields: count_fields});
                continue;
            };

            let Some(multiplier) = normalize::parse_numeric(&string_multiplier)
            .filter(|multiplier| *multiplier > 0.0) else {
                tracing::warn!(
                    line = number,
                    from = %string_from,
                    to = %string_to,
                    "Invalid conversion multiplier"
                );
                warnings.push(Warning::InvalidMultiplier {
                    line: number,
                    from: string_from,
                    to: string_to,
                });
                continue;
            };

            let from = normalize::lower_case(&string_from, &mut warnings);
            let to = normalize::lower_case(&string_to, &mut warnings);

            let rule = ConversionRule::new(from, to, multiplier);

            tracing::debug!(
                from = rule.unit_source(),
                to = rule.unit_destination(),
                multiplier = rule.multiplier(),
                "Adding conversion rule"
            );

            converter.push(rule);
        }

        Ok(Loaded {converter, warnings})
    }

    /// Adds a rule ahead of all existing rules.
    pub fn push(&mut self, rule: ConversionRule) {
        self.rules.push_front(rule);
    }

    /// Returns the number of rules in this converter.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in search order.
    pub fn rules(&self) -> impl Iterator<Item = &ConversionRule> {
        self.rules.iter()
    }

    /// Performs a unit conversion.
    pub fn convert(&self, request: &ConversionRequest) -> Result<f64, ConvertError> {
        self.rules()
        .find_map(|rule| rule.apply(request.unit_source(), request.unit_destination(), request.amount()))
        .ok_or_else(|| ConvertError::NotFound {
            from: request.unit_source().to_string(),
            to: request.unit_destination().to_string(),
        })
    }
}
