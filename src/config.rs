use anyhow::bail;
use anyhow::Error;
use std::path::PathBuf;

/// The rule file name used when none is configured.
pub const FILENAME_DEFAULT: &str = "convert.txt";

/// The environment variable overriding the rule file name.
pub const ENV_FILENAME: &str = "CONVERT_FILE";

/// Converter settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The directory holding the rule file. If unset, the user is asked.
    pub directory: Option<PathBuf>,

    /// The name of the rule file inside the directory.
    pub filename: String,
}

impl Config {
    /// Builds the configuration from command line arguments (without the
    /// program name) and an optional file name override.
    ///
    /// The only accepted argument is the rule file directory.
    pub fn from_args(
        arguments: impl IntoIterator<Item = String>,
        filename: Option<String>
    ) -> Result<Config, Error> {
        let mut arguments = arguments.into_iter();

        let directory = arguments.next().map(PathBuf::from);

        if let Some(argument) = arguments.next() {
            bail!("Unexpected argument: {}", argument);
        }

        let filename = match filename {
            Some(filename) if !filename.trim().is_empty() => filename,
            _ => FILENAME_DEFAULT.to_string(),
        };

        Ok(Config {directory, filename})
    }

    /// Builds the configuration from the process arguments and environment.
    pub fn from_env() -> Result<Config, Error> {
        Config::from_args(std::env::args().skip(1), std::env::var(ENV_FILENAME).ok())
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(vec![]                , None                      , None                , "convert.txt")]
    #[case(vec!["/tmp/rules"]    , None                      , Some("/tmp/rules")  , "convert.txt")]
    #[case(vec![]                , Some("units.txt")         , None                , "units.txt")]
    #[case(vec!["rules"]         , Some("  ")                , Some("rules")       , "convert.txt")]
    #[trace]
    fn test_from_args(
        #[case] arguments: Vec<&str>,
        #[case] filename: Option<&str>,
        #[case] directory: Option<&str>,
        #[case] expected_filename: &str,
    ) {
        let config = Config::from_args(
            arguments.into_iter().map(String::from),
            filename.map(String::from)
        ).unwrap();

        assert_eq!(config.directory, directory.map(PathBuf::from));
        assert_eq!(config.filename, expected_filename);
    }

    #[test]
    fn test_from_args_extra() {
        let arguments = vec!["a".to_string(), "b".to_string()];

        assert!(Config::from_args(arguments, None).is_err());
    }
}
