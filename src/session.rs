use anyhow::Error;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::converter::ConvertError;
use crate::converter::Converter;
use crate::converter::LoadError;
use crate::request::ConversionRequest;
use crate::warning::Warning;

const PROMPT_DIRECTORY: &str = "Would you like to specify a different directory for the conversion text file? Y/N";
const PROMPT_DIRECTORY_INPUT: &str = "Please input the directory (e.g. /home/user/converter/)";
const PROMPT_REQUEST: &str = "Please input an amount and units to convert from and to (i.e. \"1,ounce,gram\" = 1 ounce in grams)";
const PROMPT_CONTINUE: &str = "Convert another measurement? Y/N";
const PROMPT_EXIT: &str = "Press any key to exit...";

const MESSAGE_FILE_NOT_FOUND: &str = "Conversion file not found, please check the directory and try again.";
const MESSAGE_NOT_FOUND: &str = "The specified conversion is either missing from the file or impossible (check unit types or update the file).";

/// The states of an interactive session.
#[derive(Debug)]
enum State {
    /// Choosing the rule file.
    Init,

    /// Reading the rule file at the given path.
    Loading(PathBuf),

    /// Waiting for a request.
    Ready,

    /// Handling the given request line.
    Converting(String),

    /// The rule file could not be loaded.
    Failed,

    /// Finished; only the exit prompt remains.
    Done,
}

/// An interactive conversion session.
///
/// A session reads lines from `input` and writes prompts and results to
/// `output`. It runs until the user declines to continue or the input ends.
pub struct Session<R, W> {
    config: Config,
    converter: Converter,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: Config, input: R, output: W) -> Session<R, W> {
        Session {config, converter: Converter::new(), input, output}
    }

    /// Runs the session to completion.
    ///
    /// Only console I/O failures end the session with an error. Problems with
    /// the rule file or with requests are reported and handled.
    pub fn run(&mut self) -> Result<(), Error> {
        let mut state = State::Init;

        loop {
            tracing::trace!(?state, "Session state");

            state = match state {
                State::Init => match self.select_path()? {
                    Some(path) => State::Loading(path),
                    None => State::Done,
                },

                State::Loading(path) => self.load(path)?,

                State::Ready => {
                    self.say(PROMPT_REQUEST)?;

                    match self.read_line()? {
                        Some(line) => State::Converting(line),
                        None => State::Done,
                    }
                }

                State::Converting(line) => {
                    self.respond(&line)?;

                    match self.ask(PROMPT_CONTINUE)? {
                        Some(true) => State::Ready,
                        _ => State::Done,
                    }
                }

                State::Failed => State::Done,

                State::Done => {
                    self.say(PROMPT_EXIT)?;
                    self.read_line()?;

                    return Ok(());
                }
            };
        }
    }

    /// Returns the converter loaded by this session.
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Works out the rule file path, asking for a directory if none is set.
    fn select_path(&mut self) -> Result<Option<PathBuf>, Error> {
        let directory = match self.config.directory.clone() {
            Some(directory) => directory,
            None => match self.ask(PROMPT_DIRECTORY)? {
                Some(true) => {
                    self.say(PROMPT_DIRECTORY_INPUT)?;

                    match self.read_line()? {
                        Some(directory) => PathBuf::from(directory.trim()),
                        None => return Ok(None),
                    }
                }
                Some(false) => PathBuf::new(),
                None => return Ok(None),
            },
        };

        Ok(Some(directory.join(&self.config.filename)))
    }

    fn load(&mut self, path: PathBuf) -> Result<State, Error> {
        match Converter::load(&path) {
            Ok(loaded) => {
                self.warn(&loaded.warnings)?;

                if loaded.converter.is_empty() {
                    tracing::warn!(path = %path.display(), "Conversion file has no usable rules");
                }

                self.converter = loaded.converter;

                Ok(State::Ready)
            }
            Err(error @ LoadError::NotFound {..}) => {
                tracing::error!(%error, "Unable to load conversion file");
                self.say(MESSAGE_FILE_NOT_FOUND)?;

                Ok(State::Failed)
            }
            Err(error) => {
                tracing::error!(%error, "Unable to load conversion file");
                self.say(&error.to_string())?;

                Ok(State::Failed)
            }
        }
    }

    /// Parses and converts one request line, printing the outcome.
    fn respond(&mut self, line: &str) -> Result<(), Error> {
        let mut warnings = vec![];

        let request = match ConversionRequest::parse(line, &mut warnings) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(%line, ?error, "Rejected request");
                return self.say(&error.to_string());
            }
        };

        self.warn(&warnings)?;

        match self.converter.convert(&request) {
            Ok(result) => {
                writeln!(self.output)?;
                self.say(&format!(
                    "{} {}s converts to {} {}s.",
                    request.string_amount(),
                    request.unit_source(),
                    result,
                    request.unit_destination()
                ))
            }
            Err(error @ ConvertError::NotFound {..}) => {
                tracing::debug!(%error, "Conversion not found");
                self.say(MESSAGE_NOT_FOUND)
            }
        }
    }

    /// Asks a yes/no question until answered.
    ///
    /// Returns `None` if the input ends first.
    fn ask(&mut self, prompt: &str) -> Result<Option<bool>, Error> {
        self.say(prompt)?;

        while let Some(answer) = self.read_line()? {
            match answer.trim() {
                "Y" | "y" => return Ok(Some(true)),
                "N" | "n" => return Ok(Some(false)),
                _ => {}
            }
        }

        Ok(None)
    }

    /// Reads a line without its terminator. Returns `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut bytes = vec![];

        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&bytes);

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn warn(&mut self, warnings: &[Warning]) -> Result<(), Error> {
        for warning in warnings {
            self.say(&warning.to_string())?;
        }

        Ok(())
    }

    fn say(&mut self, message: &str) -> Result<(), Error> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;

        Ok(())
    }
}
