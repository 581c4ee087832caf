use std::env;

use crate::api::Options;
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::tokenizer::Tokenizer;
use crate::parser::{CommandLine, ParseError};

/// The command line parser.
///
/// A parser holds no state between parses: the same catalog may be parsed any number of times, each parse producing an independent [`CommandLine`].
///
/// ### Example
/// ```
/// # use clasp_core as clasp;
/// use clasp::{Options, Parser};
///
/// let mut options = Options::default();
/// options
///     .add("v", Some("verbose"), false, "Print more.")
///     .unwrap()
///     .add("o", Some("output"), true, "The output file.")
///     .unwrap();
///
/// let command_line = Parser::new()
///     .parse(&options, &["-v", "--output=out.txt", "in.txt"])
///     .unwrap();
///
/// assert!(command_line.has_option("verbose"));
/// assert_eq!(command_line.option_value("o"), Some("out.txt"));
/// assert_eq!(command_line.args(), vec!["in.txt"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    stop_at_non_option: bool,
}

impl Parser {
    /// A parser which rejects unrecognized options.
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, the first unrecognized or non-option token ends option processing.
    /// It and every later token are kept as leftover arguments.
    pub fn stop_at_non_option(mut self, stop_at_non_option: bool) -> Self {
        self.stop_at_non_option = stop_at_non_option;
        self
    }

    /// Parse `tokens` against the catalog.
    pub fn parse<'o>(
        &self,
        options: &'o Options,
        tokens: &[impl AsRef<str>],
    ) -> Result<CommandLine<'o>, ParseError> {
        self.parse_with_properties(options, tokens, std::iter::empty::<(&str, &str)>())
    }

    /// Parse `tokens` against the catalog, then apply `properties` as defaults.
    ///
    /// Each property names an option that was not matched on the command line (nor any member of its group).
    /// An option taking a value receives the property value; an option without values is matched only when the value is `yes`, `true` or `1`.
    /// Properties are applied in iteration order.
    pub fn parse_with_properties<'o, K, V>(
        &self,
        options: &'o Options,
        tokens: &[impl AsRef<str>],
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> Result<CommandLine<'o>, ParseError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut tokenizer = Tokenizer::new(options, self.stop_at_non_option);

        for token in tokens {
            tokenizer.feed(token.as_ref())?;
        }

        tokenizer.close(properties)
    }

    /// Parse the program's [`env::args`] (skipping the program name) against the catalog.
    pub fn parse_env<'o>(&self, options: &'o Options) -> Result<CommandLine<'o>, ParseError> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.parse(options, &command_input)
    }

    /// Parse the program's [`env::args`] against the catalog.
    ///
    /// If the parse fails, the error is printed and the program exits with error code `1` (via `std::process::exit`).
    pub fn parse_env_or_exit<'o>(&self, options: &'o Options) -> CommandLine<'o> {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_reporting(options, &command_input, &ConsoleInterface::default()) {
            Ok(command_line) => command_line,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }

    pub(crate) fn parse_reporting<'o>(
        &self,
        options: &'o Options,
        tokens: &[impl AsRef<str>],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<CommandLine<'o>, i32> {
        self.parse(options, tokens).map_err(|error| {
            user_interface.print_error(error);
            1
        })
    }
}
