use thiserror::Error;

use crate::api::OptionGroup;

/// A construction time failure: an option or help layout that cannot be declared.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The short name of an option is empty.
    #[error("Config error: an option name must not be empty.")]
    EmptyName,

    /// The short name of an option contains a character outside the permitted set.
    #[error("Config error: the option '{name}' contains an illegal character: '{character}'.")]
    InvalidName {
        /// The offending name.
        name: String,
        /// The first illegal character.
        character: char,
    },

    /// Neither a short nor a long name was given.
    #[error("Config error: an option requires a short or long name.")]
    Unnamed,

    /// The command line syntax passed to the help formatter is empty.
    #[error("Config error: the command line syntax must not be empty.")]
    EmptySyntax,
}

/// A required option, or required group, that was not matched during a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// An option, identified by its key.
    Option(String),
    /// A group of which exactly one member must be matched.
    Group(OptionGroup),
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Option(key) => write!(f, "{key}"),
            Requirement::Group(group) => write!(f, "{group}"),
        }
    }
}

/// A failure while parsing the command line tokens.
/// Any of these aborts the parse; no partial result is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token looks like an option but matches nothing in the catalog.
    #[error("Unrecognized option: {option}")]
    UnrecognizedOption {
        /// The literal token.
        option: String,
    },

    /// A long option prefix matches more than one declared long option.
    #[error("Ambiguous option: '{option}'  (could be: {})", quote_all(.matching))]
    AmbiguousOption {
        /// The prefix as given on the command line.
        option: String,
        /// Every long option name starting with the prefix.
        matching: Vec<String>,
    },

    /// An option that requires a value ran out of tokens.
    #[error("Missing argument for option: {option}")]
    MissingArgument {
        /// The key of the option.
        option: String,
    },

    /// Required options or groups were never matched.
    #[error("Missing required option{}: {}", plural(.missing), join(.missing))]
    MissingOptions {
        /// The unmatched requirements, in declaration order.
        missing: Vec<Requirement>,
    },

    /// Two members of a mutually exclusive group were matched.
    #[error("The option '{rejected}' was specified but an option from this group has already been selected: '{selected}'")]
    AlreadySelected {
        /// The group in which the conflict occurred.
        group: OptionGroup,
        /// The key of the member selected first.
        selected: String,
        /// The key of the member that was rejected.
        rejected: String,
    },

    /// An option received more values than its arity allows.
    #[error("Too many values provided for option '{option}' (expected={expected}).")]
    TooManyValues {
        /// The key of the option.
        option: String,
        /// The maximum number of values.
        expected: usize,
    },
}

fn quote_all(matching: &[String]) -> String {
    matching
        .iter()
        .map(|m| format!("'{m}'"))
        .collect::<Vec<String>>()
        .join(", ")
}

fn plural(missing: &[Requirement]) -> &'static str {
    if missing.len() == 1 {
        ""
    } else {
        "s"
    }
}

fn join(missing: &[Requirement]) -> String {
    missing
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
