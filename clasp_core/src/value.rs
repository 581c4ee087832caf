use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::constant::TRUTHY;

/// The kind used to interpret an option's textual value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueKind {
    /// The text as-is.
    #[default]
    String,
    /// An instance created from a type name (unsupported).
    Object,
    /// An integer, or a float when the text contains `.`.
    Number,
    /// A date (unsupported).
    Date,
    /// A type path such as `std::fs::File` or `java.util.Calendar`.
    Class,
    /// A path to a file which must exist.
    ExistingFile,
    /// A path to a file.
    File,
    /// Multiple files (unsupported).
    Files,
    /// An absolute URL.
    Url,
    /// A boolean, using the property truthiness rule.
    Flag,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// See [`ValueKind::String`].
    String(String),
    /// See [`ValueKind::Number`].
    Number(Number),
    /// See [`ValueKind::Class`].
    Class(String),
    /// See [`ValueKind::ExistingFile`].
    ExistingFile(PathBuf),
    /// See [`ValueKind::File`].
    File(PathBuf),
    /// See [`ValueKind::Url`].
    Url(Url),
    /// See [`ValueKind::Flag`].
    Flag(bool),
}

/// A parsed number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A whole number.
    Integer(i64),
    /// A number written with a decimal point.
    Float(f64),
}

/// Error for converting text into a [`Value`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The text is not a number.
    #[error("Value error: '{0}' is not a number.")]
    InvalidNumber(String),
    /// The text is not a type path.
    #[error("Value error: '{0}' is not a valid class name.")]
    InvalidClass(String),
    /// The text is not an absolute URL.
    #[error("Value error: '{value}' is not a valid url: {reason}.")]
    InvalidUrl {
        /// The rejected text.
        value: String,
        /// Why the url was rejected.
        reason: String,
    },
    /// The path does not point to an existing file.
    #[error("Value error: file '{0}' does not exist.")]
    FileNotFound(String),
    /// The text is neither truthy nor falsy.
    #[error("Value error: '{0}' is not a flag.")]
    InvalidFlag(String),
    /// The kind cannot be produced from text.
    #[error("Value error: kind '{0}' is not supported.")]
    UnsupportedValueKind(ValueKind),
}

const FALSY: [&str; 3] = ["no", "false", "0"];

impl ValueKind {
    /// Convert `text` into a value of this kind.
    ///
    /// ### Example
    /// ```
    /// # use clasp_core as clasp;
    /// use clasp::{Number, Value, ValueKind};
    ///
    /// assert_eq!(ValueKind::Number.create("1.5"), Ok(Value::Number(Number::Float(1.5))));
    /// assert_eq!(ValueKind::Flag.create("Yes"), Ok(Value::Flag(true)));
    /// assert!(ValueKind::Date.create("2001-01-01").is_err());
    /// ```
    pub fn create(&self, text: &str) -> Result<Value, ValueError> {
        match self {
            ValueKind::String => Ok(Value::String(text.to_string())),
            ValueKind::Number => create_number(text).map(Value::Number),
            ValueKind::Class => {
                if is_type_path(text) {
                    Ok(Value::Class(text.to_string()))
                } else {
                    Err(ValueError::InvalidClass(text.to_string()))
                }
            }
            ValueKind::ExistingFile => {
                let path = PathBuf::from(text);
                match path.metadata() {
                    Ok(metadata) if metadata.is_file() => Ok(Value::ExistingFile(path)),
                    _ => Err(ValueError::FileNotFound(text.to_string())),
                }
            }
            ValueKind::File => Ok(Value::File(PathBuf::from(text))),
            ValueKind::Url => Url::parse(text)
                .map(Value::Url)
                .map_err(|error| ValueError::InvalidUrl {
                    value: text.to_string(),
                    reason: error.to_string(),
                }),
            ValueKind::Flag => {
                if is_truthy(text) {
                    Ok(Value::Flag(true))
                } else if FALSY.iter().any(|f| f.eq_ignore_ascii_case(text)) {
                    Ok(Value::Flag(false))
                } else {
                    Err(ValueError::InvalidFlag(text.to_string()))
                }
            }
            ValueKind::Object | ValueKind::Date | ValueKind::Files => {
                Err(ValueError::UnsupportedValueKind(*self))
            }
        }
    }

    /// The kind denoted by a pattern code character.
    pub(crate) fn from_pattern_code(code: char) -> Option<ValueKind> {
        match code {
            '@' => Some(ValueKind::Object),
            ':' => Some(ValueKind::String),
            '%' => Some(ValueKind::Number),
            '+' => Some(ValueKind::Class),
            '#' => Some(ValueKind::Date),
            '<' => Some(ValueKind::ExistingFile),
            '>' => Some(ValueKind::File),
            '*' => Some(ValueKind::Files),
            '/' => Some(ValueKind::Url),
            _ => None,
        }
    }
}

/// Whether `text` is one of `yes`, `true` or `1`, ignoring case.
pub(crate) fn is_truthy(text: &str) -> bool {
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(text))
}

fn create_number(text: &str) -> Result<Number, ValueError> {
    if text.contains('.') {
        text.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| ValueError::InvalidNumber(text.to_string()))
    } else {
        text.parse::<i64>()
            .map(Number::Integer)
            .map_err(|_| ValueError::InvalidNumber(text.to_string()))
    }
}

fn is_type_path(text: &str) -> bool {
    let separator = if text.contains("::") { "::" } else { "." };
    text.split(separator).all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
