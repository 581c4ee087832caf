use crate::constant::DEFAULT_VALUE_SEPARATOR;
use crate::model::Arity;
use crate::parser::ConfigError;
use crate::value::ValueKind;

/// A declared command line option.
///
/// Declarations are immutable once built.
/// Values received during a parse are kept on the parse result, never on the declaration.
///
/// ### Example
/// ```
/// # use clasp_core as clasp;
/// use clasp::CliOption;
///
/// let option = CliOption::builder("f")
///     .long_opt("file")
///     .has_arg()
///     .desc("The input file.")
///     .build()
///     .unwrap();
///
/// assert_eq!(option.key(), "f");
/// assert!(option.has_arg());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOption {
    short: Option<String>,
    long: Option<String>,
    arg_name: Option<String>,
    description: Option<String>,
    required: bool,
    optional_arg: bool,
    arity: Arity,
    value_separator: Option<char>,
    value_kind: ValueKind,
}

impl CliOption {
    /// Start building an option with the short name `short`.
    pub fn builder(short: impl Into<String>) -> OptionBuilder {
        OptionBuilder {
            short: Some(short.into()),
            ..OptionBuilder::default()
        }
    }

    /// Start building an option which only has the long name `long`.
    pub fn long_only(long: impl Into<String>) -> OptionBuilder {
        OptionBuilder {
            long: Some(long.into()),
            ..OptionBuilder::default()
        }
    }

    /// The canonical identifier: the short name if present, otherwise the long name.
    pub fn key(&self) -> &str {
        match (&self.short, &self.long) {
            (Some(short), _) => short,
            (None, Some(long)) => long,
            (None, None) => unreachable!("internal error - an option is always named"),
        }
    }

    /// The short name, as in `-f`.
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// The long name, as in `--file`.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Whether a long name is declared.
    pub fn has_long(&self) -> bool {
        self.long.is_some()
    }

    /// The display name of the option's value in help output.
    pub fn arg_name(&self) -> Option<&str> {
        self.arg_name.as_deref()
    }

    /// The description shown in help output.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the option must appear on every command line.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the option's values may be omitted.
    pub fn has_optional_arg(&self) -> bool {
        self.optional_arg
    }

    /// The number of values the option accepts.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Whether at least one value may be given.
    pub fn has_arg(&self) -> bool {
        self.arity.has_arg()
    }

    /// Whether more than one value may be given.
    pub fn has_args(&self) -> bool {
        self.arity.has_args()
    }

    /// The character splitting a single token into multiple values.
    pub fn value_separator(&self) -> Option<char> {
        self.value_separator
    }

    /// The kind used to interpret the option's value.
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    pub(crate) fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Whether one more value fits, given `held` values already received.
    pub(crate) fn accepts_arg(&self, held: usize) -> bool {
        (self.arity.has_arg() || self.optional_arg)
            && self.arity.limit().map_or(true, |limit| held < limit)
    }

    /// Whether a value is still mandatory, given `held` values already received.
    pub(crate) fn requires_arg(&self, held: usize) -> bool {
        if self.optional_arg {
            return false;
        }

        match self.arity {
            Arity::Unlimited => held == 0,
            _ => self.accepts_arg(held),
        }
    }

    /// Whether a single leading character of a token may carry `key=value` pairs (ex: `-Dkey=value`).
    pub(crate) fn is_property_style(&self) -> bool {
        match self.arity {
            Arity::Exactly(n) => n >= 2,
            Arity::Unlimited => true,
            Arity::None => false,
        }
    }
}

/// Builds a [`CliOption`].
///
/// Each builder is a fresh value; nothing is shared between two option constructions.
#[derive(Debug, Clone, Default)]
pub struct OptionBuilder {
    short: Option<String>,
    long: Option<String>,
    arg_name: Option<String>,
    description: Option<String>,
    required: bool,
    optional_arg: bool,
    arity: Arity,
    value_separator: Option<char>,
    value_kind: ValueKind,
}

impl OptionBuilder {
    /// Set the long name.
    pub fn long_opt(mut self, long: impl Into<String>) -> Self {
        self.long.replace(long.into());
        self
    }

    /// Set the description.
    pub fn desc(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Set the display name of the value.
    pub fn arg_name(mut self, arg_name: impl Into<String>) -> Self {
        self.arg_name.replace(arg_name.into());
        self
    }

    /// Mark the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept precisely one value.
    pub fn has_arg(mut self) -> Self {
        self.arity = Arity::Exactly(1);
        self
    }

    /// Accept any number of values.
    pub fn has_args(mut self) -> Self {
        self.arity = Arity::Unlimited;
        self
    }

    /// Accept up to `n` values.
    pub fn number_of_args(mut self, n: usize) -> Self {
        self.arity = Arity::Exactly(n);
        self
    }

    /// Set the arity directly.
    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Allow the values to be omitted.
    /// An option without an arity becomes a single optional value.
    pub fn optional_arg(mut self) -> Self {
        self.optional_arg = true;

        if self.arity == Arity::None {
            self.arity = Arity::Exactly(1);
        }

        self
    }

    /// Split each value token at `separator` (ex: `key=value` yields `key` and `value`).
    pub fn value_separator(mut self, separator: char) -> Self {
        self.value_separator.replace(separator);
        self
    }

    /// Split each value token at `=`.
    pub fn default_value_separator(self) -> Self {
        self.value_separator(DEFAULT_VALUE_SEPARATOR)
    }

    /// Set the kind used to interpret the option's value.
    pub fn value_kind(mut self, value_kind: ValueKind) -> Self {
        self.value_kind = value_kind;
        self
    }

    /// Validate the names and produce the option.
    pub fn build(self) -> Result<CliOption, ConfigError> {
        match &self.short {
            Some(short) => validate_name(short)?,
            None => {
                if self.long.is_none() {
                    return Err(ConfigError::Unnamed);
                }
            }
        };

        let OptionBuilder {
            short,
            long,
            arg_name,
            description,
            required,
            optional_arg,
            arity,
            value_separator,
            value_kind,
        } = self;

        Ok(CliOption {
            short,
            long,
            arg_name,
            description,
            required,
            optional_arg,
            arity,
            value_separator,
            value_kind,
        })
    }
}

/// Short names consist of alphanumerics, `_` or `$`.
/// A single character name may also be `?` or `@`.
fn validate_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();

    match (chars.next(), chars.next()) {
        (None, _) => Err(ConfigError::EmptyName),
        (Some(single), None) => {
            if is_name_character(single) || single == '?' || single == '@' {
                Ok(())
            } else {
                Err(ConfigError::InvalidName {
                    name: name.to_string(),
                    character: single,
                })
            }
        }
        _ => match name.chars().find(|c| !is_name_character(*c)) {
            Some(character) => Err(ConfigError::InvalidName {
                name: name.to_string(),
                character,
            }),
            None => Ok(()),
        },
    }
}

fn is_name_character(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
