use std::collections::HashMap;

use crate::api::{strip_leading_hyphens, CliOption, Options};
use crate::parser::ParseError;
use crate::value::{Value, ValueError};

/// One occurrence of an option on the command line, along with the values it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedOption<'o> {
    option: &'o CliOption,
    values: Vec<String>,
}

impl<'o> MatchedOption<'o> {
    pub(crate) fn new(option: &'o CliOption) -> Self {
        Self {
            option,
            values: Vec::default(),
        }
    }

    /// The declaration this occurrence matched.
    pub fn option(&self) -> &'o CliOption {
        self.option
    }

    /// The values received, in order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether `name` (leading hyphens ignored) is the short or long name of the declaration.
    pub fn is_named(&self, name: &str) -> bool {
        let name = strip_leading_hyphens(name);
        self.option.short() == Some(name) || self.option.long() == Some(name)
    }

    pub(crate) fn accepts_arg(&self) -> bool {
        self.option.accepts_arg(self.values.len())
    }

    pub(crate) fn requires_arg(&self) -> bool {
        self.option.requires_arg(self.values.len())
    }

    /// Receive `value`, split on the value separator while more than one value still fits.
    pub(crate) fn add_value(&mut self, value: &str) -> Result<(), ParseError> {
        let mut remainder = value;

        if let Some(separator) = self.option.value_separator() {
            let limit = self.option.arity().limit();

            while let Some((head, tail)) = remainder.split_once(separator) {
                if limit.map_or(false, |l| self.values.len() + 1 == l) {
                    break;
                }

                self.push(head)?;
                remainder = tail;
            }
        }

        self.push(remainder)
    }

    fn push(&mut self, value: &str) -> Result<(), ParseError> {
        if !self.accepts_arg() {
            return Err(ParseError::TooManyValues {
                option: self.option.key().to_string(),
                expected: self.option.arity().limit().unwrap_or_default(),
            });
        }

        self.values.push(value.to_string());
        Ok(())
    }
}

/// The result of parsing a command line against an [`Options`] catalog.
///
/// Options may be queried by their short or long names, with or without leading hyphens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'o> {
    catalog: &'o Options,
    options: Vec<MatchedOption<'o>>,
    args: Vec<String>,
    selections: Vec<Option<String>>,
}

impl<'o> CommandLine<'o> {
    pub(crate) fn new(catalog: &'o Options) -> Self {
        Self {
            catalog,
            options: Vec::default(),
            args: Vec::default(),
            selections: Vec::default(),
        }
    }

    pub(crate) fn add_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// Record an occurrence, returning its position.
    pub(crate) fn add_option(&mut self, option: &'o CliOption) -> usize {
        self.options.push(MatchedOption::new(option));
        self.options.len() - 1
    }

    pub(crate) fn matched_mut(&mut self, index: usize) -> &mut MatchedOption<'o> {
        &mut self.options[index]
    }

    pub(crate) fn matched(&self, index: usize) -> &MatchedOption<'o> {
        &self.options[index]
    }

    pub(crate) fn set_selections(&mut self, selections: Vec<Option<String>>) {
        self.selections = selections;
    }

    /// Whether the option named `name` was matched.
    pub fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|matched| matched.is_named(name))
    }

    /// The first value of the option named `name`.
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.matching(name)
            .into_iter()
            .flat_map(|matched| matched.values.iter())
            .next()
            .map(String::as_str)
    }

    /// The first value of the option named `name`, or `default` when there is none.
    pub fn option_value_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.option_value(name).unwrap_or(default)
    }

    /// Every value of every occurrence of the option named `name`, in order.
    /// Returns `None` if there are no values.
    pub fn option_values(&self, name: &str) -> Option<Vec<&str>> {
        let values: Vec<&str> = self
            .matching(name)
            .into_iter()
            .flat_map(|matched| matched.values.iter())
            .map(String::as_str)
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// The values of the option named `name` read as `key, value` pairs (ex: `-Dkey=value`).
    /// A key without a value maps to `"true"`.
    /// When a key repeats, the later value wins.
    pub fn option_properties(&self, name: &str) -> HashMap<String, String> {
        let mut properties = HashMap::default();

        for matched in self.matching(name) {
            for pair in matched.values.chunks(2) {
                match pair {
                    [key, value] => properties.insert(key.clone(), value.clone()),
                    [key] => properties.insert(key.clone(), "true".to_string()),
                    _ => unreachable!("internal error - chunks are never empty"),
                };
            }
        }

        properties
    }

    /// The first value of the option named `name`, converted by the option's [`ValueKind`](crate::ValueKind).
    /// Returns `Ok(None)` if the option has no value.
    ///
    /// ### Example
    /// ```
    /// # use clasp_core as clasp;
    /// use clasp::{parse_pattern, Number, Parser, Value};
    ///
    /// let options = parse_pattern("n%").unwrap();
    /// let command_line = Parser::new().parse(&options, &["-n", "2.5"]).unwrap();
    ///
    /// assert_eq!(
    ///     command_line.parsed_option_value("n"),
    ///     Ok(Some(Value::Number(Number::Float(2.5))))
    /// );
    /// ```
    pub fn parsed_option_value(&self, name: &str) -> Result<Option<Value>, ValueError> {
        match self.matching(name).first() {
            Some(matched) => match self.option_value(name) {
                Some(value) => matched.option.value_kind().create(value).map(Some),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    /// The key of the option selected in the group containing the option named `name`.
    pub fn group_selection(&self, name: &str) -> Option<&str> {
        self.catalog
            .group_index(name)
            .and_then(|index| self.selections.get(index))
            .and_then(|selected| selected.as_deref())
    }

    /// The leftover arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Take the leftover arguments.
    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// Every option occurrence, in the order encountered.
    pub fn options(&self) -> &[MatchedOption<'o>] {
        &self.options
    }

    fn matching(&self, name: &str) -> Vec<&MatchedOption<'o>> {
        self.options
            .iter()
            .filter(|matched| matched.is_named(name))
            .collect()
    }
}
