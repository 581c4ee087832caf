use std::collections::HashMap;

use crate::api::{CliOption, OptionGroup};
use crate::parser::{ConfigError, Requirement};

/// A pending requirement of a parse: an option key or a group index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expected {
    Option(String),
    Group(usize),
}

/// The catalog of declared options.
///
/// Declarations are looked up by key (the short name, or the long name for long-only options) and by long name.
/// Re-declaring a key replaces the previous declaration.
///
/// ### Example
/// ```
/// # use clasp_core as clasp;
/// use clasp::Options;
///
/// let mut options = Options::default();
/// options
///     .add("a", Some("all"), false, "Show all entries.")
///     .unwrap()
///     .add("b", Some("block-size"), true, "Use SIZE-byte blocks.")
///     .unwrap();
///
/// assert!(options.has_short_option("a"));
/// assert!(options.has_long_option("--block-size"));
/// assert_eq!(options.matching_options("bl"), vec!["block-size"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    declarations: Vec<CliOption>,
    keys: HashMap<String, usize>,
    longs: HashMap<String, usize>,
    required: Vec<Expected>,
    groups: Vec<OptionGroup>,
    group_members: HashMap<String, usize>,
}

impl Options {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare and add an option with an optional long name, taking either no value or precisely one.
    pub fn add(
        &mut self,
        short: impl Into<String>,
        long: Option<&str>,
        has_arg: bool,
        description: impl Into<String>,
    ) -> Result<&mut Self, ConfigError> {
        let mut builder = CliOption::builder(short).desc(description);

        if let Some(long) = long {
            builder = builder.long_opt(long);
        }

        if has_arg {
            builder = builder.has_arg();
        }

        Ok(self.add_option(builder.build()?))
    }

    /// Add a declared option, replacing any previous declaration with the same key.
    pub fn add_option(&mut self, option: CliOption) -> &mut Self {
        let key = option.key().to_string();
        let required = option.is_required();
        let index = match self.keys.get(&key) {
            Some(&index) => {
                self.longs.retain(|_, i| *i != index);
                self.declarations[index] = option;
                index
            }
            None => {
                self.declarations.push(option);
                self.declarations.len() - 1
            }
        };

        if let Some(long) = self.declarations[index].long() {
            self.longs.insert(long.to_string(), index);
        }

        let expected = Expected::Option(key.clone());
        self.required.retain(|r| r != &expected);

        if required {
            self.required.push(expected);
        }

        self.keys.insert(key, index);
        self
    }

    /// Add a group of mutually exclusive options.
    /// Member options lose their individual requirement; the group's requirement applies instead.
    pub fn add_option_group(&mut self, mut group: OptionGroup) -> &mut Self {
        let index = self.groups.len();

        if group.is_required() {
            self.required.push(Expected::Group(index));
        }

        group.clear_member_requirements();

        for option in group.options() {
            self.group_members.insert(option.key().to_string(), index);
            self.add_option(option.clone());
        }

        self.groups.push(group);
        self
    }

    /// Every declaration, in the order first declared.
    pub fn options(&self) -> &[CliOption] {
        &self.declarations
    }

    /// Every group, in the order added.
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// The pending requirements of a parse, in declaration order.
    pub fn required_options(&self) -> Vec<Requirement> {
        self.required
            .iter()
            .map(|expected| self.requirement(expected))
            .collect()
    }

    /// Find the declaration for `name`: by key first, then by long name.
    /// Leading hyphens are ignored.
    pub fn option(&self, name: &str) -> Option<&CliOption> {
        let name = strip_leading_hyphens(name);
        self.keys
            .get(name)
            .or_else(|| self.longs.get(name))
            .map(|index| &self.declarations[*index])
    }

    /// The long names starting with `prefix` (leading hyphens ignored), in declaration order.
    /// An exact long name match is returned alone.
    /// An empty prefix matches nothing.
    pub fn matching_options(&self, prefix: &str) -> Vec<String> {
        let prefix = strip_leading_hyphens(prefix);

        if prefix.is_empty() {
            return Vec::default();
        }

        if self.longs.contains_key(prefix) {
            return vec![prefix.to_string()];
        }

        self.declarations
            .iter()
            .enumerate()
            .filter_map(|(index, option)| match option.long() {
                Some(long) if long.starts_with(prefix) && self.longs.get(long) == Some(&index) => {
                    Some(long.to_string())
                }
                _ => None,
            })
            .collect()
    }

    /// Whether `name` is a key or a long name.
    pub fn has_option(&self, name: &str) -> bool {
        let name = strip_leading_hyphens(name);
        self.keys.contains_key(name) || self.longs.contains_key(name)
    }

    /// Whether `name` is a long name.
    pub fn has_long_option(&self, name: &str) -> bool {
        self.longs.contains_key(strip_leading_hyphens(name))
    }

    /// Whether `name` is a key.
    /// A long-only option is keyed by its long name, so it is found here too.
    pub fn has_short_option(&self, name: &str) -> bool {
        self.keys.contains_key(strip_leading_hyphens(name))
    }

    /// The group containing the option named `name`, if any.
    pub fn group_of(&self, name: &str) -> Option<&OptionGroup> {
        self.group_index(name).map(|index| &self.groups[index])
    }

    pub(crate) fn group_index(&self, name: &str) -> Option<usize> {
        let key = self.option(name)?.key();
        self.group_members.get(key).copied()
    }

    pub(crate) fn expected(&self) -> Vec<Expected> {
        self.required.clone()
    }

    pub(crate) fn requirement(&self, expected: &Expected) -> Requirement {
        match expected {
            Expected::Option(key) => Requirement::Option(key.clone()),
            Expected::Group(index) => Requirement::Group(self.groups[*index].clone()),
        }
    }
}

/// Remove up to two leading hyphens.
pub(crate) fn strip_leading_hyphens(name: &str) -> &str {
    name.strip_prefix("--")
        .or_else(|| name.strip_prefix('-'))
        .unwrap_or(name)
}
