use crate::api::CliOption;
use crate::parser::ParseError;

/// A set of mutually exclusive options: at most one member may be matched per parse.
///
/// ### Example
/// ```
/// # use clasp_core as clasp;
/// use clasp::{CliOption, OptionGroup, Options};
///
/// let mut group = OptionGroup::default();
/// group
///     .add_option(CliOption::builder("f").long_opt("fast").build().unwrap())
///     .add_option(CliOption::builder("d").long_opt("detailed").build().unwrap())
///     .set_required(true);
///
/// let mut options = Options::default();
/// options.add_option_group(group);
/// assert!(options.has_option("fast"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionGroup {
    options: Vec<CliOption>,
    required: bool,
}

impl OptionGroup {
    /// Add a member.
    pub fn add_option(&mut self, option: CliOption) -> &mut Self {
        self.options.push(option);
        self
    }

    /// The members, in the order added.
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }

    /// The member keys, in the order added.
    pub fn keys(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.key()).collect()
    }

    /// Set whether exactly one member must be matched.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Whether exactly one member must be matched.
    pub fn is_required(&self) -> bool {
        self.required
    }

    // The group subsumes the individual requirement of its members.
    pub(crate) fn clear_member_requirements(&mut self) {
        for option in self.options.iter_mut() {
            option.set_required(false);
        }
    }
}

impl std::fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members: Vec<String> = self
            .options
            .iter()
            .map(|option| {
                let name = match option.short() {
                    Some(short) => format!("-{short}"),
                    None => format!("--{}", option.key()),
                };

                match option.description() {
                    Some(description) => format!("{name} {description}"),
                    None => name,
                }
            })
            .collect();

        write!(f, "[{}]", members.join(", "))
    }
}

/// The member chosen from one group during a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct GroupSelection {
    selected: Option<String>,
}

impl GroupSelection {
    #[cfg(test)]
    pub(crate) fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub(crate) fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    /// Select `key` from `group`.
    /// Selecting the current member again is a no-op; selecting any other member is a conflict.
    pub(crate) fn select(&mut self, group: &OptionGroup, key: &str) -> Result<(), ParseError> {
        match &self.selected {
            None => {
                self.selected.replace(key.to_string());
                Ok(())
            }
            Some(selected) if selected == key => Ok(()),
            Some(selected) => Err(ParseError::AlreadySelected {
                group: group.clone(),
                selected: selected.clone(),
                rejected: key.to_string(),
            }),
        }
    }

    pub(crate) fn into_selected(self) -> Option<String> {
        self.selected
    }
}
