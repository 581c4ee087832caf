pub(crate) const DEFAULT_WIDTH: usize = 74;
pub(crate) const DEFAULT_LEFT_PAD: usize = 1;
pub(crate) const DEFAULT_DESC_PAD: usize = 3;
pub(crate) const DEFAULT_SYNTAX_PREFIX: &str = "usage: ";
pub(crate) const DEFAULT_OPT_PREFIX: &str = "-";
pub(crate) const DEFAULT_LONG_OPT_PREFIX: &str = "--";
pub(crate) const DEFAULT_LONG_OPT_SEPARATOR: &str = " ";
pub(crate) const DEFAULT_ARG_NAME: &str = "arg";
pub(crate) const DEFAULT_VALUE_SEPARATOR: char = '=';
// Property values that switch on an argument-less option.
pub(crate) const TRUTHY: [&str; 3] = ["yes", "true", "1"];
