mod group;
mod option;
mod options;
mod pattern;

pub(crate) use group::GroupSelection;
pub use group::OptionGroup;
pub use option::*;
pub(crate) use options::{strip_leading_hyphens, Expected};
pub use options::Options;
pub use pattern::*;
