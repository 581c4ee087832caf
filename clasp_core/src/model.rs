/// The number of values an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    /// The option is a flag; it never receives a value.
    #[default]
    None,
    /// At most `N` values.
    Exactly(usize),
    /// Any number of values.
    Unlimited,
}

impl Arity {
    /// Whether at least one value may be given.
    pub fn has_arg(&self) -> bool {
        match self {
            Arity::None => false,
            Arity::Exactly(n) => *n > 0,
            Arity::Unlimited => true,
        }
    }

    /// Whether more than one value may be given.
    pub fn has_args(&self) -> bool {
        match self {
            Arity::None => false,
            Arity::Exactly(n) => *n > 1,
            Arity::Unlimited => true,
        }
    }

    /// The finite upper bound, if any.
    /// `Arity::Exactly(0)` is treated as unbounded, the same as the flag and unlimited cases.
    pub(crate) fn limit(&self) -> Option<usize> {
        match self {
            Arity::Exactly(n) if *n > 0 => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
