use std::fmt;

/// Diagnostical type information for a given value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeInfo {
    /// A built in type.
    Builtin(&'static str),
    /// An iterator, identified by its name.
    Iterator(&'static str),
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(name) => write!(f, "{}", name),
            Self::Iterator(name) => write!(f, "Iterator({})", name),
        }
    }
}
