use crate::{Function, TypeInfo};
use std::fmt;

/// A protocol a value can implement.
///
/// Protocols are the capability tags of the iteration protocol. A value
/// either implements a protocol natively, through a function installed on
/// an [Object][crate::Object], or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Protocol {
    /// The name of the protocol.
    pub name: &'static str,
}

impl Protocol {
    /// Function used to convert an argument into an iterator.
    pub const INTO_ITER: Protocol = Protocol { name: "into_iter" };

    /// Function used to convert an argument into an iterator that walks in
    /// the opposite direction of [Protocol::INTO_ITER].
    ///
    /// A value should only implement this protocol if it also implements
    /// [Protocol::INTO_ITER].
    pub const INTO_REV_ITER: Protocol = Protocol {
        name: "into_rev_iter",
    };

    /// The function to call to continue iteration.
    pub const NEXT: Protocol = Protocol { name: "next" };
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The result of looking up a [Protocol] on a value.
#[derive(Debug, Clone)]
pub enum Capability {
    /// The value does not implement the protocol.
    Absent,
    /// A member is declared for the protocol, but it is not callable.
    NotCallable(TypeInfo),
    /// The protocol is implemented natively by the value.
    Native,
    /// The protocol is implemented by the given function, which is called
    /// with the value as its receiver.
    Function(Function),
}

impl Capability {
    /// Test if the capability is absent.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}
