//! A lazy, reversible iteration protocol.
//!
//! Values take part in iteration through three protocols:
//!
//! * [Protocol::INTO_ITER], which produces a fresh iterator from an iterable
//!   value.
//! * [Protocol::INTO_REV_ITER], which produces an iterator walking in the
//!   opposite direction.
//! * [Protocol::NEXT], which advances an iterator once and produces a
//!   [Step].
//!
//! Collections and the iterators in the [sequence] module implement these
//! natively. Any [Object] can implement them by installing [Function]s
//! under the corresponding protocol.
//!
//! Reversal is consulted through [reverse], which fails with
//! [VmErrorKind::NotReversible] if the value doesn't advertise the
//! capability. Sequence iterators can only be reversed before they've been
//! advanced. Iterators wrapped through [map] stay reversible if the iterator
//! they wrap was, and reverse by reversing what they wrap.
//!
//! ```rust
//! use reviter::{sequence, Function, Value};
//!
//! # fn main() -> reviter::Result<()> {
//! let vec = Value::vec(vec![Value::from("A"), Value::from("B"), Value::from("C")]);
//!
//! let twice = Function::unary("twice", |value| {
//!     let value = value.into_string()?;
//!     let value = value.borrow_ref()?;
//!     Ok(Value::string(format!("{0}{0}", *value)))
//! });
//!
//! let iter = reviter::map(&sequence::values_rev(&vec)?, twice, Value::Unit)?;
//! let iter = reviter::reverse(&reviter::reverse(&iter)?)?;
//!
//! let out = reviter::iter(&iter)?
//!     .map(|value| reviter::FromValue::from_value(value?))
//!     .collect::<Result<Vec<String>, _>>()?;
//!
//! assert_eq!(out, vec!["CC", "BB", "AA"]);
//! # Ok(()) }
//! ```

#![deny(missing_docs)]

pub mod budget;
mod from_value;
mod function;
mod iterator;
mod map;
mod object;
mod ops;
mod protocol;
pub mod sequence;
mod serde;
mod shared;
mod step;
mod tuple;
mod type_info;
mod value;
mod vm_error;

/// Exported result type for convenience.
pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;

/// Exported boxed error type for convenience.
pub type Error = anyhow::Error;

pub use self::from_value::FromValue;
pub use self::sequence::ItemKind;
pub use self::tuple::Tuple;
pub use self::type_info::TypeInfo;
pub use crate::function::Function;
pub use crate::iterator::{Iterator, IteratorTrait};
pub use crate::object::Object;
pub use crate::ops::{advance, advance_with, iter, iterate, map, reverse, Iter};
pub use crate::protocol::{Capability, Protocol};
pub use crate::shared::{AccessError, BorrowMut, BorrowRef, Shared};
pub use crate::step::Step;
pub use crate::value::Value;
pub use crate::vm_error::{ProtocolViolation, VmError, VmErrorKind};

mod collections {
    pub use hashbrown::{hash_map, HashMap};
}
