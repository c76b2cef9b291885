//! The generic operations of the iteration protocol.
//!
//! Every operation consults the capabilities of the value it's given through
//! [Value::capability], so natively implemented iterators and iterators
//! implemented through functions installed on an [Object][crate::Object] are
//! treated the same.

use crate::map::Map;
use crate::{
    budget, sequence, Capability, Function, Iterator, Protocol, ProtocolViolation, Step, Value,
    VmError, VmErrorKind,
};

/// Obtain a fresh iterator from an iterable value through
/// [Protocol::INTO_ITER].
///
/// An iterator is its own iterable, so calling this on an iterator returns
/// the same iterator.
pub fn iterate(value: &Value) -> Result<Value, VmError> {
    coerce(value, Protocol::INTO_ITER)?;

    match value.capability(Protocol::INTO_ITER)? {
        Capability::Absent => Err(VmError::invalid_protocol_use(
            Protocol::INTO_ITER,
            ProtocolViolation::Missing(value.type_info()?),
        )),
        capability => call_iterator_protocol(value, Protocol::INTO_ITER, capability),
    }
}

/// Obtain an iterator walking in the opposite direction through
/// [Protocol::INTO_REV_ITER].
///
/// Reversing a collection always produces a fresh iterator starting from its
/// last element. Reversing a live iterator is only permitted as long as the
/// iterator hasn't been advanced.
///
/// # Examples
///
/// ```rust
/// use reviter::{sequence, Value};
///
/// # fn main() -> reviter::Result<()> {
/// let vec = Value::vec(vec![Value::from(1), Value::from(2)]);
///
/// let iter = reviter::reverse(&sequence::values(&vec)?)?;
/// assert_eq!(reviter::advance(&iter)?.into_value().unwrap().into_integer()?, 2);
///
/// // Once advanced, an iterator can no longer be reversed.
/// assert!(reviter::reverse(&iter).is_err());
///
/// // Values which don't advertise the capability can't be reversed at all.
/// assert!(reviter::reverse(&Value::from(5)).is_err());
/// # Ok(()) }
/// ```
pub fn reverse(value: &Value) -> Result<Value, VmError> {
    coerce(value, Protocol::INTO_REV_ITER)?;

    match value.capability(Protocol::INTO_REV_ITER)? {
        Capability::Absent => Err(VmError::from(VmErrorKind::NotReversible {
            actual: value.type_info()?,
        })),
        capability => call_iterator_protocol(value, Protocol::INTO_REV_ITER, capability),
    }
}

/// Advance an iterator once through [Protocol::NEXT].
pub fn advance(iter: &Value) -> Result<Step, VmError> {
    advance_with(iter, Value::Unit)
}

/// Advance an iterator once through [Protocol::NEXT], passing along a resume
/// value.
///
/// Native iterators ignore the resume value, except mapping iterators which
/// forward it to the iterator they wrap. Every advance consumes one unit of
/// the current [budget].
pub fn advance_with(iter: &Value, resume: Value) -> Result<Step, VmError> {
    coerce(iter, Protocol::NEXT)?;

    if !budget::take() {
        return Err(VmError::from(VmErrorKind::BudgetExhausted));
    }

    match iter.capability(Protocol::NEXT)? {
        Capability::Absent => Err(VmError::invalid_protocol_use(
            Protocol::NEXT,
            ProtocolViolation::Missing(iter.type_info()?),
        )),
        Capability::NotCallable(actual) => Err(VmError::invalid_protocol_use(
            Protocol::NEXT,
            ProtocolViolation::NotCallable(actual),
        )),
        Capability::Native => {
            let iter = iter.clone().into_iterator()?;
            let mut iter = iter.borrow_mut()?;
            iter.next(resume)
        }
        Capability::Function(next) => match next.call(iter, &[resume])? {
            Value::Option(option) => Ok(Step::from(option.borrow_ref()?.clone())),
            actual => Err(VmError::invalid_protocol_use(
                Protocol::NEXT,
                ProtocolViolation::BadReturn(actual.type_info()?),
            )),
        },
    }
}

/// Wrap an iterator so that every value it produces is passed through
/// `map`, which is called with `context` as its receiver.
///
/// The produced iterator is reversible if and only if `iter` advertises
/// [Protocol::INTO_REV_ITER] at the time this is called.
///
/// # Examples
///
/// ```rust
/// use reviter::{sequence, Function, Value};
///
/// # fn main() -> reviter::Result<()> {
/// let vec = Value::vec(vec![Value::from(1), Value::from(2)]);
/// let double = Function::unary("double", |v| Ok(Value::from(v.into_integer()? * 2)));
///
/// let iter = reviter::map(&sequence::values(&vec)?, double, Value::Unit)?;
/// let iter = reviter::reverse(&iter)?;
///
/// assert_eq!(reviter::advance(&iter)?.into_value().unwrap().into_integer()?, 4);
/// assert_eq!(reviter::advance(&iter)?.into_value().unwrap().into_integer()?, 2);
/// assert!(reviter::advance(&iter)?.is_done());
/// # Ok(()) }
/// ```
pub fn map(iter: &Value, map: Function, context: Value) -> Result<Value, VmError> {
    coerce(iter, Protocol::NEXT)?;
    let map = Map::new(iter.clone(), map, context)?;
    Ok(Value::from(Iterator::from_repr(map.into())))
}

/// Drive an iterator as a standard library iterator.
///
/// The adapter stops after the first error or the first [Step::Done].
pub fn iter(iter: &Value) -> Result<Iter, VmError> {
    coerce(iter, Protocol::NEXT)?;

    Ok(Iter {
        iter: Some(iter.clone()),
    })
}

/// A standard library iterator driving an iteration protocol iterator.
///
/// See [iter].
#[derive(Debug)]
pub struct Iter {
    iter: Option<Value>,
}

impl std::iter::Iterator for Iter {
    type Item = Result<Value, VmError>;

    fn next(&mut self) -> Option<Self::Item> {
        let iter = self.iter.as_ref()?;

        match advance(iter) {
            Ok(Step::Yielded(value)) => Some(Ok(value)),
            Ok(Step::Done) => {
                self.iter = None;
                None
            }
            Err(error) => {
                self.iter = None;
                Some(Err(error))
            }
        }
    }
}

/// Coerce the receiver of a protocol into its object-like form.
///
/// Only the unit value can't be coerced. Other primitives coerce, but never
/// implement any protocols.
fn coerce(value: &Value, protocol: Protocol) -> Result<(), VmError> {
    if let Value::Unit = value {
        return Err(VmError::invalid_protocol_use(
            protocol,
            ProtocolViolation::NotObjectLike(value.type_info()?),
        ));
    }

    Ok(())
}

/// Call a protocol which produces an iterator.
fn call_iterator_protocol(
    value: &Value,
    protocol: Protocol,
    capability: Capability,
) -> Result<Value, VmError> {
    let iter = match capability {
        Capability::Absent => {
            return Err(VmError::invalid_protocol_use(
                protocol,
                ProtocolViolation::Missing(value.type_info()?),
            ))
        }
        Capability::NotCallable(actual) => {
            return Err(VmError::invalid_protocol_use(
                protocol,
                ProtocolViolation::NotCallable(actual),
            ))
        }
        Capability::Native => native_iterator(value, protocol)?,
        Capability::Function(function) => function.call(value, &[])?,
    };

    if !iter.is_object_like() {
        return Err(VmError::invalid_protocol_use(
            protocol,
            ProtocolViolation::BadReturn(iter.type_info()?),
        ));
    }

    Ok(iter)
}

fn native_iterator(value: &Value, protocol: Protocol) -> Result<Value, VmError> {
    match (value, protocol) {
        (Value::Iterator(..), Protocol::INTO_ITER) => Ok(value.clone()),
        (Value::Iterator(iter), Protocol::INTO_REV_ITER) => {
            let iter = iter.borrow_ref()?.rev()?;
            Ok(Value::from(iter))
        }
        (_, Protocol::INTO_ITER) => sequence::values(value),
        (_, Protocol::INTO_REV_ITER) => sequence::values_rev(value),
        _ => Err(VmError::panic(format!(
            "`{}` has no native implementation of `{}`",
            value.type_info()?,
            protocol
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{advance, iterate, reverse};
    use crate::{Function, Object, Protocol, ProtocolViolation, Value, VmErrorKind};

    #[test]
    fn test_unit_is_not_object_like() {
        let error = reverse(&Value::Unit).unwrap_err();

        assert!(matches!(
            error.kind(),
            VmErrorKind::InvalidProtocolUse {
                violation: ProtocolViolation::NotObjectLike(..),
                ..
            }
        ));
    }

    #[test]
    fn test_primitives_are_not_reversible() {
        let error = reverse(&Value::from(5)).unwrap_err();
        assert!(matches!(error.kind(), VmErrorKind::NotReversible { .. }));

        let error = iterate(&Value::from(true)).unwrap_err();

        assert!(matches!(
            error.kind(),
            VmErrorKind::InvalidProtocolUse {
                violation: ProtocolViolation::Missing(..),
                ..
            }
        ));
    }

    #[test]
    fn test_not_callable_member() {
        let mut object = Object::new();
        object.insert_protocol(Protocol::INTO_REV_ITER, Value::from(42));
        let error = reverse(&Value::object(object)).unwrap_err();

        assert!(matches!(
            error.kind(),
            VmErrorKind::InvalidProtocolUse {
                violation: ProtocolViolation::NotCallable(..),
                ..
            }
        ));
    }

    #[test]
    fn test_bad_return() {
        let mut object = Object::new();

        object.insert_protocol(
            Protocol::INTO_ITER,
            Value::from(Function::new("into_iter", |_, _| Ok(Value::from(1)))),
        );

        object.insert_protocol(
            Protocol::NEXT,
            Value::from(Function::new("next", |_, _| Ok(Value::from(1)))),
        );

        let object = Value::object(object);

        for error in vec![iterate(&object).unwrap_err(), advance(&object).unwrap_err()] {
            assert!(matches!(
                error.kind(),
                VmErrorKind::InvalidProtocolUse {
                    violation: ProtocolViolation::BadReturn(..),
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_iterate_is_fresh() {
        let vec = Value::vec(vec![Value::from(1), Value::from(2)]);
        let a = iterate(&vec).unwrap();
        let b = iterate(&vec).unwrap();

        advance(&a).unwrap();
        let value = advance(&b).unwrap().into_value().unwrap();
        assert_eq!(value.into_integer().unwrap(), 1);
    }
}
