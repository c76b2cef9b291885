//! Iterators over sequences.
//!
//! A sequence is an ordered collection readable by position: a `Vec`, a
//! `Tuple`, or an array-like `Object` which has a `length` field and fields
//! named after each position (`"0"`, `"1"`, ...).
//!
//! Sequence iterators don't own or copy the sequence they walk. The length
//! is read again on every step, so a sequence which grows or shrinks between
//! steps extends or cuts short the iteration.

use crate::{Iterator, Step, Value, VmError, VmErrorKind};
use std::convert::TryFrom as _;

/// What a sequence iterator produces for each position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Produce the position.
    Key,
    /// Produce the element at the position.
    Value,
    /// Produce a `(position, element)` tuple.
    KeyValue,
}

/// Construct an iterator over the positions of a sequence.
pub fn keys(sequence: &Value) -> Result<Value, VmError> {
    forward(sequence, ItemKind::Key)
}

/// Construct an iterator over the elements of a sequence.
///
/// # Examples
///
/// ```rust
/// use reviter::{sequence, FromValue as _, Value};
///
/// # fn main() -> reviter::Result<()> {
/// let vec = Value::vec(vec![Value::from("A"), Value::from("B")]);
/// let values = sequence::values(&vec)?;
///
/// let out = reviter::iter(&values)?
///     .map(|value| String::from_value(value?))
///     .collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(out, vec!["A", "B"]);
/// # Ok(()) }
/// ```
pub fn values(sequence: &Value) -> Result<Value, VmError> {
    forward(sequence, ItemKind::Value)
}

/// Construct an iterator over the `(position, element)` pairs of a
/// sequence.
pub fn entries(sequence: &Value) -> Result<Value, VmError> {
    forward(sequence, ItemKind::KeyValue)
}

/// Construct an iterator over the positions of a sequence, starting from the
/// last one.
pub fn keys_rev(sequence: &Value) -> Result<Value, VmError> {
    backward(sequence, ItemKind::Key)
}

/// Construct an iterator over the elements of a sequence, starting from the
/// last one.
pub fn values_rev(sequence: &Value) -> Result<Value, VmError> {
    backward(sequence, ItemKind::Value)
}

/// Construct an iterator over the `(position, element)` pairs of a
/// sequence, starting from the last one.
pub fn entries_rev(sequence: &Value) -> Result<Value, VmError> {
    backward(sequence, ItemKind::KeyValue)
}

fn forward(sequence: &Value, kind: ItemKind) -> Result<Value, VmError> {
    check_sequence(sequence)?;
    let iter = SequenceIter::new(sequence.clone(), kind);
    Ok(Value::from(Iterator::from_repr(iter.into())))
}

fn backward(sequence: &Value, kind: ItemKind) -> Result<Value, VmError> {
    check_sequence(sequence)?;
    let iter = SequenceRevIter::new(sequence.clone(), kind)?;
    Ok(Value::from(Iterator::from_repr(iter.into())))
}

fn check_sequence(sequence: &Value) -> Result<(), VmError> {
    match sequence {
        Value::Vec(..) | Value::Tuple(..) | Value::Object(..) => Ok(()),
        actual => Err(VmError::expected("sequence", actual.type_info()?)),
    }
}

/// Read the current length of a sequence.
///
/// For array-like objects a missing `length` is treated as zero, and a
/// negative one is clamped to zero.
pub fn len(sequence: &Value) -> Result<usize, VmError> {
    match sequence {
        Value::Vec(vec) => Ok(vec.borrow_ref()?.len()),
        Value::Tuple(tuple) => Ok(tuple.borrow_ref()?.len()),
        Value::Object(object) => match object.borrow_ref()?.get("length") {
            None | Some(Value::Unit) => Ok(0),
            Some(Value::Integer(length)) => Ok(usize::try_from(*length).unwrap_or_default()),
            Some(actual) => Err(VmError::expected("integer", actual.type_info()?)),
        },
        actual => Err(VmError::expected("sequence", actual.type_info()?)),
    }
}

/// Read the element at the given position of a sequence.
///
/// Positions outside of the current bounds read as [Value::Unit].
pub fn get(sequence: &Value, index: usize) -> Result<Value, VmError> {
    let value = match sequence {
        Value::Vec(vec) => vec.borrow_ref()?.get(index).cloned(),
        Value::Tuple(tuple) => tuple.borrow_ref()?.get(index).cloned(),
        Value::Object(object) => object.borrow_ref()?.get(&index.to_string()).cloned(),
        actual => return Err(VmError::expected("sequence", actual.type_info()?)),
    };

    Ok(value.unwrap_or_default())
}

fn item(sequence: &Value, index: usize, kind: ItemKind) -> Result<Value, VmError> {
    Ok(match kind {
        ItemKind::Key => Value::from(index),
        ItemKind::Value => get(sequence, index)?,
        ItemKind::KeyValue => Value::tuple(vec![Value::from(index), get(sequence, index)?]),
    })
}

/// An iterator walking a sequence from the first position to the last.
#[derive(Debug)]
pub(crate) struct SequenceIter {
    /// The iterated sequence, cleared once the iterator is exhausted.
    sequence: Option<Value>,
    index: usize,
    kind: ItemKind,
}

impl SequenceIter {
    pub(crate) const NAME: &'static str = "SequenceIter";

    pub(crate) fn new(sequence: Value, kind: ItemKind) -> Self {
        Self {
            sequence: Some(sequence),
            index: 0,
            kind,
        }
    }

    pub(crate) fn next(&mut self) -> Result<Step, VmError> {
        let sequence = match &self.sequence {
            Some(sequence) => sequence.clone(),
            None => return Ok(Step::Done),
        };

        if self.index >= len(&sequence)? {
            self.sequence = None;
            return Ok(Step::Done);
        }

        let value = item(&sequence, self.index, self.kind)?;
        self.index += 1;
        Ok(Step::Yielded(value))
    }

    /// Convert into an iterator walking the same sequence backwards.
    ///
    /// This is only permitted until the first step is taken.
    pub(crate) fn rev(&self) -> Result<SequenceRevIter, VmError> {
        let sequence = match &self.sequence {
            Some(sequence) if self.index == 0 => sequence,
            _ => {
                return Err(VmError::from(VmErrorKind::IllegalReversal {
                    iterator: Self::NAME,
                }))
            }
        };

        log::debug!("reversing {} over {:?}", Self::NAME, self.kind);
        SequenceRevIter::new(sequence.clone(), self.kind)
    }
}

/// An iterator walking a sequence from the last position to the first.
#[derive(Debug)]
pub(crate) struct SequenceRevIter {
    /// The iterated sequence, cleared once the iterator is exhausted.
    sequence: Option<Value>,
    /// The next position to read, which is negative once every position has
    /// been read.
    index: i64,
    kind: ItemKind,
}

impl SequenceRevIter {
    pub(crate) const NAME: &'static str = "SequenceRevIter";

    pub(crate) fn new(sequence: Value, kind: ItemKind) -> Result<Self, VmError> {
        let index = last_index(&sequence)?;

        Ok(Self {
            sequence: Some(sequence),
            index,
            kind,
        })
    }

    pub(crate) fn next(&mut self) -> Result<Step, VmError> {
        let sequence = match &self.sequence {
            Some(sequence) => sequence.clone(),
            None => return Ok(Step::Done),
        };

        let index = match usize::try_from(self.index) {
            Ok(index) => index,
            Err(..) => {
                self.sequence = None;
                return Ok(Step::Done);
            }
        };

        let value = item(&sequence, index, self.kind)?;
        self.index -= 1;
        Ok(Step::Yielded(value))
    }

    /// Convert into an iterator walking the same sequence forwards.
    ///
    /// This is only permitted while the next position is still the last
    /// position of the sequence, as measured at the time of the call.
    pub(crate) fn rev(&self) -> Result<SequenceIter, VmError> {
        let sequence = match &self.sequence {
            Some(sequence) if self.index == last_index(sequence)? => sequence,
            _ => {
                return Err(VmError::from(VmErrorKind::IllegalReversal {
                    iterator: Self::NAME,
                }))
            }
        };

        log::debug!("reversing {} over {:?}", Self::NAME, self.kind);
        Ok(SequenceIter::new(sequence.clone(), self.kind))
    }
}

fn last_index(sequence: &Value) -> Result<i64, VmError> {
    Ok(i64::try_from(len(sequence)?).unwrap_or(i64::MAX) - 1)
}

#[cfg(test)]
mod tests {
    use super::{len, ItemKind, SequenceIter, SequenceRevIter};
    use crate::{Object, Step, Value, VmErrorKind};

    fn abc() -> Value {
        Value::vec(vec![Value::from("A"), Value::from("B"), Value::from("C")])
    }

    fn integers(iter: &mut dyn FnMut() -> Step) -> Vec<i64> {
        let mut out = Vec::new();

        while let Step::Yielded(value) = iter() {
            out.push(value.into_integer().unwrap());
        }

        out
    }

    #[test]
    fn test_keys() {
        let mut iter = SequenceIter::new(abc(), ItemKind::Key);
        assert_eq!(integers(&mut || iter.next().unwrap()), vec![0, 1, 2]);

        let mut iter = SequenceRevIter::new(abc(), ItemKind::Key).unwrap();
        assert_eq!(integers(&mut || iter.next().unwrap()), vec![2, 1, 0]);
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let vec = abc();
        let mut iter = SequenceIter::new(vec.clone(), ItemKind::Key);
        assert_eq!(integers(&mut || iter.next().unwrap()), vec![0, 1, 2]);

        // NB: growing the sequence doesn't revive an exhausted iterator.
        vec.clone()
            .into_vec()
            .unwrap()
            .borrow_mut()
            .unwrap()
            .push(Value::from("D"));

        assert!(iter.next().unwrap().is_done());
        assert!(iter.sequence.is_none());
    }

    #[test]
    fn test_reverse_gating() {
        let mut iter = SequenceIter::new(abc(), ItemKind::Value);
        assert!(iter.rev().is_ok());

        iter.next().unwrap();

        let error = iter.rev().unwrap_err();
        assert!(matches!(
            error.kind(),
            VmErrorKind::IllegalReversal { iterator } if *iterator == SequenceIter::NAME
        ));

        let mut iter = SequenceRevIter::new(abc(), ItemKind::Value).unwrap();
        assert!(iter.rev().is_ok());

        iter.next().unwrap();
        assert!(iter.rev().is_err());
    }

    #[test]
    fn test_reverse_gating_rereads_length() {
        let vec = abc();
        let iter = SequenceRevIter::new(vec.clone(), ItemKind::Value).unwrap();

        vec.into_vec()
            .unwrap()
            .borrow_mut()
            .unwrap()
            .push(Value::from("D"));

        assert!(iter.rev().is_err());
    }

    #[test]
    fn test_array_like_object() {
        let mut object = Object::new();
        object.insert("length", Value::from(2));
        object.insert("0", Value::from(10));
        object.insert("1", Value::from(20));
        object.insert("2", Value::from(30));

        let object = Value::object(object);
        assert_eq!(len(&object).unwrap(), 2);

        let mut iter = SequenceRevIter::new(object, ItemKind::Value).unwrap();
        assert_eq!(integers(&mut || iter.next().unwrap()), vec![20, 10]);
    }

    #[test]
    fn test_negative_length() {
        let mut object = Object::new();
        object.insert("length", Value::from(-5));

        let object = Value::object(object);
        assert_eq!(len(&object).unwrap(), 0);

        let mut iter = SequenceRevIter::new(object, ItemKind::Value).unwrap();
        assert!(iter.next().unwrap().is_done());
    }
}
