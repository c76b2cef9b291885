use crate::map::Map;
use crate::sequence::{SequenceIter, SequenceRevIter};
use crate::{Step, Value, VmError, VmErrorKind};
use std::fmt;
use std::iter;

/// A native iterator.
///
/// Native iterators are the iterators the runtime knows how to drive without
/// going through a user-provided `next` function. Sequence and mapping
/// iterators are reversible, iterators constructed from a host iterator
/// through [Iterator::from] are not.
pub struct Iterator {
    iter: IterRepr,
}

impl Iterator {
    /// Construct a new owning iterator from a host iterator.
    ///
    /// The name is only intended to identify the iterator in case of errors.
    /// Once the host iterator returns `None` it is never polled again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reviter::{Iterator, Value};
    ///
    /// # fn main() -> reviter::Result<()> {
    /// let iter = Value::from(Iterator::from("Range", 1..3i64));
    ///
    /// assert_eq!(reviter::advance(&iter)?.into_value().unwrap().into_integer()?, 1);
    /// assert_eq!(reviter::advance(&iter)?.into_value().unwrap().into_integer()?, 2);
    /// assert!(reviter::advance(&iter)?.is_done());
    /// assert!(reviter::reverse(&iter).is_err());
    /// # Ok(()) }
    /// ```
    pub fn from<T>(name: &'static str, iter: T) -> Self
    where
        T: IteratorTrait,
    {
        Self::from_repr(IterRepr::Iterator(Box::new(IteratorObj {
            name,
            done: false,
            iter,
        })))
    }

    pub(crate) fn from_repr(iter: IterRepr) -> Self {
        Self { iter }
    }

    /// Get the name of the iterator.
    pub fn name(&self) -> &'static str {
        match &self.iter {
            IterRepr::Iterator(iter) => iter.name,
            IterRepr::Sequence(..) => SequenceIter::NAME,
            IterRepr::SequenceRev(..) => SequenceRevIter::NAME,
            IterRepr::Map(..) => Map::NAME,
        }
    }

    /// Test if the iterator advertises the ability to be reversed.
    ///
    /// A reversible iterator might still refuse to be reversed once iteration
    /// has begun.
    pub fn is_reversible(&self) -> bool {
        match &self.iter {
            IterRepr::Iterator(..) => false,
            IterRepr::Sequence(..) | IterRepr::SequenceRev(..) => true,
            IterRepr::Map(map) => map.is_reversible(),
        }
    }

    /// Advance the iterator once.
    ///
    /// The `resume` value is forwarded to the underlying iterator where that
    /// is meaningful and ignored otherwise.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self, resume: Value) -> Result<Step, VmError> {
        let step = match &mut self.iter {
            IterRepr::Iterator(iter) => iter.next()?,
            IterRepr::Sequence(iter) => iter.next()?,
            IterRepr::SequenceRev(iter) => iter.next()?,
            IterRepr::Map(map) => map.next(resume)?,
        };

        log::trace!("{}: {:?}", self.name(), step);
        Ok(step)
    }

    /// Construct an iterator walking the remaining items in the opposite
    /// direction.
    pub fn rev(&self) -> Result<Iterator, VmError> {
        let iter = match &self.iter {
            IterRepr::Iterator(iter) => {
                return Err(VmError::from(VmErrorKind::NotReversible {
                    actual: crate::TypeInfo::Iterator(iter.name),
                }))
            }
            IterRepr::Sequence(iter) => IterRepr::SequenceRev(iter.rev()?),
            IterRepr::SequenceRev(iter) => IterRepr::Sequence(iter.rev()?),
            IterRepr::Map(map) => IterRepr::Map(Box::new(map.rev()?)),
        };

        Ok(Self::from_repr(iter))
    }
}

impl fmt::Debug for Iterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.iter, f)
    }
}

pub(crate) enum IterRepr {
    Iterator(Box<IteratorObj<dyn IteratorTrait>>),
    Sequence(SequenceIter),
    SequenceRev(SequenceRevIter),
    Map(Box<Map>),
}

impl From<SequenceIter> for IterRepr {
    fn from(iter: SequenceIter) -> Self {
        Self::Sequence(iter)
    }
}

impl From<SequenceRevIter> for IterRepr {
    fn from(iter: SequenceRevIter) -> Self {
        Self::SequenceRev(iter)
    }
}

impl From<Map> for IterRepr {
    fn from(map: Map) -> Self {
        Self::Map(Box::new(map))
    }
}

impl fmt::Debug for IterRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iterator(iter) => write!(f, "{}", iter.name),
            Self::Sequence(iter) => write!(f, "{:?}", iter),
            Self::SequenceRev(iter) => write!(f, "{:?}", iter),
            Self::Map(iter) => write!(f, "{:?}", iter),
        }
    }
}

pub(crate) struct IteratorObj<T>
where
    T: ?Sized,
{
    name: &'static str,
    done: bool,
    iter: T,
}

impl IteratorObj<dyn IteratorTrait> {
    fn next(&mut self) -> Result<Step, VmError> {
        if self.done {
            return Ok(Step::Done);
        }

        match self.iter.next()? {
            Some(value) => Ok(Step::Yielded(value)),
            None => {
                self.done = true;
                Ok(Step::Done)
            }
        }
    }
}

/// The trait for interacting with a host iterator.
///
/// This has a blanket implementation, and is primarily used to restrict the
/// arguments that can be used in [Iterator::from].
pub trait IteratorTrait: 'static {
    /// Get the next value out of the iterator.
    fn next(&mut self) -> Result<Option<Value>, VmError>;
}

impl<T> IteratorTrait for T
where
    T: 'static,
    T: iter::Iterator,
    T::Item: Into<Value>,
{
    fn next(&mut self) -> Result<Option<Value>, VmError> {
        Ok(iter::Iterator::next(self).map(Into::into))
    }
}
