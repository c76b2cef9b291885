use crate::{ops, Function, Protocol, Step, Value, VmError, VmErrorKind};
use std::fmt;

/// An iterator applying a transform to every value produced by an inner
/// iterator.
///
/// Whether the mapping iterator can be reversed is decided once, when it is
/// constructed, by looking at whether the inner iterator advertises
/// [Protocol::INTO_REV_ITER]. The actual reversal is delegated to the inner
/// iterator when it's requested, which also decides whether reversal is
/// still permitted.
pub(crate) struct Map {
    /// State released once the inner iterator is exhausted.
    state: Option<MapState>,
    reversible: bool,
}

struct MapState {
    iter: Value,
    map: Function,
    context: Value,
}

impl Map {
    pub(crate) const NAME: &'static str = "Map";

    pub(crate) fn new(iter: Value, map: Function, context: Value) -> Result<Self, VmError> {
        let reversible = !iter.capability(Protocol::INTO_REV_ITER)?.is_absent();
        log::debug!("mapping {:?} with `{}` (reversible: {})", iter, map.name(), reversible);

        Ok(Self {
            state: Some(MapState { iter, map, context }),
            reversible,
        })
    }

    pub(crate) fn is_reversible(&self) -> bool {
        self.reversible
    }

    pub(crate) fn next(&mut self, resume: Value) -> Result<Step, VmError> {
        let state = match &self.state {
            Some(state) => state,
            None => return Ok(Step::Done),
        };

        let value = match ops::advance_with(&state.iter, resume)? {
            Step::Yielded(value) => value,
            Step::Done => {
                log::trace!("releasing exhausted {}", Self::NAME);
                self.state = None;
                return Ok(Step::Done);
            }
        };

        Ok(Step::Yielded(state.map.call(&state.context, &[value])?))
    }

    pub(crate) fn rev(&self) -> Result<Self, VmError> {
        if !self.reversible {
            return Err(VmError::from(VmErrorKind::NotReversible {
                actual: crate::TypeInfo::Iterator(Self::NAME),
            }));
        }

        let state = match &self.state {
            Some(state) => state,
            None => {
                return Err(VmError::from(VmErrorKind::IllegalReversal {
                    iterator: Self::NAME,
                }))
            }
        };

        Self::new(
            ops::reverse(&state.iter)?,
            state.map.clone(),
            state.context.clone(),
        )
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Some(state) => f
                .debug_struct(Self::NAME)
                .field("iter", &state.iter)
                .field("map", &state.map)
                .finish(),
            None => write!(f, "{}(exhausted)", Self::NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Map;
    use crate::{sequence, Function, Iterator, Step, Value, VmErrorKind};

    fn double() -> Function {
        Function::unary("double", |value| Ok(Value::from(value.into_integer()? * 2)))
    }

    #[test]
    fn test_reversibility_probed_at_construction() {
        let vec = Value::vec(vec![Value::from(1), Value::from(2)]);
        let map = Map::new(sequence::values(&vec).unwrap(), double(), Value::Unit).unwrap();
        assert!(map.is_reversible());

        let host = Value::from(Iterator::from("Range", 0..2i64));
        let map = Map::new(host, double(), Value::Unit).unwrap();
        assert!(!map.is_reversible());

        let error = map.rev().unwrap_err();
        assert!(matches!(error.kind(), VmErrorKind::NotReversible { .. }));
    }

    #[test]
    fn test_state_released_on_exhaustion() {
        let vec = Value::vec(vec![Value::from(1)]);
        let mut map = Map::new(sequence::values(&vec).unwrap(), double(), Value::Unit).unwrap();

        match map.next(Value::Unit).unwrap() {
            Step::Yielded(value) => assert_eq!(value.into_integer().unwrap(), 2),
            Step::Done => panic!("expected a value"),
        }

        assert!(map.next(Value::Unit).unwrap().is_done());
        assert!(map.state.is_none());
        assert!(map.next(Value::Unit).unwrap().is_done());

        let error = map.rev().unwrap_err();
        assert!(matches!(error.kind(), VmErrorKind::IllegalReversal { .. }));
    }
}
