use crate::Value;

/// The outcome of advancing an iterator once.
///
/// A finished iterator carries no value, and keeps producing
/// [Step::Done] for every subsequent advance.
#[derive(Debug, Clone)]
pub enum Step {
    /// The iterator produced a value.
    Yielded(Value),
    /// The iterator is exhausted.
    Done,
}

impl Step {
    /// Test if this step marks the end of iteration.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Get the produced value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Yielded(value) => Some(value),
            Self::Done => None,
        }
    }

    /// Convert into the produced value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Yielded(value) => Some(value),
            Self::Done => None,
        }
    }
}

impl From<Option<Value>> for Step {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(value) => Self::Yielded(value),
            None => Self::Done,
        }
    }
}
