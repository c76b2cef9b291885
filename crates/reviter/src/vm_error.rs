use crate::{AccessError, Protocol, TypeInfo};
use std::fmt;
use thiserror::Error;

/// Errors raised while driving the iteration protocol.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct VmError {
    kind: Box<VmErrorKind>,
}

impl<E> From<E> for VmError
where
    VmErrorKind: From<E>,
{
    fn from(err: E) -> Self {
        Self {
            kind: Box::new(VmErrorKind::from(err)),
        }
    }
}

impl VmError {
    /// Return an error encapsulating a panic.
    pub fn panic<D>(message: D) -> Self
    where
        D: fmt::Display,
    {
        Self::from(VmErrorKind::Panic {
            reason: message.to_string(),
        })
    }

    /// Construct an expected error.
    pub fn expected(expected: &'static str, actual: TypeInfo) -> Self {
        Self::from(VmErrorKind::Expected { expected, actual })
    }

    /// Construct an error for an invalid use of the given protocol.
    pub fn invalid_protocol_use(protocol: Protocol, violation: ProtocolViolation) -> Self {
        Self::from(VmErrorKind::InvalidProtocolUse {
            protocol,
            violation,
        })
    }

    /// Access the underlying error kind.
    pub fn kind(&self) -> &VmErrorKind {
        &*self.kind
    }

    /// Convert into the underlying error kind.
    pub fn into_kind(self) -> VmErrorKind {
        *self.kind
    }
}

/// The kind of error encountered.
#[derive(Debug, Error)]
pub enum VmErrorKind {
    /// A host function panicked for a specific reason.
    #[error("panicked `{reason}`")]
    Panic {
        /// The reason for the panic.
        reason: String,
    },
    /// An error raised by a host function.
    #[error("{error}")]
    Custom {
        /// The error raised.
        error: anyhow::Error,
    },
    /// A protocol was used on a receiver which doesn't uphold its contract.
    #[error("invalid use of the `{protocol}` protocol: {violation}")]
    InvalidProtocolUse {
        /// The protocol that was used.
        protocol: Protocol,
        /// How the contract was violated.
        violation: ProtocolViolation,
    },
    /// Tried to reverse a value which doesn't implement
    /// [Protocol::INTO_REV_ITER].
    #[error("`{actual}` is not reversible")]
    NotReversible {
        /// The value that couldn't be reversed.
        actual: TypeInfo,
    },
    /// Tried to reverse an iterator that has already been advanced.
    #[error("cannot reverse `{iterator}` once iteration has begun")]
    IllegalReversal {
        /// The name of the iterator.
        iterator: &'static str,
    },
    /// Trying to access an inaccessible reference.
    #[error("failed to access value: {error}")]
    AccessError {
        /// Source error.
        #[from]
        error: AccessError,
    },
    /// Wrong number of arguments provided in call.
    #[error("wrong number of arguments `{actual}`, expected `{expected}`")]
    BadArgumentCount {
        /// The actual number of arguments.
        actual: usize,
        /// The expected number of arguments.
        expected: usize,
    },
    /// Error raised when we expected one type, but got another.
    #[error("expected `{expected}`, but found `{actual}`")]
    Expected {
        /// The expected type.
        expected: &'static str,
        /// The actual type found.
        actual: TypeInfo,
    },
    /// Error raised when we expected an tuple of the given length.
    #[error("expected a tuple of length `{expected}`, but found one with length `{actual}`")]
    ExpectedTupleLength {
        /// The actual length observed.
        actual: usize,
        /// The expected tuple length.
        expected: usize,
    },
    /// The step budget installed through [crate::budget] has been spent.
    #[error("step budget exhausted")]
    BudgetExhausted,
}

impl From<anyhow::Error> for VmErrorKind {
    fn from(error: anyhow::Error) -> Self {
        Self::Custom { error }
    }
}

/// The way in which a protocol contract was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// The receiver can't be converted into an object-like value.
    NotObjectLike(TypeInfo),
    /// The receiver doesn't declare the protocol.
    Missing(TypeInfo),
    /// The receiver declares the protocol, but with a value that isn't
    /// callable.
    NotCallable(TypeInfo),
    /// The protocol returned a value of the wrong shape.
    BadReturn(TypeInfo),
}

impl fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotObjectLike(actual) => write!(f, "`{}` is not an object", actual),
            Self::Missing(actual) => write!(f, "`{}` does not implement it", actual),
            Self::NotCallable(actual) => {
                write!(f, "it is declared as `{}` which is not callable", actual)
            }
            Self::BadReturn(actual) => write!(f, "it returned unexpected `{}`", actual),
        }
    }
}
