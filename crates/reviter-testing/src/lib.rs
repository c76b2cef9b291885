pub use reviter::ProtocolViolation::*;
pub use reviter::VmErrorKind::*;
pub use reviter::{
    sequence, FromValue, Function, Iterator, Object, Protocol, Step, Value, VmError,
};

/// Construct a `Vec` value out of the given strings.
pub fn strings(strings: &[&str]) -> Value {
    Value::vec(strings.iter().copied().map(Value::from).collect())
}

/// Advance the given iterator `n` times, converting every produced value.
///
/// Steps which report that the iterator is done are collected as `None`.
pub fn steps<T>(iter: &Value, n: usize) -> Result<Vec<Option<T>>, VmError>
where
    T: FromValue,
{
    let mut out = Vec::with_capacity(n);

    for _ in 0..n {
        out.push(match reviter::advance(iter)? {
            Step::Yielded(value) => Some(T::from_value(value)?),
            Step::Done => None,
        });
    }

    Ok(out)
}

/// Drain the given iterator, converting every produced value.
pub fn collect<T>(iter: &Value) -> Result<Vec<T>, VmError>
where
    T: FromValue,
{
    reviter::iter(iter)?
        .map(|value| T::from_value(value?))
        .collect()
}

/// Assert that the given expression fails with a vm error matching the given
/// pattern.
///
/// # Examples
///
/// ```rust
/// use reviter_testing::*;
///
/// # fn main() {
/// assert_vm_error!(
///     reviter::reverse(&Value::from(5)),
///     NotReversible { actual } => {
///         assert_eq!(actual.to_string(), "integer");
///     }
/// );
/// # }
/// ```
#[macro_export]
macro_rules! assert_vm_error {
    ($expr:expr, $pat:pat => $cond:expr) => {{
        let e = match $expr {
            Ok(value) => panic!("expected error `{}` but was `{:?}`", stringify!($pat), value),
            Err(e) => e,
        };

        match $crate::VmError::kind(&e) {
            $pat => $cond,
            _ => {
                panic!("expected error `{}` but was `{:?}`", stringify!($pat), e);
            }
        }
    }};
}
