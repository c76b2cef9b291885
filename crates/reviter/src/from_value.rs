use crate::{Value, VmError, VmErrorKind};

/// Trait for converting from a value.
pub trait FromValue: 'static + Sized {
    /// Try to convert to the given type, from the given value.
    fn from_value(value: Value) -> Result<Self, VmError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, VmError> {
        Ok(value)
    }
}

impl FromValue for () {
    fn from_value(value: Value) -> Result<Self, VmError> {
        value.into_unit()
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, VmError> {
        value.into_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, VmError> {
        value.into_integer()
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, VmError> {
        let string = value.into_string()?;
        let string = string.borrow_ref()?;
        Ok(string.clone())
    }
}

impl<T> FromValue for Option<T>
where
    T: FromValue,
{
    fn from_value(value: Value) -> Result<Self, VmError> {
        let option = value.into_option()?;
        let option = option.borrow_ref()?.clone();

        Ok(match option {
            Some(some) => Some(T::from_value(some)?),
            None => None,
        })
    }
}

impl<T> FromValue for Vec<T>
where
    T: FromValue,
{
    fn from_value(value: Value) -> Result<Self, VmError> {
        let values = match value {
            Value::Vec(vec) => vec.borrow_ref()?.clone(),
            Value::Tuple(tuple) => tuple.borrow_ref()?.to_vec(),
            actual => return Err(VmError::expected("Vec", actual.type_info()?)),
        };

        let mut output = Vec::with_capacity(values.len());

        for value in values {
            output.push(T::from_value(value)?);
        }

        Ok(output)
    }
}

impl<A, B> FromValue for (A, B)
where
    A: FromValue,
    B: FromValue,
{
    fn from_value(value: Value) -> Result<Self, VmError> {
        let tuple = value.into_tuple()?;

        let (a, b) = match &**tuple.borrow_ref()? {
            [a, b] => (a.clone(), b.clone()),
            other => {
                return Err(VmError::from(VmErrorKind::ExpectedTupleLength {
                    actual: other.len(),
                    expected: 2,
                }))
            }
        };

        Ok((A::from_value(a)?, B::from_value(b)?))
    }
}
