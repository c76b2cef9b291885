use crate::{Capability, Function, Iterator, Object, Protocol, Shared, Tuple, TypeInfo, VmError};
use std::fmt;

/// A dynamic value.
///
/// Cloning a value is cheap: compound values are reference counted, so a
/// clone refers to the same underlying data.
#[derive(Clone)]
pub enum Value {
    /// The unit value, which also marks an absent value.
    Unit,
    /// A boolean.
    Bool(bool),
    /// A number.
    Integer(i64),
    /// A UTF-8 string.
    String(Shared<String>),
    /// An optional value.
    Option(Shared<Option<Value>>),
    /// A vector containing any values.
    Vec(Shared<Vec<Value>>),
    /// A tuple.
    Tuple(Shared<Tuple>),
    /// An object.
    Object(Shared<Object>),
    /// A host function.
    Function(Function),
    /// An iterator.
    Iterator(Shared<Iterator>),
}

impl Value {
    /// Construct a vector.
    pub fn vec(vec: Vec<Value>) -> Self {
        Self::Vec(Shared::new(vec))
    }

    /// Construct a tuple.
    pub fn tuple(vec: Vec<Value>) -> Self {
        Self::Tuple(Shared::new(Tuple::from(vec)))
    }

    /// Construct an object.
    pub fn object(object: Object) -> Self {
        Self::Object(Shared::new(object))
    }

    /// Construct a string.
    pub fn string<S>(string: S) -> Self
    where
        S: Into<String>,
    {
        Self::String(Shared::new(string.into()))
    }

    /// Construct an option.
    pub fn option(option: Option<Value>) -> Self {
        Self::Option(Shared::new(option))
    }

    /// Test if the value is object-like.
    ///
    /// Only object-like values can act as iterators. Every other value is a
    /// primitive, which never implements any protocols.
    pub fn is_object_like(&self) -> bool {
        matches!(
            self,
            Self::Vec(..) | Self::Tuple(..) | Self::Object(..) | Self::Function(..) | Self::Iterator(..)
        )
    }

    /// Look up how the value implements the given protocol.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reviter::{Capability, Protocol, Value};
    ///
    /// # fn main() -> reviter::Result<()> {
    /// let vec = Value::vec(vec![Value::from(1)]);
    /// assert!(matches!(vec.capability(Protocol::INTO_REV_ITER)?, Capability::Native));
    ///
    /// let number = Value::from(1);
    /// assert!(number.capability(Protocol::INTO_REV_ITER)?.is_absent());
    /// # Ok(()) }
    /// ```
    pub fn capability(&self, protocol: Protocol) -> Result<Capability, VmError> {
        Ok(match self {
            Self::Vec(..) | Self::Tuple(..) => {
                if protocol == Protocol::INTO_ITER || protocol == Protocol::INTO_REV_ITER {
                    Capability::Native
                } else {
                    Capability::Absent
                }
            }
            Self::Iterator(iter) => {
                if protocol == Protocol::INTO_ITER || protocol == Protocol::NEXT {
                    Capability::Native
                } else if protocol == Protocol::INTO_REV_ITER && iter.borrow_ref()?.is_reversible()
                {
                    Capability::Native
                } else {
                    Capability::Absent
                }
            }
            Self::Object(object) => match object.borrow_ref()?.protocol(protocol) {
                None | Some(Value::Unit) => Capability::Absent,
                Some(Value::Function(function)) => Capability::Function(function.clone()),
                Some(actual) => Capability::NotCallable(actual.type_info()?),
            },
            _ => Capability::Absent,
        })
    }

    /// Try to coerce value into a unit.
    #[inline]
    pub fn into_unit(self) -> Result<(), VmError> {
        match self {
            Self::Unit => Ok(()),
            actual => Err(VmError::expected("unit", actual.type_info()?)),
        }
    }

    /// Try to coerce value into a boolean.
    #[inline]
    pub fn into_bool(self) -> Result<bool, VmError> {
        match self {
            Self::Bool(b) => Ok(b),
            actual => Err(VmError::expected("bool", actual.type_info()?)),
        }
    }

    /// Try to coerce value into an integer.
    #[inline]
    pub fn into_integer(self) -> Result<i64, VmError> {
        match self {
            Self::Integer(integer) => Ok(integer),
            actual => Err(VmError::expected("integer", actual.type_info()?)),
        }
    }

    /// Try to coerce value into a string.
    #[inline]
    pub fn into_string(self) -> Result<Shared<String>, VmError> {
        match self {
            Self::String(string) => Ok(string),
            actual => Err(VmError::expected("String", actual.type_info()?)),
        }
    }

    /// Try to coerce value into an option.
    #[inline]
    pub fn into_option(self) -> Result<Shared<Option<Value>>, VmError> {
        match self {
            Self::Option(option) => Ok(option),
            actual => Err(VmError::expected("Option", actual.type_info()?)),
        }
    }

    /// Try to coerce value into a vector.
    #[inline]
    pub fn into_vec(self) -> Result<Shared<Vec<Value>>, VmError> {
        match self {
            Self::Vec(vec) => Ok(vec),
            actual => Err(VmError::expected("Vec", actual.type_info()?)),
        }
    }

    /// Try to coerce value into a tuple.
    #[inline]
    pub fn into_tuple(self) -> Result<Shared<Tuple>, VmError> {
        match self {
            Self::Tuple(tuple) => Ok(tuple),
            actual => Err(VmError::expected("Tuple", actual.type_info()?)),
        }
    }

    /// Try to coerce value into an object.
    #[inline]
    pub fn into_object(self) -> Result<Shared<Object>, VmError> {
        match self {
            Self::Object(object) => Ok(object),
            actual => Err(VmError::expected("Object", actual.type_info()?)),
        }
    }

    /// Try to coerce value into a function.
    #[inline]
    pub fn into_function(self) -> Result<Function, VmError> {
        match self {
            Self::Function(function) => Ok(function),
            actual => Err(VmError::expected("Function", actual.type_info()?)),
        }
    }

    /// Try to coerce value into an iterator.
    #[inline]
    pub fn into_iterator(self) -> Result<Shared<Iterator>, VmError> {
        match self {
            Self::Iterator(iterator) => Ok(iterator),
            actual => Err(VmError::expected("Iterator", actual.type_info()?)),
        }
    }

    /// Get the type information for the current value.
    pub fn type_info(&self) -> Result<TypeInfo, VmError> {
        Ok(match self {
            Self::Unit => TypeInfo::Builtin("unit"),
            Self::Bool(..) => TypeInfo::Builtin("bool"),
            Self::Integer(..) => TypeInfo::Builtin("integer"),
            Self::String(..) => TypeInfo::Builtin("String"),
            Self::Option(..) => TypeInfo::Builtin("Option"),
            Self::Vec(..) => TypeInfo::Builtin("Vec"),
            Self::Tuple(..) => TypeInfo::Builtin("Tuple"),
            Self::Object(..) => TypeInfo::Builtin("Object"),
            Self::Function(..) => TypeInfo::Builtin("Function"),
            Self::Iterator(iter) => TypeInfo::Iterator(iter.borrow_ref()?.name()),
        })
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(value) => write!(f, "{:?}", value),
            Value::Integer(value) => write!(f, "{:?}", value),
            Value::String(value) => write!(f, "{:?}", value),
            Value::Option(value) => write!(f, "{:?}", value),
            Value::Vec(value) => write!(f, "{:?}", value),
            Value::Tuple(value) => write!(f, "{:?}", value),
            Value::Object(value) => write!(f, "{:?}", value),
            Value::Function(value) => write!(f, "{:?}", value),
            Value::Iterator(value) => write!(f, "{:?}", value),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Unit
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<Option<Value>> for Value {
    fn from(value: Option<Value>) -> Self {
        Self::option(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::vec(value)
    }
}

impl From<Tuple> for Value {
    fn from(value: Tuple) -> Self {
        Self::Tuple(Shared::new(value))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::object(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl From<Iterator> for Value {
    fn from(value: Iterator) -> Self {
        Self::Iterator(Shared::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::{Capability, Function, Object, Protocol, TypeInfo};

    static_assertions::assert_not_impl_any!(Value: Send, Sync);

    #[test]
    fn test_object_like() {
        assert!(Value::vec(vec![]).is_object_like());
        assert!(Value::object(Object::new()).is_object_like());
        assert!(!Value::Unit.is_object_like());
        assert!(!Value::from("hello").is_object_like());
        assert!(!Value::from(Some(Value::Unit)).is_object_like());
    }

    #[test]
    fn test_object_capability() {
        let mut object = Object::new();
        object.insert_protocol(Protocol::INTO_ITER, Value::Unit);
        object.insert_protocol(Protocol::INTO_REV_ITER, Value::from(false));
        object.insert_protocol(
            Protocol::NEXT,
            Value::from(Function::new("next", |_, _| Ok(Value::option(None)))),
        );
        // NB: a plain field never implements a protocol.
        object.insert("next", Value::from(1));

        let object = Value::object(object);

        assert!(object.capability(Protocol::INTO_ITER).unwrap().is_absent());

        assert!(matches!(
            object.capability(Protocol::INTO_REV_ITER).unwrap(),
            Capability::NotCallable(TypeInfo::Builtin("bool"))
        ));

        assert!(matches!(
            object.capability(Protocol::NEXT).unwrap(),
            Capability::Function(..)
        ));
    }
}
