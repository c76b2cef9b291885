use crate::{Value, VmError, VmErrorKind};
use std::fmt;
use std::rc::Rc;

type Handler = dyn Fn(&Value, &[Value]) -> Result<Value, VmError>;

/// A callable host function.
///
/// Functions are called with a receiver, which is the value the function is
/// invoked on (or the context a transform was registered with), and a list
/// of positional arguments.
#[derive(Clone)]
pub struct Function {
    name: &'static str,
    handler: Rc<Handler>,
}

impl Function {
    /// Construct a function from a handler receiving both the receiver and
    /// the arguments.
    ///
    /// The name is only intended to identify the function in diagnostics.
    pub fn new<F>(name: &'static str, handler: F) -> Self
    where
        F: 'static + Fn(&Value, &[Value]) -> Result<Value, VmError>,
    {
        Self {
            name,
            handler: Rc::new(handler),
        }
    }

    /// Construct a function taking exactly one argument and ignoring its
    /// receiver.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reviter::{Function, Value};
    ///
    /// # fn main() -> reviter::Result<()> {
    /// let double = Function::unary("double", |value| {
    ///     Ok(Value::from(value.into_integer()? * 2))
    /// });
    ///
    /// let out = double.call(&Value::Unit, &[Value::from(21)])?;
    /// assert_eq!(out.into_integer()?, 42);
    /// # Ok(()) }
    /// ```
    pub fn unary<F>(name: &'static str, handler: F) -> Self
    where
        F: 'static + Fn(Value) -> Result<Value, VmError>,
    {
        Self::new(name, move |_, args| {
            Self::check_args(args.len(), 1)?;
            handler(args[0].clone())
        })
    }

    /// The name of the function.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Perform a call over the function with the given receiver.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, VmError> {
        (self.handler)(this, args)
    }

    /// Check that arguments matches expected or raise the appropriate error.
    fn check_args(actual: usize, expected: usize) -> Result<(), VmError> {
        if actual != expected {
            return Err(VmError::from(VmErrorKind::BadArgumentCount {
                actual,
                expected,
            }));
        }

        Ok(())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::Function;
    use crate::{Value, VmErrorKind};

    #[test]
    fn test_unary_arity() {
        let identity = Function::unary("identity", Ok);

        let error = identity
            .call(&Value::Unit, &[Value::from(1), Value::from(2)])
            .unwrap_err();

        assert!(matches!(
            error.kind(),
            VmErrorKind::BadArgumentCount {
                actual: 2,
                expected: 1
            }
        ));
    }

    #[test]
    fn test_receiver() {
        let offset = Function::new("offset", |this, args| {
            let base = this.clone().into_integer()?;
            let value = args[0].clone().into_integer()?;
            Ok(Value::from(base + value))
        });

        let out = offset.call(&Value::from(10), &[Value::from(5)]).unwrap();
        assert_eq!(out.into_integer().unwrap(), 15);
    }
}
