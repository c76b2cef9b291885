use std::any;
use std::cell::{self, RefCell};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// A shared reference to a value.
pub type BorrowRef<'a, T> = cell::Ref<'a, T>;

/// An exclusive reference to a value.
pub type BorrowMut<'a, T> = cell::RefMut<'a, T>;

/// An error raised when a shared value is accessed in a way that conflicts
/// with an access that is already live.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Tried to read a value which is exclusively accessed.
    #[error("cannot read `{type_name}`, it is already exclusively accessed")]
    NotAccessibleRef {
        /// Name of the type being accessed.
        type_name: &'static str,
    },
    /// Tried to write to a value which is already accessed.
    #[error("cannot write `{type_name}`, it is already accessed")]
    NotAccessibleMut {
        /// Name of the type being accessed.
        type_name: &'static str,
    },
}

/// A shared value.
///
/// Cloning a shared value produces another handle to the same data. Access
/// is checked at runtime, so a conflicting borrow results in an
/// [AccessError] rather than a panic.
pub struct Shared<T: ?Sized> {
    inner: Rc<RefCell<T>>,
}

impl<T> Shared<T> {
    /// Construct a new shared value.
    pub fn new(data: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(data)),
        }
    }
}

impl<T: ?Sized> Shared<T> {
    /// Get a reference to the interior value while checking for shared
    /// access.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reviter::Shared;
    ///
    /// let a = Shared::new(vec![1, 2, 3]);
    /// let b = a.clone();
    ///
    /// let guard = a.borrow_ref().unwrap();
    /// assert!(b.borrow_mut().is_err());
    /// assert_eq!(guard.len(), 3);
    /// ```
    pub fn borrow_ref(&self) -> Result<BorrowRef<'_, T>, AccessError> {
        self.inner
            .try_borrow()
            .map_err(|_| AccessError::NotAccessibleRef {
                type_name: any::type_name::<T>(),
            })
    }

    /// Get a reference to the interior value while checking for exclusive
    /// access.
    pub fn borrow_mut(&self) -> Result<BorrowMut<'_, T>, AccessError> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| AccessError::NotAccessibleMut {
                type_name: any::type_name::<T>(),
            })
    }

    /// Test if two shared values point to the same data.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Shared<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(data) => fmt::Debug::fmt(&*data, f),
            Err(..) => write!(f, "*not accessible*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessError, Shared};

    #[test]
    fn test_conflicting_access() {
        let a = Shared::new(String::from("hello"));
        let b = a.clone();

        let _guard = a.borrow_mut().unwrap();

        assert!(matches!(
            b.borrow_ref(),
            Err(AccessError::NotAccessibleRef { .. })
        ));
        assert!(matches!(
            b.borrow_mut(),
            Err(AccessError::NotAccessibleMut { .. })
        ));
    }

    #[test]
    fn test_ptr_eq() {
        let a = Shared::new(1i64);
        let b = a.clone();
        let c = Shared::new(1i64);

        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));

        *b.borrow_mut().unwrap() += 1;
        assert_eq!(*a.borrow_ref().unwrap(), 2);
    }
}
