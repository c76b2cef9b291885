//! Budgeting module for reviter.
//!
//! This module contains methods which allows for limiting the number of
//! steps taken through the iteration protocol. Every call to
//! [advance][crate::advance] takes one ticket from the budget, including the
//! ones performed by a mapping iterator on its source.
//!
//! By default the budget is disabled, but can be enabled by wrapping your
//! function call in [with].

use std::cell::Cell;

thread_local!(static BUDGET: Cell<usize> = Cell::new(usize::MAX));

/// Wrap the given function with a budget.
///
/// # Examples
///
/// ```rust
/// use reviter::{budget, Value, VmErrorKind};
///
/// let vec = Value::vec(vec![Value::from(1), Value::from(2), Value::from(3)]);
///
/// let result = budget::with(2, || {
///     let iter = reviter::iterate(&vec)?;
///     reviter::advance(&iter)?;
///     reviter::advance(&iter)?;
///     reviter::advance(&iter)
/// })
/// .call();
///
/// let error = result.unwrap_err();
/// assert!(matches!(error.kind(), VmErrorKind::BudgetExhausted));
/// ```
pub fn with<T>(budget: usize, value: T) -> Budget<T> {
    Budget { budget, value }
}

/// Take a ticket from the budget, indicating with `true` if the budget is
/// maintained.
pub fn take() -> bool {
    BUDGET.with(|tls| {
        let v = tls.get();

        if v == usize::MAX {
            true
        } else if v == 0 {
            false
        } else {
            tls.set(v - 1);
            true
        }
    })
}

#[repr(transparent)]
struct BudgetGuard(usize);

impl Drop for BudgetGuard {
    fn drop(&mut self) {
        BUDGET.with(|tls| {
            tls.set(self.0);
        });
    }
}

/// A budgeted function.
pub struct Budget<T> {
    /// The current budget.
    budget: usize,
    /// The function being budgeted.
    value: T,
}

impl<T, O> Budget<T>
where
    T: FnOnce() -> O,
{
    /// Call the wrapped function.
    pub fn call(self) -> O {
        BUDGET.with(|tls| {
            let _guard = BudgetGuard(tls.get());
            tls.set(self.budget);
            (self.value)()
        })
    }
}
