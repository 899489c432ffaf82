//! Per-session integer stack.

use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::error::DomainError;

/// LIFO stack of `i32` owned by one session.
///
/// Every access takes this stack's own mutex and nothing else, so stacks of
/// different sessions never contend. Critical sections are short and never
/// span an `.await`.
#[derive(Debug, Default)]
pub struct SessionStack {
    // Top of the stack is the last element.
    values: Mutex<Vec<i32>>,
}

impl SessionStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn push(&self, value: i32) {
        self.values.lock().push(value);
    }

    /// Remove and return the top value.
    ///
    /// # Errors
    /// [`DomainError::EmptyStack`] if the stack has no elements.
    pub fn pop(&self) -> Result<i32, DomainError> {
        self.values.lock().pop().ok_or(DomainError::EmptyStack)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Wait for `delay`, then pop.
    ///
    /// The lock is taken only for the pop itself; other requests on this
    /// stack proceed while the caller waits.
    ///
    /// # Errors
    /// [`DomainError::Interrupted`] if `cancel` fires during the wait,
    /// [`DomainError::EmptyStack`] if the stack is empty once the wait ends.
    pub async fn delay_pop(
        &self,
        delay: Duration,
        cancel: &CancellationToken,
    ) -> Result<i32, DomainError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(DomainError::Interrupted),
            () = tokio::time::sleep(delay) => self.pop(),
        }
    }

    /// Atomically remove every value, returned in pop order (top first).
    #[must_use]
    pub fn drain_all(&self) -> Vec<i32> {
        take_in_pop_order(&mut self.values.lock())
    }

    /// Replace the whole stack with `reduce(values)`.
    ///
    /// `reduce` sees the values in the order [`drain_all`](Self::drain_all)
    /// returns them. Drain, reduction and push of the result happen under one
    /// lock acquisition. If `reduce` fails, the drained values are put back in
    /// their original order before the lock is released.
    ///
    /// # Errors
    /// [`DomainError::EmptyStack`] if the stack is empty (left untouched),
    /// or whatever `reduce` returns.
    pub fn reduce_with<F>(&self, reduce: F) -> Result<i32, DomainError>
    where
        F: FnOnce(&[i32]) -> Result<i32, DomainError>,
    {
        let mut values = self.values.lock();
        if values.is_empty() {
            return Err(DomainError::EmptyStack);
        }

        let mut drained = take_in_pop_order(&mut values);
        match reduce(&drained) {
            Ok(result) => {
                values.push(result);
                Ok(result)
            }
            Err(e) => {
                drained.reverse();
                *values = drained;
                Err(e)
            }
        }
    }
}

/// Empty `values`, returning them top first.
fn take_in_pop_order(values: &mut Vec<i32>) -> Vec<i32> {
    let mut drained = std::mem::take(values);
    drained.reverse();
    drained
}
