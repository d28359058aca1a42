//! The memoizing normalization engine.
//!
//! Every normalizable value owns a [`NormalCell`] computing two facts at
//! most once each: whether the value is already in normal form, and the
//! normalized replacement if it is not. The cells are the only interior
//! mutability in the crate; they use [`OnceLock`], a single-assignment
//! cell whose suppliers here are pure and deterministic, so concurrent
//! first computations are benign.

use std::sync::OnceLock;

/// Caches the normal form of the owning value.
///
/// The `normalized` slot holds `None` once the value is known to be its
/// own normal form, and the boxed replacement otherwise.
#[derive(Debug, Default)]
pub(crate) struct NormalCell<T> {
    is_normal: OnceLock<bool>,
    normalized: OnceLock<Option<Box<T>>>,
}

impl<T> NormalCell<T> {
    pub(crate) const fn new() -> Self {
        NormalCell {
            is_normal: OnceLock::new(),
            normalized: OnceLock::new(),
        }
    }

    /// Creates a cell for a value known at construction to be normal.
    pub(crate) fn normal() -> Self {
        let cell = NormalCell::new();
        let _ = cell.is_normal.set(true);
        let _ = cell.normalized.set(None);
        cell
    }
}

impl<T: Clone> NormalCell<T> {
    /// Returns whether the owning value is in normal form, invoking
    /// `check` at most once per instance.
    ///
    /// Must not touch the `normalized` slot: normalize suppliers call
    /// this method from inside that slot's initialization.
    pub(crate) fn is_normal_form(&self, check: impl FnOnce() -> bool) -> bool {
        *self.is_normal.get_or_init(check)
    }

    /// Returns the normal form of `this`, invoking `replace` at most once
    /// per instance. `replace` returns `None` to mean "already normal".
    pub(crate) fn normalize(&self, this: &T, replace: impl FnOnce() -> Option<T>) -> T {
        if self.is_normal.get() == Some(&true) {
            return this.clone();
        }
        match self.normalized.get_or_init(|| replace().map(Box::new)) {
            None => {
                let _ = self.is_normal.set(true);
                this.clone()
            }
            Some(normalized) => {
                let _ = self.is_normal.set(false);
                (**normalized).clone()
            }
        }
    }
}

impl<T: Clone> Clone for NormalCell<T> {
    fn clone(&self) -> Self {
        NormalCell {
            is_normal: self.is_normal.clone(),
            normalized: self.normalized.clone(),
        }
    }
}
