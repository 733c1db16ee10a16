//! Application services: the live feed, the autoplay driver, submission,
//! notifications, and the widget that wires them together.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod carousel;
pub mod feed;
pub mod notifications;
pub mod submission;
pub mod views;
pub mod widget;

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
