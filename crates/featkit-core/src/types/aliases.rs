//! Type aliases for commonly used complex types.
//!
//! This module provides type aliases to improve code readability by giving
//! meaningful names to complex nested types used across the workspace.
//!
//! ## Rationale
//!
//! Types like `Rc<RefCell<Option<T>>>` are hard to read at a glance.
//! Aliases give them one name, used the same way across crates, and keep
//! the underlying representation changeable in one place.

use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// SINGLE-THREADED SHARED TYPES (Rc<RefCell<T>>)
// =============================================================================

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// The editing control runs inside an external event loop on one thread;
/// this is the building block for state shared with host callbacks.
pub type Shared<T> = Rc<RefCell<T>>;

/// An optional shared reference, for lazily-initialized shared state.
pub type SharedOption<T> = Rc<RefCell<Option<T>>>;

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// A simple callback with no parameters or return value.
pub type Callback = Box<dyn Fn() + Send + Sync>;

/// A callback that receives a single parameter.
pub type DataCallback<T> = Box<dyn Fn(T) + Send + Sync>;

// =============================================================================
// DYNAMIC DISPATCH TYPES (Box<dyn T>)
// =============================================================================

/// A boxed dynamically-typed iterator.
///
/// Used when the concrete iterator type varies at runtime (e.g. forward
/// vs reverse traversal of a handle list).
pub type BoxedIterator<T> = Box<dyn Iterator<Item = T>>;

// =============================================================================
// CONSTRUCTOR HELPERS
// =============================================================================

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new `SharedOption<T>` initialized to `None`.
#[inline]
pub fn shared_none<T>() -> SharedOption<T> {
    Rc::new(RefCell::new(None))
}
