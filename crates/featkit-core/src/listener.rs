//! Modification listener interface
//!
//! Defines the listener trait for feature-modification lifecycle callbacks

use crate::feature::Feature;

/// Handle for a registered modification listener.
///
/// Uniquely identifies a listener registration. Can be used to remove the
/// listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifyListenerHandle(pub u64);

/// Listener trait for feature-modification lifecycle callbacks
///
/// Implement this trait to be notified as features enter and leave
/// editing. Callbacks run synchronously inside the pointer handlers that
/// trigger them, so they should return quickly.
pub trait ModifyListener {
    /// Called when a feature enters editing and its handles materialize
    fn on_modification_start(&self, _feature: &Feature) {}

    /// Called when a drag on the feature completes
    fn on_modification(&self, _feature: &Feature) {}

    /// Called when the feature leaves editing
    fn on_modification_end(&self, _feature: &Feature) {}
}
