//! Process-wide hook for observing contract violations.
//!
//! Contract violations (see [`contract`](crate::contract)) always panic. A
//! violation hook runs right before that panic and receives a
//! [`ContractViolation`] describing what went wrong and where, which makes
//! it the place to forward violations to a crash reporter or a custom log.
//!
//! At most one hook is installed at a time.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use viewref::{
//!     ArrayRef,
//!     hooks::{install_violation_hook, uninstall_violation_hook},
//! };
//!
//! static SEEN: AtomicUsize = AtomicUsize::new(0);
//!
//! install_violation_hook(|_violation: &viewref::contract::ContractViolation| {
//!     SEEN.fetch_add(1, Ordering::Relaxed);
//! })
//! .expect("no hook installed yet");
//!
//! let values = [1, 2, 3];
//! let view = ArrayRef::new(&values);
//! let result = std::panic::catch_unwind(|| view[7]);
//!
//! assert!(result.is_err());
//! assert_eq!(SEEN.load(Ordering::Relaxed), 1);
//! uninstall_violation_hook();
//! ```

mod hook_slot;

use triomphe::Arc;
use unsize::CoerceUnsize;

use self::hook_slot::HookSlot;
use crate::contract::ContractViolation;

/// A callback invoked for every contract violation before it panics.
///
/// Implemented for every `Fn(&ContractViolation) + Send + Sync + 'static`
/// closure.
pub trait ViolationHook: 'static + Send + Sync {
    /// Called with the violation that is about to panic.
    fn on_violation(&self, violation: &ContractViolation);
}

impl<F> ViolationHook for F
where
    F: Fn(&ContractViolation) + Send + Sync + 'static,
{
    #[inline]
    fn on_violation(&self, violation: &ContractViolation) {
        self(violation)
    }
}

static HOOK: HookSlot<Arc<dyn ViolationHook>> = HookSlot::new();

fn into_shared<H: ViolationHook>(hook: H) -> Arc<dyn ViolationHook> {
    Arc::new(hook).unsize(unsize::Coercion!(to dyn ViolationHook))
}

/// Error returned by [`install_violation_hook`] when a hook is already
/// installed.
///
/// Contains the hook that was attempted to be installed, allowing you to
/// recover it if needed.
pub struct HookAlreadyInstalledError(pub Arc<dyn ViolationHook>);

impl core::fmt::Debug for HookAlreadyInstalledError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HookAlreadyInstalledError").finish()
    }
}

impl core::fmt::Display for HookAlreadyInstalledError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "a violation hook is already installed")
    }
}

impl core::error::Error for HookAlreadyInstalledError {}

/// Installs `hook` as the process-wide violation hook.
///
/// Fails with [`HookAlreadyInstalledError`] if a hook is already installed.
/// See [`replace_violation_hook`] to overwrite an existing hook instead.
pub fn install_violation_hook<H>(hook: H) -> Result<(), HookAlreadyInstalledError>
where
    H: ViolationHook,
{
    HOOK.write()
        .try_insert(into_shared(hook))
        .map_err(HookAlreadyInstalledError)
}

/// Installs `hook`, returning the previously installed hook, if any.
pub fn replace_violation_hook<H>(hook: H) -> Option<Arc<dyn ViolationHook>>
where
    H: ViolationHook,
{
    HOOK.write().replace(into_shared(hook))
}

/// Removes the installed violation hook, returning it.
pub fn uninstall_violation_hook() -> Option<Arc<dyn ViolationHook>> {
    HOOK.write().take()
}

/// Passes `violation` to the installed hook, if any.
///
/// The hook runs without the slot locked, so it may uninstall or replace
/// itself.
pub(crate) fn notify(violation: &ContractViolation) {
    if let Some(hook) = HOOK.fetch() {
        hook.on_violation(violation);
    }
}
