/*
 * Maps native window handles to the objects that own their behavior. Native
 * callbacks only receive a handle; the dispatcher recovers the typed target
 * through this table. Entries are weak: the registry never keeps a control
 * alive, and a lookup for a dropped control yields `None`.
 */
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::error::{PlatformError, Result};
use crate::types::NativeHandle;

pub struct ControlRegistry<T: ?Sized> {
    entries: HashMap<NativeHandle, Weak<T>>,
}

impl<T: ?Sized> Default for ControlRegistry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: ?Sized> ControlRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: NativeHandle, target: &Rc<T>) -> Result<()> {
        if handle.is_null() {
            return Err(PlatformError::Precondition(
                "cannot register a null window handle".to_string(),
            ));
        }
        if self.entries.contains_key(&handle) {
            log::error!("[Registry] handle {handle:?} is already registered");
            return Err(PlatformError::InvariantViolation(format!(
                "handle {handle:?} registered twice"
            )));
        }
        self.entries.insert(handle, Rc::downgrade(target));
        log::trace!("[Registry] registered {handle:?}, {} entries", self.entries.len());
        Ok(())
    }

    pub fn lookup(&self, handle: NativeHandle) -> Option<Rc<T>> {
        self.entries.get(&handle).and_then(Weak::upgrade)
    }

    pub fn contains(&self, handle: NativeHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /*
     * Removes the entry and hands back whatever it still pointed at, so the
     * caller can tell a clean teardown (dead weak) from a leak (live target).
     */
    pub(crate) fn unregister(&mut self, handle: NativeHandle) -> Option<Weak<T>> {
        let removed = self.entries.remove(&handle);
        if removed.is_some() {
            log::trace!("[Registry] unregistered {handle:?}");
        }
        removed
    }

    /* Snapshot of every target still alive, taken so callers can release the borrow. */
    pub fn live_targets(&self) -> Vec<(NativeHandle, Rc<T>)> {
        let mut targets: Vec<(NativeHandle, Rc<T>)> = self
            .entries
            .iter()
            .filter_map(|(handle, weak)| weak.upgrade().map(|t| (*handle, t)))
            .collect();
        targets.sort_by_key(|(handle, _)| *handle);
        targets
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_an_invariant_violation() {
        let mut registry: ControlRegistry<String> = ControlRegistry::new();
        let target = Rc::new("button".to_string());
        registry.register(NativeHandle(7), &target).unwrap();

        let err = registry.register(NativeHandle(7), &target).unwrap_err();

        assert!(matches!(err, PlatformError::InvariantViolation(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_after_unregister_is_none() {
        let mut registry: ControlRegistry<String> = ControlRegistry::new();
        let target = Rc::new("edit".to_string());
        registry.register(NativeHandle(3), &target).unwrap();
        assert_eq!(registry.lookup(NativeHandle(3)).as_deref(), Some(&"edit".to_string()));

        let removed = registry.unregister(NativeHandle(3));

        assert!(removed.is_some());
        assert!(registry.lookup(NativeHandle(3)).is_none());
        assert!(registry.unregister(NativeHandle(3)).is_none());
    }

    #[test]
    fn dropped_target_looks_up_as_none_but_stays_registered() {
        let mut registry: ControlRegistry<String> = ControlRegistry::new();
        let target = Rc::new("radio".to_string());
        registry.register(NativeHandle(9), &target).unwrap();

        drop(target);

        assert!(registry.lookup(NativeHandle(9)).is_none());
        assert!(registry.contains(NativeHandle(9)));
        assert!(registry.live_targets().is_empty());
    }

    #[test]
    fn null_handle_is_rejected() {
        let mut registry: ControlRegistry<String> = ControlRegistry::new();
        let target = Rc::new(String::new());
        let err = registry.register(NativeHandle::NULL, &target).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn registry_accepts_trait_objects() {
        trait Named {
            fn name(&self) -> &'static str;
        }
        struct Thing;
        impl Named for Thing {
            fn name(&self) -> &'static str {
                "thing"
            }
        }
        let mut registry: ControlRegistry<dyn Named> = ControlRegistry::new();
        let target: Rc<dyn Named> = Rc::new(Thing);
        registry.register(NativeHandle(1), &target).unwrap();
        assert_eq!(registry.lookup(NativeHandle(1)).map(|t| t.name()), Some("thing"));
    }
}
