use std::cell::Cell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::{foundation::core::Rect, gallery::item::ItemKey};

/// Anything whose live screen rectangle can be read (CSS pixels, viewport coordinates).
pub trait Measure {
    /// `None` while the element is not laid out.
    fn bounding_rect(&self) -> Option<Rect>;
}

/// Headless placeholder element; layout writes its rect, consumers read it.
#[derive(Debug, Default)]
pub struct SlotElement {
    rect: Cell<Option<Rect>>,
}

impl SlotElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rect(rect: Rect) -> Self {
        Self {
            rect: Cell::new(Some(rect)),
        }
    }

    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(Some(rect));
    }

    pub fn clear(&self) {
        self.rect.set(None);
    }
}

impl Measure for SlotElement {
    fn bounding_rect(&self) -> Option<Rect> {
        self.rect.get()
    }
}

/// Weak association from item identity to its current placeholder element.
///
/// The registry never keeps an element alive: when the owner drops it, lookups return `None`
/// even before `unregister` runs.
#[derive(Default)]
pub struct AnchorRegistry {
    slots: HashMap<ItemKey, Weak<dyn Measure>>,
}

impl std::fmt::Debug for AnchorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.slots.keys().map(ItemKey::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("AnchorRegistry").field("keys", &keys).finish()
    }
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `key` at `anchor`, replacing any previous element.
    pub fn register(&mut self, key: ItemKey, anchor: &Rc<dyn Measure>) {
        self.slots.insert(key, Rc::downgrade(anchor));
    }

    /// Remove `key` only if it still points at `anchor`.
    ///
    /// A late unmount of an old element must not clobber a newer registration.
    pub fn unregister(&mut self, key: &ItemKey, anchor: &Rc<dyn Measure>) -> bool {
        let same = self
            .slots
            .get(key)
            .is_some_and(|w| std::ptr::addr_eq(w.as_ptr(), Rc::as_ptr(anchor)));
        if same {
            self.slots.remove(key);
        }
        same
    }

    /// Measure the element currently registered for `key`.
    pub fn measure(&self, key: &ItemKey) -> Option<Rect> {
        self.slots
            .get(key)
            .and_then(Weak::upgrade)
            .and_then(|a| a.bounding_rect())
    }

    pub fn is_mounted(&self, key: &ItemKey) -> bool {
        self.slots.get(key).is_some_and(|w| w.strong_count() > 0)
    }

    /// Drop entries whose element no longer exists.
    pub fn prune(&mut self) {
        self.slots.retain(|_, w| w.strong_count() > 0);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anchor/registry.rs"]
mod tests;
