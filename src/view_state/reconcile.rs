use std::collections::HashMap;

use super::Keyed;

/// Server truth plus tentative local patches.
///
/// Patches are shown immediately through [`Reconciling::view`] but are never
/// treated as final: the next [`Reconciling::reconcile`] replaces everything
/// with what the server returned.
pub struct Reconciling<T: Keyed> {
    confirmed: Vec<T>,
    tentative: HashMap<T::Key, T>,
    // Patch keys in the order they were first patched
    order: Vec<T::Key>,
}

impl<T: Keyed> Default for Reconciling<T> {
    fn default() -> Self {
        Self {
            confirmed: Vec::new(),
            tentative: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Keyed + Clone> Reconciling<T> {
    pub fn new(confirmed: Vec<T>) -> Self {
        Self {
            confirmed,
            tentative: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Overlay a tentative version of one record
    pub fn patch(&mut self, item: T) {
        self.insert_tentative(item.key(), item);
    }

    fn insert_tentative(&mut self, key: T::Key, item: T) {
        if self.tentative.insert(key.clone(), item).is_none() {
            self.order.push(key);
        }
    }

    /// Tentatively modify the record with `key`; false if it is unknown
    pub fn patch_with(&mut self, key: &T::Key, edit: impl FnOnce(&mut T)) -> bool {
        let current = self
            .tentative
            .get(key)
            .or_else(|| self.confirmed.iter().find(|item| item.key() == *key))
            .cloned();

        match current {
            Some(mut item) => {
                edit(&mut item);
                self.insert_tentative(key.clone(), item);
                true
            }
            None => false,
        }
    }

    /// Drop a tentative patch, falling back to the confirmed record
    pub fn discard(&mut self, key: &T::Key) {
        if self.tentative.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    /// Put back a patch captured earlier with [`Reconciling::tentative`];
    /// `None` means there was no patch and the record reverts to confirmed
    pub fn restore(&mut self, key: &T::Key, previous: Option<T>) {
        match previous {
            Some(item) => self.insert_tentative(key.clone(), item),
            None => self.discard(key),
        }
    }

    /// Replace server truth and forget every tentative patch
    pub fn reconcile(&mut self, server: Vec<T>) {
        self.confirmed = server;
        self.tentative.clear();
        self.order.clear();
    }

    /// Confirmed records with tentative patches applied; tentative records
    /// the server has not returned yet are appended
    pub fn view(&self) -> Vec<T> {
        let mut items: Vec<T> = self
            .confirmed
            .iter()
            .map(|item| self.tentative.get(&item.key()).unwrap_or(item).clone())
            .collect();

        for key in &self.order {
            if self.confirmed.iter().any(|c| c.key() == *key) {
                continue;
            }
            if let Some(item) = self.tentative.get(key) {
                items.push(item.clone());
            }
        }
        items
    }

    pub fn confirmed(&self) -> &[T] {
        &self.confirmed
    }

    pub fn tentative(&self, key: &T::Key) -> Option<&T> {
        self.tentative.get(key)
    }

    pub fn is_tentative(&self, key: &T::Key) -> bool {
        self.tentative.contains_key(key)
    }

    pub fn has_pending(&self) -> bool {
        !self.tentative.is_empty()
    }
}
