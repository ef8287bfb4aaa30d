//! A generic connected-client set: take a snapshot of handles under the
//! lock, send outside the lock, then remove whatever failed under the lock
//! again (spec §9 "Thread safety around client sets").

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub type ClientId = u64;

#[derive(Debug)]
pub struct ClientSet<T: Clone> {
    next_id: AtomicU64,
    clients: Mutex<HashMap<ClientId, T>>,
}

impl<T: Clone> Default for ClientSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ClientSet<T> {
    #[must_use]
    pub fn new() -> Self {
        ClientSet {
            next_id: AtomicU64::new(1),
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, client: T) -> ClientId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.clients
            .lock()
            .expect("client set mutex poisoned")
            .insert(id, client);
        id
    }

    pub fn remove(&self, id: ClientId) -> Option<T> {
        self.clients
            .lock()
            .expect("client set mutex poisoned")
            .remove(&id)
    }

    pub fn remove_many(&self, ids: &[ClientId]) {
        if ids.is_empty() {
            return;
        }
        let mut guard = self.clients.lock().expect("client set mutex poisoned");
        for id in ids {
            guard.remove(id);
        }
    }

    /// Clone every current handle under the lock, then hand the caller a
    /// plain `Vec` to iterate and send over outside the lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(ClientId, T)> {
        self.clients
            .lock()
            .expect("client set mutex poisoned")
            .iter()
            .map(|(id, client)| (*id, client.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.lock().expect("client set mutex poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn snapshot_then_remove_drops_only_failed_clients() {
        let set: ClientSet<Arc<i32>> = ClientSet::new();
        let a = set.insert(Arc::new(1));
        let b = set.insert(Arc::new(2));
        assert_eq!(set.len(), 2);

        let snapshot = set.snapshot();
        assert_eq!(snapshot.len(), 2);

        set.remove_many(&[a]);
        assert_eq!(set.len(), 1);
        assert!(set.remove(b).is_some());
        assert!(set.is_empty());
    }
}
