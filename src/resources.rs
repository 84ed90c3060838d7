//! Handle-indexed registries for host-side resources
//!
//! One table per resource kind (textures, sounds, fonts). Handles are scoped
//! to the table that issued them and are never reused while live: the table
//! hands out a monotonically increasing id and keeps an explicit map from id
//! to resource, giving O(1) lookup and well-defined unload semantics.

use hashbrown::HashMap;
use tracing::warn;

/// Handle 0 is reserved as the failure sentinel; live handles start at 1.
const FIRST_HANDLE: u32 = 1;

/// Registry mapping small integer handles to host-side resources
pub struct ResourceTable<T> {
    entries: HashMap<u32, T>,
    next_handle: u32,
    kind: &'static str,
}

impl<T> ResourceTable<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            entries: HashMap::new(),
            next_handle: FIRST_HANDLE,
            kind,
        }
    }

    /// The handle the next `insert` will issue.
    ///
    /// Used to synthesize per-resource names (e.g. font family names) before
    /// the resource exists.
    pub fn next_handle(&self) -> u32 {
        self.next_handle
    }

    /// Register a resource and issue its handle
    pub fn insert(&mut self, value: T) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.entries.insert(handle, value);
        handle
    }

    pub fn get(&self, handle: u32) -> Option<&T> {
        self.entries.get(&handle)
    }

    pub fn get_mut(&mut self, handle: u32) -> Option<&mut T> {
        self.entries.get_mut(&handle)
    }

    /// Remove a resource. Unknown handles are a logged no-op, not fatal.
    pub fn remove(&mut self, handle: u32) -> Option<T> {
        let removed = self.entries.remove(&handle);
        if removed.is_none() {
            warn!("unload of unknown {} handle {}", self.kind, handle);
        }
        removed
    }

    pub fn contains(&self, handle: u32) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}
