use crate::error::BarError;
use crate::models::BarConfig;
use indexmap::IndexMap;

/// Reusable bar configurations registered under caller-chosen ids.
///
/// Entries live until overwritten or until the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: IndexMap<u32, BarConfig>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `config` under `id`, replacing any previous entry.
    pub fn put(&mut self, config: BarConfig, id: u32) -> Result<(), BarError> {
        if id == 0 {
            return Err(BarError::InvalidStoreId(id));
        }
        self.items.insert(id, config);
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&BarConfig> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut BarConfig> {
        self.items.get_mut(&id)
    }

    /// Like [`get`](Self::get), but a missing id is an error naming the id.
    pub fn require(&self, id: u32) -> Result<&BarConfig, BarError> {
        self.get(id).ok_or(BarError::UnknownStoreId(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registered ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.keys().copied()
    }
}
