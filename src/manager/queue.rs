use crate::models::{BarConfig, DurationSpec};

/// One pending display request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    /// Snapshot taken at enqueue time.
    pub config: BarConfig,
    pub duration: DurationSpec,
    pub correlation_id: Option<i32>,
}

/// Ordered display requests plus the play cursor.
///
/// Played entries are not popped; the whole queue is cleared once playback
/// drains it or a caller resets it.
#[derive(Debug, Clone, Default)]
pub struct BarQueue {
    entries: Vec<QueueEntry>,
    cursor: usize,
    /// Bumped by every `clear()`.
    generation: u64,
}

impl BarQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of `config` and return its position.
    pub fn enqueue(
        &mut self,
        config: &BarConfig,
        duration: DurationSpec,
        correlation_id: Option<i32>,
    ) -> usize {
        self.entries.push(QueueEntry {
            config: config.clone(),
            duration,
            correlation_id,
        });
        self.entries.len() - 1
    }

    /// Drop every entry and rewind the cursor. An active presentation is left alone.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.generation += 1;
    }

    /// Changes whenever the queue is cleared, so a position read before a
    /// callback can be checked for staleness afterwards.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&QueueEntry> {
        self.entries.get(index)
    }

    /// Index of the entry playback is on.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
    }

    /// Duration the entry at `index` plays with.
    pub fn resolved_duration(&self, index: usize) -> Option<DurationSpec> {
        let last_index = self.entries.len().checked_sub(1)?;
        self.entry(index)
            .map(|entry| entry.duration.resolve(index, last_index))
    }
}
