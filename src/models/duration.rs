use std::time::Duration;

/// Display time of a short bar.
pub const SHORT_DURATION: Duration = Duration::from_millis(1500);

/// Display time of a long bar.
pub const LONG_DURATION: Duration = Duration::from_millis(2750);

/// Requested display duration of a queued bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationSpec {
    #[default]
    Short,
    Long,
    /// Stays until dismissed explicitly or by the user.
    Indefinite,
    /// Explicit positive millisecond count.
    Millis(u64),
}

impl DurationSpec {
    pub fn is_indefinite(self) -> bool {
        matches!(self, DurationSpec::Indefinite)
    }

    /// Wall-clock duration, or `None` for indefinite bars.
    pub fn as_duration(self) -> Option<Duration> {
        match self {
            DurationSpec::Short => Some(SHORT_DURATION),
            DurationSpec::Long => Some(LONG_DURATION),
            DurationSpec::Indefinite => None,
            DurationSpec::Millis(ms) => Some(Duration::from_millis(ms)),
        }
    }

    /// Resolve the duration for the entry at `index` in a queue whose last
    /// entry sits at `last_index`.
    ///
    /// An indefinite entry that is not last would block everything queued
    /// after it, so it plays as `Short` instead.
    pub fn resolve(self, index: usize, last_index: usize) -> DurationSpec {
        if self.is_indefinite() && index != last_index {
            DurationSpec::Short
        } else {
            self
        }
    }
}
