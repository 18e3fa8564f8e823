use thiserror::Error;

/// Errors surfaced by the bar manager and its presenter contract.
///
/// Every variant is reported synchronously at the call site. None of them is
/// ever deferred into the queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BarError {
    #[error("No bar registered under store id {0}")]
    UnknownStoreId(u32),

    #[error("Store id must be a positive integer, got {0}")]
    InvalidStoreId(u32),

    #[error("No suitable parent container found in the view hierarchy")]
    NoSuitableParent,

    #[error("Presenter error: {0}")]
    Presenter(String),
}
