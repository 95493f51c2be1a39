use marquee_types::Cursor;
use thiserror::Error;

/// Recoverable conditions hit while applying focus or scroll effects.
///
/// None of these are fatal. The navigator logs them and skips the effect that
/// could not be applied; the cursor update itself always stands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// The cursor points at a position with no backing item, typically a row
    /// whose content is still loading.
    #[error("no item at {0}")]
    MissingTarget(Cursor),
    /// A bounding box came back zero sized, usually because the element has
    /// not been laid out yet.
    #[error("geometry for row {row} is not laid out")]
    StaleGeometry { row: usize },
}
