// Widget Errors
// Failure cases of the tab width resolver and the state machine

use thiserror::Error;

/// Errors raised by the tab bar core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabsError {
    /// Fixed mode divides the track between the items, which needs at least one
    #[error("cannot resolve tab width: the tab bar has no items")]
    EmptyItems,

    /// The host asked for a tab that does not exist
    #[error("selected index {index} is outside 0..{count}")]
    SelectionOutOfRange { index: isize, count: usize },

    /// A width measurement that cannot describe a track
    #[error("invalid track width {0}")]
    InvalidWidth(f32),
}
