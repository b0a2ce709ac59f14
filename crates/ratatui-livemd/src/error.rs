use thiserror::Error;

use crate::decoration::MarkupKind;

/// A [`crate::window::TextWindow`] whose bounds do not describe its text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("window end {end} is before start {start}")]
    Inverted { start: usize, end: usize },
    #[error("window {start}..{end} spans {span} bytes but its text has {text_len}")]
    LengthMismatch {
        start: usize,
        end: usize,
        span: usize,
        text_len: usize,
    },
}

/// Failure of a whole refresh. The previously published decorations stay on screen.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecorationError {
    /// A recognizer produced a candidate outside the window it was scanning.
    #[error(
        "{kind:?} candidate {start}..{end} lies outside the visible window {window_start}..{window_end}"
    )]
    OutOfBoundsCandidate {
        kind: MarkupKind,
        start: usize,
        end: usize,
        window_start: usize,
        window_end: usize,
    },
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Why a replacement could not be turned into a stand-in. Recovered by a raw fallback.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("label is empty")]
    EmptyLabel,
    #[error("label contains control character {0:?}")]
    ControlCharacter(char),
    #[error("link target {0:?} is not usable")]
    InvalidLinkTarget(String),
}
