//! Live inline markdown decorations for `ratatui` editing surfaces.
//!
//! The raw markdown stays in the editor buffer. On every edit or scroll the visible slice is
//! scanned, overlapping matches are resolved, and each surviving span is painted as a styled
//! stand-in (`**bold**` shows as **bold**, `[docs](url)` as an activatable `docs`).
//!
//! ## Layers
//!
//! - [`matcher`], [`resolver`], [`widget`]: pure functions of a [`window::TextWindow`].
//! - [`refresh::RefreshController`]: runs the pipeline for any [`refresh::HostSurface`] and
//!   publishes complete [`decoration::PublishedDecorations`] generations.
//! - [`editor::LiveMarkdownEditor`]: a ready-made host built on
//!   [`ratatui_livemd_core::textarea::TextArea`].
//!
//! The crate logs through `tracing` and never installs a subscriber.
pub mod decoration;
pub mod editor;
pub mod error;
pub mod matcher;
pub mod options;
pub mod refresh;
pub mod resolver;
pub mod widget;
pub mod window;

pub use decoration::DecorationSet;
pub use decoration::MarkupKind;
pub use decoration::PublishedDecorations;
pub use editor::EditorAction;
pub use editor::LiveMarkdownEditor;
pub use editor::LiveMarkdownEditorOptions;
pub use error::DecorationError;
pub use options::DecorationMode;
pub use options::DecorationOptions;
pub use refresh::HostSurface;
pub use refresh::RefreshController;
pub use window::TextWindow;
