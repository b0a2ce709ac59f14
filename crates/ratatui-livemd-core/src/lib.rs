//! `ratatui-livemd-core` provides the editing-surface building blocks used by `ratatui-livemd`.
//!
//! The crate is independent of markdown: it offers a backend-agnostic input model, viewport
//! state, clipped span painting, a shared [`theme::Theme`], and [`textarea::TextArea`], a
//! multi-line editor that reports its content as UTF-8 byte offsets.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - Hosts decorate without mutating: [`textarea::TextArea::render_rows_ref`] lets a caller paint
//!   each visible row itself while the raw text stays in the buffer.
//!
//! Enable the `crossterm` feature to convert `crossterm` events with `TryFrom`.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod render;
pub mod textarea;
pub mod viewport;
