//! Input command generation for par-play.
//!
//! Converts winit keyboard/mouse/scroll/cursor/drop events into the media
//! engine's textual command protocol (`keydown Ctrl+q`, `mouse 120 80`,
//! `loadfile a.mkv replace`, ...). Everything here is a pure lookup over
//! fixed tables: no state, no I/O, no failure modes. Input the engine has
//! no binding for simply produces no command, leaving the engine's own
//! default bindings in charge.

pub mod keymap;
mod translate;

pub use translate::{
    EngineCommand, translate_cursor, translate_drop, translate_key, translate_mouse_button,
    translate_scroll,
};
