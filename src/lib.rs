// Library exports for testing and potential library use

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod debug;
pub mod dispatch;
pub mod engine;
pub mod input {
    //! Input translation re-exports from the par-play-input crate.
    pub use par_play_input::{
        EngineCommand, keymap, translate_cursor, translate_drop, translate_key,
        translate_mouse_button, translate_scroll,
    };
}
