//! Media engine integration.
//!
//! The engine is an mpv-compatible backend running in its own process,
//! reached over its JSON IPC socket: one-way text commands out, asynchronous
//! event/property-change notifications in, plus request/response typed
//! property reads. `ipc` owns the socket; `process` owns spawning the engine
//! with the session's option set.

pub mod ipc;
pub mod process;

use thiserror::Error;

/// Errors from engine communication.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine socket I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("engine connection closed")]
    Disconnected,
    #[error("malformed engine message: {0}")]
    Protocol(String),
    #[error("engine rejected request: {0}")]
    Rejected(String),
}

/// One asynchronous notification from the engine, normalized from the wire
/// format. The bridge consumes these on the window thread; order between
/// different kinds is not guaranteed, so every reaction must be idempotent.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineNotification {
    /// Engine is shutting down; no further events are expected, but late or
    /// duplicate delivery must be tolerated.
    Shutdown,
    /// Video geometry (possibly) changed; dimensions are read on demand.
    VideoReconfig,
    /// Playback of a file started.
    StartFile,
    /// Playback of the current file ended.
    EndFile,
    /// A scripted command targeting this front-end.
    ClientMessage(Vec<String>),
    /// An observed property changed value.
    Property(PropertyChange),
}

/// Observed property changes the bridge reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyChange {
    MediaTitle(String),
    Border(bool),
    Maximized(bool),
    Minimized(bool),
    Fullscreen(bool),
    OnTop(bool),
}
