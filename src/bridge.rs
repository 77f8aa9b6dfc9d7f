//! Engine-to-window event bridge.
//!
//! `EventBridge` consumes normalized [`EngineNotification`]s on the window
//! thread and applies them to the window through the [`WindowOps`] seam.
//! Handlers are idempotent and self-contained: the engine gives no ordering
//! guarantee between different notification kinds, and a failed window
//! mutation is never retried. Nothing in here may propagate an error back
//! toward the engine callback path.

use crate::engine::ipc::Engine;
use crate::engine::{EngineError, EngineNotification, PropertyChange};

/// Window position and size captured at fullscreen entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Window mutation primitives the bridge drives.
///
/// All methods are best-effort: an implementation swallows window-system
/// failures rather than reporting them.
pub trait WindowOps {
    fn set_title(&mut self, title: &str);
    fn resize(&mut self, width: u32, height: u32);
    /// Lock the window's aspect ratio, or release the lock with `None`.
    fn set_aspect_ratio(&mut self, ratio: Option<(u32, u32)>);
    fn set_decorations(&mut self, decorated: bool);
    fn set_maximized(&mut self, maximized: bool);
    fn set_minimized(&mut self, minimized: bool);
    fn set_always_on_top(&mut self, on_top: bool);
    /// Actual monitor attachment, not a cached flag. Querying the window
    /// directly avoids drift when the user toggles fullscreen through the
    /// window manager instead of the engine.
    fn is_fullscreen(&self) -> bool;
    fn geometry(&self) -> Geometry;
    /// Attach to / detach from the primary monitor's native video mode.
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn restore_geometry(&mut self, geometry: Geometry);
    fn request_close(&mut self);
    /// Gate for the input entry points while a client message is dispatched.
    fn set_accepting_input(&mut self, accepting: bool);
}

/// The command/console subsystem that executes scripted client messages.
pub trait CommandSink {
    fn execute(&mut self, args: &[String]) -> anyhow::Result<()>;
}

/// Typed property reads used by handlers that need more than the
/// notification payload (video geometry).
pub trait PropertyReader {
    fn int(&self, name: &str) -> Option<i64>;
}

/// Session state owned by the bridge, mutated only by engine notifications.
#[derive(Debug, Default)]
pub struct WindowState {
    /// Level-triggered: set on every start-of-media, cleared on every end.
    pub file_open: bool,
    /// True while a client message is being dispatched.
    pub render_gui_suspended: bool,
    /// Valid only while fullscreen; written once per entry, consumed once
    /// per exit.
    pub saved_geometry: Option<Geometry>,
}

/// Applies engine notifications to the window.
pub struct EventBridge {
    state: WindowState,
    default_title: String,
}

/// Properties observed at session start. Events (shutdown, start/end of
/// file, video reconfig, client messages) arrive without subscription.
const OBSERVED_PROPERTIES: [&str; 6] = [
    "media-title",
    "border",
    "window-maximized",
    "window-minimized",
    "fullscreen",
    "ontop",
];

impl EventBridge {
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            state: WindowState::default(),
            default_title: default_title.into(),
        }
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn has_file(&self) -> bool {
        self.state.file_open
    }

    /// Subscribe to the engine properties this bridge reacts to. Called once
    /// during session initialization.
    pub fn install(&self, engine: &Engine) -> Result<(), EngineError> {
        for name in OBSERVED_PROPERTIES {
            engine.observe_property(name)?;
        }
        Ok(())
    }

    /// Apply one notification. Runs on the window-owning thread.
    pub fn apply(
        &mut self,
        note: EngineNotification,
        win: &mut dyn WindowOps,
        console: &mut dyn CommandSink,
        props: &dyn PropertyReader,
    ) {
        match note {
            EngineNotification::Shutdown => win.request_close(),

            EngineNotification::VideoReconfig => {
                let width = props.int("dwidth").unwrap_or(0);
                let height = props.int("dheight").unwrap_or(0);
                // Audio-only or pending reconfig reports non-positive
                // dimensions; leave the window alone.
                if width > 0 && height > 0 {
                    win.resize(width as u32, height as u32);
                    win.set_aspect_ratio(Some((width as u32, height as u32)));
                }
            }

            EngineNotification::StartFile => self.state.file_open = true,

            EngineNotification::EndFile => {
                self.state.file_open = false;
                win.set_title(&self.default_title);
                win.set_aspect_ratio(None);
            }

            EngineNotification::ClientMessage(args) => {
                self.state.render_gui_suspended = true;
                win.set_accepting_input(false);
                let result = console.execute(&args);
                self.state.render_gui_suspended = false;
                win.set_accepting_input(true);
                if let Err(e) = result {
                    // Never propagated toward the engine; the session
                    // continues with the flags restored.
                    log::warn!("client message dispatch failed: {e:#}");
                }
            }

            EngineNotification::Property(change) => self.apply_property(change, win),
        }
    }

    fn apply_property(&mut self, change: PropertyChange, win: &mut dyn WindowOps) {
        match change {
            PropertyChange::MediaTitle(title) => win.set_title(&title),
            PropertyChange::Border(enable) => win.set_decorations(enable),
            PropertyChange::Maximized(enable) => win.set_maximized(enable),
            PropertyChange::Minimized(enable) => win.set_minimized(enable),
            PropertyChange::OnTop(enable) => win.set_always_on_top(enable),
            PropertyChange::Fullscreen(enable) => {
                if win.is_fullscreen() == enable {
                    return;
                }
                if enable {
                    self.state.saved_geometry = Some(win.geometry());
                    win.set_fullscreen(true);
                } else {
                    win.set_fullscreen(false);
                    if let Some(geometry) = self.state.saved_geometry.take() {
                        win.restore_geometry(geometry);
                    }
                }
            }
        }
    }
}

impl PropertyReader for Engine {
    // Handlers run while the IPC reader thread is parked in the dispatch
    // hand-off, so a blocking request here would never get its response
    // routed. The cache is fed by the same notification stream.
    fn int(&self, name: &str) -> Option<i64> {
        self.cached_int(name)
    }
}
