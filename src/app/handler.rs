//! winit `ApplicationHandler` implementation and session startup.
//!
//! `resumed` creates the window, launches the engine embedded into it, and
//! connects the IPC session. After that the handler is a router: window
//! events go through the input translator to the engine, engine wakes drain
//! the dispatch queue through the bridge.

use std::path::Path;
use std::process::Child;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::app::{AppState, EngineWake, FrontendConsole, Session, WindowHandle};
use crate::config::Config;
use crate::dispatch::Dispatch;
use crate::engine::ipc::Engine;
use crate::engine::process::{self, LaunchSpec};

const CONNECT_ATTEMPTS: u32 = 100;
const CONNECT_INTERVAL: Duration = Duration::from_millis(50);

impl AppState {
    fn init_session(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(&self.config.window_title)
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);
        let wid = native_window_id(&window).context("engine embedding needs an X11 window")?;
        self.window = Some(WindowHandle::new(Arc::clone(&window)));

        let socket = std::env::temp_dir().join(format!("par-play-{}.sock", std::process::id()));
        let mut options = self.config.engine_options();
        options.extend(self.runtime_options.options.iter().cloned());
        let use_engine_config =
            self.config.use_engine_config || self.runtime_options.use_engine_config;
        let spec = LaunchSpec {
            binary: self.config.engine_binary.clone(),
            socket: socket.clone(),
            wid,
            config_dir: (!use_engine_config).then(Config::config_dir),
            options,
        };
        log::info!("launching engine '{}'", spec.binary);
        let mut child = process::spawn_engine(&spec)
            .with_context(|| format!("failed to launch engine binary '{}'", spec.binary))?;

        // The proxy is Send but not Sync; the waker contract wants both.
        let proxy = parking_lot::Mutex::new(self.proxy.clone());
        let dispatch = Dispatch::new(move || {
            // Fails only once the loop is gone; nothing left to wake then.
            let _ = proxy.lock().send_event(EngineWake);
        });

        // Until a Session exists, the spawned engine is this function's to
        // clean up: it was launched with an idle playlist and outlives a
        // plain Child drop.
        let engine = match self.prime_session(&socket, &mut child, dispatch.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                abort_startup(child, &socket);
                return Err(e);
            }
        };

        self.console = Some(FrontendConsole::new(Arc::clone(&engine)));
        self.session = Some(Session {
            engine,
            child,
            dispatch,
            socket,
        });
        Ok(())
    }

    /// Connect the IPC session and put the engine into its ready state:
    /// property subscriptions, reserved bindings, initial playlist.
    fn prime_session(
        &self,
        socket: &Path,
        child: &mut Child,
        dispatch: Dispatch,
    ) -> Result<Arc<Engine>> {
        let engine = Arc::new(connect_with_retry(socket, child, dispatch)?);
        self.bridge.install(&engine)?;
        // Right-click stays with the front-end instead of the engine's
        // default bindings.
        engine.command(&["keybind", "MBTN_RIGHT", "ignore"])?;
        for path in &self.runtime_options.paths {
            engine.command(&["loadfile", path, "append-play"])?;
        }
        Ok(engine)
    }

    /// Drain queued engine notifications through the bridge. Runs on the
    /// event-loop thread; each drained producer is unblocked in turn.
    pub(crate) fn drain_engine_events(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = &self.session else { return };
        let dispatch = session.dispatch.clone();
        let engine = Arc::clone(&session.engine);
        let (Some(win), Some(console)) = (self.window.as_mut(), self.console.as_mut()) else {
            return;
        };
        let bridge = &mut self.bridge;
        dispatch.drain(|note| bridge.apply(note, &mut *win, &mut *console, engine.as_ref()));
        if win.close_requested() {
            event_loop.exit();
        }
    }

    fn handle_close(&mut self, event_loop: &ActiveEventLoop) {
        match &self.session {
            // Ask the engine to quit; its shutdown notification closes the
            // loop, so playback state (watch-later) is saved properly.
            Some(session) if !self.quit_sent => {
                self.quit_sent = true;
                if session.engine.command(&["quit"]).is_err() {
                    event_loop.exit();
                }
            }
            _ => event_loop.exit(),
        }
    }
}

fn connect_with_retry(socket: &Path, child: &mut Child, dispatch: Dispatch) -> Result<Engine> {
    for _ in 0..CONNECT_ATTEMPTS {
        if let Some(report) = process::startup_failure(child)? {
            bail!("{report}");
        }
        match Engine::connect(socket, dispatch.clone()) {
            Ok(engine) => return Ok(engine),
            Err(e) => log::trace!("engine socket not ready: {e}"),
        }
        std::thread::sleep(CONNECT_INTERVAL);
    }
    bail!("engine did not open its IPC socket in time");
}

/// Tear down an engine that never became a `Session`: terminate it and
/// remove its socket, since `finish` will not see it.
fn abort_startup(mut child: Child, socket: &Path) {
    let _ = child.kill();
    let _ = child.wait();
    let _ = std::fs::remove_file(socket);
}

/// Native handle the engine can render into via its window-embedding option.
/// The IPC transport is a Unix socket, so only X11 handles qualify.
fn native_window_id(window: &Window) -> Option<u64> {
    match window.window_handle().ok()?.as_raw() {
        RawWindowHandle::Xlib(handle) => Some(handle.window as u64),
        RawWindowHandle::Xcb(handle) => Some(u64::from(handle.window.get())),
        _ => None,
    }
}

impl ApplicationHandler<EngineWake> for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && let Err(e) = self.init_session(event_loop)
        {
            log::error!("session startup failed: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.handle_close(event_loop),
            WindowEvent::ModifiersChanged(mods) => self.mods = mods.state(),
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event),
            WindowEvent::MouseInput { state, button, .. } => self.on_mouse_button(button, state),
            WindowEvent::CursorMoved { position, .. } => self.on_cursor_moved(position),
            WindowEvent::MouseWheel { delta, .. } => self.on_scroll(delta),
            WindowEvent::DroppedFile(path) => self.pending_drops.push(path),
            WindowEvent::Resized(size) => {
                if let Some(win) = &self.window {
                    win.enforce_aspect(size);
                }
            }
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, _event: EngineWake) {
        self.drain_engine_events(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_drops();
        if self
            .window
            .as_ref()
            .is_some_and(WindowHandle::close_requested)
        {
            event_loop.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::{Command, Stdio};

    #[test]
    fn aborted_startup_terminates_engine_and_removes_socket() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("engine.sock");
        std::fs::write(&socket, b"").unwrap();

        // Stand-in for an engine that came up but never finished priming.
        let child = Command::new("sleep")
            .arg("30")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .unwrap();
        let pid = child.id();

        abort_startup(child, &socket);

        assert!(!socket.exists());
        #[cfg(target_os = "linux")]
        assert!(
            !std::path::Path::new(&format!("/proc/{pid}")).exists(),
            "engine process {pid} still running after aborted startup"
        );
        #[cfg(not(target_os = "linux"))]
        let _ = pid;
    }
}
