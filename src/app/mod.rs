//! Application module for par-play
//!
//! This module contains the main application logic, including:
//! - `App`: Entry point that initializes and runs the event loop
//! - `AppState`: Per-session state driven by the winit `ApplicationHandler`
//! - `FrontendConsole`: Executes client messages the engine scripts send us

use std::path::PathBuf;
use std::process::Child;
use std::sync::Arc;

use anyhow::Result;
use winit::event_loop::{ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::ModifiersState;

use crate::bridge::{CommandSink, EventBridge};
use crate::cli::RuntimeOptions;
use crate::config::Config;
use crate::dispatch::Dispatch;
use crate::engine::ipc::Engine;

pub mod handler;
pub mod input_events;
pub mod window;

pub use window::WindowHandle;

/// User event posted to the winit loop when the engine reader thread has
/// queued notifications.
#[derive(Debug, Clone, Copy)]
pub struct EngineWake;

/// Main application entry point
pub struct App {
    config: Config,
    runtime_options: RuntimeOptions,
}

impl App {
    /// Create a new application
    pub fn new(runtime_options: RuntimeOptions) -> Result<Self> {
        let config = Config::load()?;
        Ok(Self {
            config,
            runtime_options,
        })
    }

    /// Run the application
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::<EngineWake>::with_user_event().build()?;
        // Wait for events; the engine renders into the window on its own.
        event_loop.set_control_flow(ControlFlow::Wait);
        let proxy = event_loop.create_proxy();

        let mut state = AppState::new(self.config, self.runtime_options, proxy);
        event_loop.run_app(&mut state)?;
        state.finish()
    }
}

/// Everything one embedded engine session needs to stay alive.
pub(crate) struct Session {
    pub engine: Arc<Engine>,
    pub child: Child,
    pub dispatch: Dispatch,
    pub socket: PathBuf,
}

/// Per-run state owned by the event loop.
pub struct AppState {
    pub(crate) config: Config,
    pub(crate) runtime_options: RuntimeOptions,
    pub(crate) proxy: EventLoopProxy<EngineWake>,
    pub(crate) window: Option<WindowHandle>,
    pub(crate) session: Option<Session>,
    pub(crate) console: Option<FrontendConsole>,
    pub(crate) bridge: EventBridge,
    pub(crate) mods: ModifiersState,
    /// Drops arrive one file per event; batched until `about_to_wait`.
    pub(crate) pending_drops: Vec<PathBuf>,
    pub(crate) quit_sent: bool,
    pub(crate) init_error: Option<anyhow::Error>,
}

impl AppState {
    fn new(
        config: Config,
        runtime_options: RuntimeOptions,
        proxy: EventLoopProxy<EngineWake>,
    ) -> Self {
        let bridge = EventBridge::new(config.window_title.clone());
        Self {
            config,
            runtime_options,
            proxy,
            window: None,
            session: None,
            console: None,
            bridge,
            mods: ModifiersState::empty(),
            pending_drops: Vec::new(),
            quit_sent: false,
            init_error: None,
        }
    }

    /// Tear down the session after the event loop has exited.
    fn finish(mut self) -> Result<()> {
        if let Some(mut session) = self.session.take() {
            // The engine got a quit on close; give it a moment before
            // resorting to a kill.
            let mut exited = false;
            for _ in 0..40 {
                if session.child.try_wait()?.is_some() {
                    exited = true;
                    break;
                }
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            if !exited {
                log::warn!("engine did not exit after quit, killing it");
                let _ = session.child.kill();
                let _ = session.child.wait();
            }
            let _ = std::fs::remove_file(&session.socket);
        }
        match self.init_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Executes client messages addressed to the front-end by engine scripts.
pub struct FrontendConsole {
    engine: Arc<Engine>,
}

impl FrontendConsole {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

impl CommandSink for FrontendConsole {
    fn execute(&mut self, args: &[String]) -> Result<()> {
        let (verb, rest) = args
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("empty client message"))?;
        match verb.as_str() {
            // script-message open <paths...>
            "open" => {
                if rest.is_empty() {
                    anyhow::bail!("open: no paths given");
                }
                for (i, path) in rest.iter().enumerate() {
                    let mode = if i == 0 { "replace" } else { "append-play" };
                    self.engine.command(&["loadfile", path, mode])?;
                }
                Ok(())
            }
            "play-pause" => Ok(self.engine.command(&["cycle", "pause"])?),
            "fullscreen" => Ok(self.engine.command(&["cycle", "fullscreen"])?),
            other => anyhow::bail!("unknown client message '{other}'"),
        }
    }
}
