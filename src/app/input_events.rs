//! Input event entry points: translate window input and forward it to the
//! engine, fire-and-forget.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};
use winit::keyboard::PhysicalKey;

use crate::app::{AppState, WindowHandle};
use crate::input::{
    EngineCommand, translate_cursor, translate_drop, translate_key, translate_mouse_button,
    translate_scroll,
};

/// Pixel scroll deltas (touchpads) normalized to wheel lines.
const PIXELS_PER_LINE: f64 = 20.0;

impl AppState {
    fn send(&self, cmd: &EngineCommand) {
        let Some(session) = &self.session else { return };
        if let Err(e) = session.engine.command(&cmd.argv()) {
            log::warn!("engine command '{}' failed: {e}", cmd.verb);
        }
    }

    /// Input is gated while the bridge dispatches a client message.
    fn input_gated(&self) -> bool {
        !self
            .window
            .as_ref()
            .is_some_and(WindowHandle::accepting_input)
    }

    pub(crate) fn on_key(&mut self, event: KeyEvent) {
        if self.input_gated() {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        if let Some(cmd) = translate_key(code, self.mods, event.state, event.repeat) {
            self.send(&cmd);
        }
    }

    pub(crate) fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if self.input_gated() {
            return;
        }
        if let Some(cmd) = translate_mouse_button(button, self.mods, state) {
            self.send(&cmd);
        }
    }

    pub(crate) fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        if self.input_gated() {
            return;
        }
        self.send(&translate_cursor(position.x, position.y));
    }

    pub(crate) fn on_scroll(&mut self, delta: MouseScrollDelta) {
        if self.input_gated() {
            return;
        }
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
            MouseScrollDelta::PixelDelta(delta) => {
                (delta.x / PIXELS_PER_LINE, delta.y / PIXELS_PER_LINE)
            }
        };
        for cmd in translate_scroll(dx, dy) {
            self.send(&cmd);
        }
    }

    /// Forward the batch of dropped files collected this event-loop pass.
    pub(crate) fn flush_drops(&mut self) {
        if self.pending_drops.is_empty() {
            return;
        }
        let paths = std::mem::take(&mut self.pending_drops);
        for cmd in translate_drop(paths) {
            self.send(&cmd);
        }
    }
}
