//! Window ownership and the [`WindowOps`] implementation.
//!
//! Wraps the winit window together with the front-end-side flags the bridge
//! toggles. All mutations are best-effort; window-system refusals (tiling
//! WMs, Wayland restrictions) are logged and dropped.

use std::sync::Arc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::{Fullscreen, Window, WindowLevel};

use crate::bridge::{Geometry, WindowOps};

pub struct WindowHandle {
    window: Arc<Window>,
    /// Width/height ratio enforced on resize; winit has no native aspect
    /// constraint, so `enforce_aspect` corrects after the fact.
    aspect: Option<(u32, u32)>,
    accepting_input: bool,
    close_requested: bool,
}

impl WindowHandle {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            aspect: None,
            accepting_input: true,
            close_requested: false,
        }
    }

    pub fn accepting_input(&self) -> bool {
        self.accepting_input
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Re-apply the locked aspect ratio after a user resize. The corrected
    /// request triggers another `Resized` which then matches and stops the
    /// cycle.
    pub fn enforce_aspect(&self, size: PhysicalSize<u32>) {
        let Some((num, den)) = self.aspect else { return };
        if self.window.fullscreen().is_some() || size.width == 0 || den == 0 {
            return;
        }
        let want_height = (u64::from(size.width) * u64::from(den) / u64::from(num)) as u32;
        if want_height != 0 && want_height != size.height {
            let _ = self
                .window
                .request_inner_size(PhysicalSize::new(size.width, want_height));
        }
    }
}

impl WindowOps for WindowHandle {
    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn resize(&mut self, width: u32, height: u32) {
        let _ = self
            .window
            .request_inner_size(PhysicalSize::new(width, height));
    }

    fn set_aspect_ratio(&mut self, ratio: Option<(u32, u32)>) {
        self.aspect = ratio;
    }

    fn set_decorations(&mut self, decorated: bool) {
        self.window.set_decorations(decorated);
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.window.set_maximized(maximized);
    }

    fn set_minimized(&mut self, minimized: bool) {
        self.window.set_minimized(minimized);
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        let level = if on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        self.window.set_window_level(level);
    }

    fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    fn geometry(&self) -> Geometry {
        let position = self
            .window
            .outer_position()
            .unwrap_or(PhysicalPosition::new(0, 0));
        let size = self.window.inner_size();
        Geometry {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if !fullscreen {
            self.window.set_fullscreen(None);
            return;
        }
        // Prefer the primary monitor's best exclusive mode, falling back to
        // borderless where the platform exposes no modes.
        let mode = self.window.primary_monitor().and_then(|monitor| {
            monitor
                .video_modes()
                .max_by_key(|mode| (mode.size().width, mode.size().height, mode.refresh_rate_millihertz()))
        });
        match mode {
            Some(mode) => self.window.set_fullscreen(Some(Fullscreen::Exclusive(mode))),
            None => self.window.set_fullscreen(Some(Fullscreen::Borderless(None))),
        }
    }

    fn restore_geometry(&mut self, geometry: Geometry) {
        self.window
            .set_outer_position(PhysicalPosition::new(geometry.x, geometry.y));
        let _ = self
            .window
            .request_inner_size(PhysicalSize::new(geometry.width, geometry.height));
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn set_accepting_input(&mut self, accepting: bool) {
        self.accepting_input = accepting;
    }
}
