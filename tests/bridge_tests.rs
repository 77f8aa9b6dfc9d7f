// Event bridge tests
//
// Drives the bridge through mock window/console/property seams and checks
// the resulting window mutations and session state. Notification ordering
// and duplicate delivery mirror what the engine actually produces.

use par_play::bridge::{
    CommandSink, EventBridge, Geometry, PropertyReader, WindowOps,
};
use par_play::engine::{EngineNotification, PropertyChange};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Title(String),
    Resize(u32, u32),
    Aspect(Option<(u32, u32)>),
    Decorations(bool),
    Maximized(bool),
    Minimized(bool),
    OnTop(bool),
    Fullscreen(bool),
    Restore(Geometry),
    Close,
    AcceptInput(bool),
}

#[derive(Default)]
struct MockWindow {
    calls: Vec<Call>,
    fullscreen: bool,
    geometry: Geometry,
}

impl MockWindow {
    fn at(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }
}

impl WindowOps for MockWindow {
    fn set_title(&mut self, title: &str) {
        self.calls.push(Call::Title(title.to_string()));
    }
    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Resize(width, height));
    }
    fn set_aspect_ratio(&mut self, ratio: Option<(u32, u32)>) {
        self.calls.push(Call::Aspect(ratio));
    }
    fn set_decorations(&mut self, decorated: bool) {
        self.calls.push(Call::Decorations(decorated));
    }
    fn set_maximized(&mut self, maximized: bool) {
        self.calls.push(Call::Maximized(maximized));
    }
    fn set_minimized(&mut self, minimized: bool) {
        self.calls.push(Call::Minimized(minimized));
    }
    fn set_always_on_top(&mut self, on_top: bool) {
        self.calls.push(Call::OnTop(on_top));
    }
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
    fn geometry(&self) -> Geometry {
        self.geometry
    }
    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
        self.calls.push(Call::Fullscreen(fullscreen));
    }
    fn restore_geometry(&mut self, geometry: Geometry) {
        self.calls.push(Call::Restore(geometry));
    }
    fn request_close(&mut self) {
        self.calls.push(Call::Close);
    }
    fn set_accepting_input(&mut self, accepting: bool) {
        self.calls.push(Call::AcceptInput(accepting));
    }
}

#[derive(Default)]
struct RecordingConsole {
    executed: Vec<Vec<String>>,
    fail: bool,
}

impl CommandSink for RecordingConsole {
    fn execute(&mut self, args: &[String]) -> anyhow::Result<()> {
        self.executed.push(args.to_vec());
        if self.fail {
            anyhow::bail!("boom");
        }
        Ok(())
    }
}

struct FixedProps {
    dwidth: Option<i64>,
    dheight: Option<i64>,
}

impl PropertyReader for FixedProps {
    fn int(&self, name: &str) -> Option<i64> {
        match name {
            "dwidth" => self.dwidth,
            "dheight" => self.dheight,
            _ => None,
        }
    }
}

const NO_PROPS: FixedProps = FixedProps {
    dwidth: None,
    dheight: None,
};

fn apply(
    bridge: &mut EventBridge,
    win: &mut MockWindow,
    console: &mut RecordingConsole,
    props: &FixedProps,
    note: EngineNotification,
) {
    bridge.apply(note, win, console, props);
}

#[test]
fn media_title_updates_window_title() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole::default();
    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Property(PropertyChange::MediaTitle("movie.mkv".to_string())),
    );
    assert_eq!(win.calls, vec![Call::Title("movie.mkv".to_string())]);
}

#[test]
fn end_of_file_restores_default_title_and_releases_aspect() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole::default();

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::StartFile,
    );
    assert!(bridge.has_file());

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::EndFile,
    );
    assert!(!bridge.has_file());
    assert_eq!(
        win.calls,
        vec![Call::Title("par-play".to_string()), Call::Aspect(None)]
    );
}

#[test]
fn end_of_file_without_start_is_tolerated() {
    // The engine does not guarantee ordering; a bare end-of-file still
    // resets the title.
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole::default();
    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::EndFile,
    );
    assert!(!bridge.has_file());
    assert_eq!(win.calls[0], Call::Title("par-play".to_string()));
}

#[test]
fn video_reconfig_resizes_and_locks_aspect() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole::default();
    let props = FixedProps {
        dwidth: Some(1920),
        dheight: Some(1080),
    };
    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &props,
        EngineNotification::VideoReconfig,
    );
    assert_eq!(
        win.calls,
        vec![Call::Resize(1920, 1080), Call::Aspect(Some((1920, 1080)))]
    );
}

#[test]
fn audio_only_reconfig_leaves_window_alone() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole::default();
    let props = FixedProps {
        dwidth: Some(0),
        dheight: Some(0),
    };
    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &props,
        EngineNotification::VideoReconfig,
    );
    assert!(win.calls.is_empty());

    // Missing dimensions behave the same.
    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::VideoReconfig,
    );
    assert!(win.calls.is_empty());
}

#[test]
fn fullscreen_round_trip_saves_and_restores_geometry() {
    let mut bridge = EventBridge::new("par-play");
    let windowed = Geometry {
        x: 40,
        y: 60,
        width: 1280,
        height: 720,
    };
    let mut win = MockWindow::at(windowed);
    let mut console = RecordingConsole::default();

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Property(PropertyChange::Fullscreen(true)),
    );
    assert_eq!(win.calls, vec![Call::Fullscreen(true)]);
    assert_eq!(bridge.state().saved_geometry, Some(windowed));

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Property(PropertyChange::Fullscreen(false)),
    );
    assert_eq!(
        win.calls,
        vec![
            Call::Fullscreen(true),
            Call::Fullscreen(false),
            Call::Restore(windowed)
        ]
    );
    // Consumed exactly once.
    assert_eq!(bridge.state().saved_geometry, None);
}

#[test]
fn repeated_fullscreen_entry_keeps_the_first_saved_geometry() {
    let mut bridge = EventBridge::new("par-play");
    let windowed = Geometry {
        x: 10,
        y: 20,
        width: 800,
        height: 450,
    };
    let mut win = MockWindow::at(windowed);
    let mut console = RecordingConsole::default();

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Property(PropertyChange::Fullscreen(true)),
    );
    assert_eq!(bridge.state().saved_geometry, Some(windowed));

    // The engine re-asserts fullscreen while the window now reports the
    // monitor's geometry; the capture from the first entry must survive
    // so the eventual exit restores the windowed placement.
    win.geometry = Geometry {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
    };
    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Property(PropertyChange::Fullscreen(true)),
    );
    assert_eq!(bridge.state().saved_geometry, Some(windowed));
    assert_eq!(win.calls, vec![Call::Fullscreen(true)]);
}

#[test]
fn fullscreen_notification_matching_actual_state_is_a_no_op() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    win.fullscreen = true;
    let mut console = RecordingConsole::default();

    // The window manager already put us fullscreen; the engine echoing the
    // property back must not re-save geometry.
    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Property(PropertyChange::Fullscreen(true)),
    );
    assert!(win.calls.is_empty());
    assert_eq!(bridge.state().saved_geometry, None);
}

#[test]
fn fullscreen_exit_without_saved_geometry_skips_restore() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    win.fullscreen = true;
    let mut console = RecordingConsole::default();

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Property(PropertyChange::Fullscreen(false)),
    );
    assert_eq!(win.calls, vec![Call::Fullscreen(false)]);
}

#[test]
fn client_message_gates_input_around_dispatch() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole::default();

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::ClientMessage(vec!["play-pause".to_string()]),
    );
    assert_eq!(
        win.calls,
        vec![Call::AcceptInput(false), Call::AcceptInput(true)]
    );
    assert_eq!(console.executed, vec![vec!["play-pause".to_string()]]);
    assert!(!bridge.state().render_gui_suspended);
}

#[test]
fn failed_client_message_still_restores_input() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole {
        fail: true,
        ..Default::default()
    };

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::ClientMessage(vec!["nonsense".to_string()]),
    );
    // The failure is logged and swallowed; input comes back regardless.
    assert_eq!(
        win.calls,
        vec![Call::AcceptInput(false), Call::AcceptInput(true)]
    );
    assert!(!bridge.state().render_gui_suspended);
}

#[test]
fn shutdown_requests_close_and_duplicates_are_harmless() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole::default();

    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Shutdown,
    );
    apply(
        &mut bridge,
        &mut win,
        &mut console,
        &NO_PROPS,
        EngineNotification::Shutdown,
    );
    assert_eq!(win.calls, vec![Call::Close, Call::Close]);
}

#[test]
fn window_management_properties_map_directly() {
    let mut bridge = EventBridge::new("par-play");
    let mut win = MockWindow::default();
    let mut console = RecordingConsole::default();

    for change in [
        PropertyChange::Border(false),
        PropertyChange::Maximized(true),
        PropertyChange::Minimized(true),
        PropertyChange::OnTop(true),
    ] {
        apply(
            &mut bridge,
            &mut win,
            &mut console,
            &NO_PROPS,
            EngineNotification::Property(change),
        );
    }
    assert_eq!(
        win.calls,
        vec![
            Call::Decorations(false),
            Call::Maximized(true),
            Call::Minimized(true),
            Call::OnTop(true),
        ]
    );
}
