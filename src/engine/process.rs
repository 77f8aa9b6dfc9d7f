//! Engine process lifecycle.
//!
//! Builds the engine's command line from the baseline option set plus
//! user-supplied overrides, spawns it embedded into the window (via `--wid`)
//! or standalone for headless runs, and surfaces startup failures with the
//! engine's own stderr so option typos are readable.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use anyhow::Context;

/// Everything needed to launch an embedded engine session.
pub struct LaunchSpec {
    pub binary: String,
    pub socket: PathBuf,
    /// Native handle of the window the engine renders into.
    pub wid: u64,
    /// Dedicated config directory; `None` uses the engine's own.
    pub config_dir: Option<PathBuf>,
    /// User options from the command line, applied after the baseline so
    /// they win.
    pub options: Vec<(String, Option<String>)>,
}

/// Options every embedded session starts from. User options come later on
/// the command line and override these.
const BASELINE_OPTIONS: [(&str, &str); 6] = [
    ("config", "yes"),
    ("osc", "yes"),
    ("input-default-bindings", "yes"),
    ("input-vo-keyboard", "yes"),
    ("osd-playing-msg", "${media-title}"),
    ("screenshot-directory", "~~desktop/"),
];

fn option_arg(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("--{key}={value}"),
        None => format!("--{key}"),
    }
}

impl LaunchSpec {
    pub fn build_args(&self) -> Vec<String> {
        let mut args: Vec<String> = BASELINE_OPTIONS
            .iter()
            .map(|(key, value)| option_arg(key, Some(value)))
            .collect();
        if let Some(dir) = &self.config_dir {
            args.push(option_arg("config-dir", Some(&dir.to_string_lossy())));
        }
        for (key, value) in &self.options {
            args.push(option_arg(key, value.as_deref()));
        }
        args.push(option_arg(
            "input-ipc-server",
            Some(&self.socket.to_string_lossy()),
        ));
        args.push(option_arg("wid", Some(&self.wid.to_string())));
        // Files are loaded over IPC once the session is up; keep the engine
        // alive with an empty playlist until then.
        args.push(option_arg("idle", Some("yes")));
        args
    }
}

/// Spawn an embedded engine. Stderr is piped so a failed startup can be
/// reported; stdout is discarded.
pub fn spawn_engine(spec: &LaunchSpec) -> std::io::Result<Child> {
    Command::new(&spec.binary)
        .args(spec.build_args())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
}

/// Check whether a just-spawned engine already exited, and if so collect a
/// report including its stderr. Called while polling for the IPC socket.
pub fn startup_failure(child: &mut Child) -> std::io::Result<Option<String>> {
    let Some(status) = child.try_wait()? else {
        return Ok(None);
    };
    let mut tail = String::new();
    if let Some(mut stderr) = child.stderr.take() {
        let _ = stderr.read_to_string(&mut tail);
    }
    let tail = tail.trim();
    let report = if tail.is_empty() {
        format!("engine exited during startup ({status})")
    } else {
        format!("engine exited during startup ({status}):\n{tail}")
    };
    Ok(Some(report))
}

/// Run the engine without a window, inheriting the terminal, and return its
/// exit code. Used when the option set asks for no video output.
pub fn run_headless(
    binary: &str,
    config_dir: Option<&Path>,
    options: &[(String, Option<String>)],
    paths: &[String],
) -> anyhow::Result<i32> {
    let mut command = Command::new(binary);
    if let Some(dir) = config_dir {
        command.arg(option_arg("config-dir", Some(&dir.to_string_lossy())));
    }
    for (key, value) in options {
        command.arg(option_arg(key, value.as_deref()));
    }
    command.args(paths);
    let status = command
        .status()
        .with_context(|| format!("failed to launch engine binary '{binary}'"))?;
    Ok(status.code().unwrap_or(1))
}
