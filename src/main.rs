use anyhow::Result;
use par_play::app::App;
use par_play::cli;
use par_play::config::Config;
use par_play::engine::process;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            // Non-zero exit: use process::exit so the shell sees the correct
            // exit code. No app state exists yet, so no destructors are skipped.
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // CLI --log-level takes precedence, then RUST_LOG, then warn.
    par_play::debug::init_log_bridge(runtime_options.log_level);

    log::info!("starting par-play {}", par_play::VERSION);

    // An option set without video output means no window: hand the terminal
    // straight to the engine and mirror its exit code.
    if runtime_options.is_headless() {
        let config = Config::load()?;
        let mut options = config.engine_options();
        options.extend(runtime_options.options.iter().cloned());
        let config_dir = (!(config.use_engine_config || runtime_options.use_engine_config))
            .then(Config::config_dir);
        let code = process::run_headless(
            &config.engine_binary,
            config_dir.as_deref(),
            &options,
            &runtime_options.paths,
        )?;
        std::process::exit(code);
    }

    let app = App::new(runtime_options)?;
    let result = app.run();

    if let Err(ref e) = result {
        eprintln!("par-play: error: {e:#}");
        // On Linux, provide a hint when the error looks like a missing display server
        #[cfg(target_os = "linux")]
        {
            let msg = format!("{e:?}").to_lowercase();
            if msg.contains("display")
                || msg.contains("wayland")
                || msg.contains("xcb")
                || msg.contains("x server")
                || msg.contains("compositor")
            {
                eprintln!(
                    "par-play: hint: no display server found — ensure DISPLAY (X11) or \
                     WAYLAND_DISPLAY (Wayland) is set and a compositor is running"
                );
            }
        }
    }
    result
}
