//! Command-line interface for par-play.
//!
//! Engine options pass through untouched: any `--key=value` or `--flag`
//! token that is not a par-play flag is forwarded to the engine, and bare
//! tokens are media paths. par-play's own flags must come first.

use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

/// par-play - A windowed front-end for mpv-compatible media engines
#[derive(Parser)]
#[command(name = "par-play")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Use the engine's own config directory instead of par-play's
    #[arg(long)]
    pub engine_config: bool,

    /// Extra engine options as a single shell-quoted string
    #[arg(long, value_name = "ARGS")]
    pub engine_args: Option<String>,

    /// Engine options (`--key=value`, `--flag`) and media paths
    #[arg(value_name = "ARG", trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Log level override (beats RUST_LOG)
    pub log_level: Option<LevelFilter>,
    /// Skip par-play's dedicated engine config directory
    pub use_engine_config: bool,
    /// Engine options in command-line order
    pub options: Vec<(String, Option<String>)>,
    /// Media paths to load once the session is up
    pub paths: Vec<String>,
}

impl RuntimeOptions {
    /// True when the option set disables video output, in which case the
    /// engine runs in the terminal without a window.
    pub fn is_headless(&self) -> bool {
        self.options.iter().any(|(key, value)| {
            let value = value.as_deref();
            match key.as_str() {
                "vid" | "video" => value == Some("no"),
                "no-video" | "o" => true,
                _ => false,
            }
        })
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(RuntimeOptions),
    /// Exit with the given code
    Exit(i32),
}

/// Process CLI arguments into runtime options
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_deref() {
        None => None,
        Some(level) => match LevelFilter::from_str(level) {
            Ok(level) => Some(level),
            Err(_) => {
                eprintln!("unknown log level '{level}'");
                return CliResult::Exit(2);
            }
        },
    };

    let mut tokens = match &cli.engine_args {
        None => Vec::new(),
        Some(args) => match shell_words::split(args) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("bad --engine-args: {e}");
                return CliResult::Exit(2);
            }
        },
    };
    tokens.extend(cli.rest.iter().cloned());

    let (options, paths) = split_engine_tokens(&tokens);
    CliResult::Continue(RuntimeOptions {
        log_level,
        use_engine_config: cli.engine_config,
        options,
        paths,
    })
}

/// Split pass-through tokens into engine options and media paths. A literal
/// `--` ends option parsing, so paths starting with dashes stay loadable.
fn split_engine_tokens(tokens: &[String]) -> (Vec<(String, Option<String>)>, Vec<String>) {
    let mut options = Vec::new();
    let mut paths = Vec::new();
    let mut options_done = false;
    for token in tokens {
        if options_done {
            paths.push(token.clone());
        } else if token == "--" {
            options_done = true;
        } else if let Some(option) = token.strip_prefix("--") {
            match option.split_once('=') {
                Some((key, value)) => options.push((key.to_string(), Some(value.to_string()))),
                None => options.push((option.to_string(), None)),
            }
        } else {
            paths.push(token.clone());
        }
    }
    (options, paths)
}
