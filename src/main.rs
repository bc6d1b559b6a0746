mod script;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use editor::config::EditorConfig;
use editor::error::SceneError;

use crate::script::{Replay, ScriptError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("read input failed: {0}")]
    Read(#[from] io::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(serde_json::Error),
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("line {line}: {source}")]
    Script { line: usize, source: ScriptError },
}

#[derive(Parser, Debug)]
#[command(name = "deskplan", about = "Replay floor-plan editor scripts")]
struct Cli {
    #[arg(default_value = "-", help = "JSON Lines script path, or - for stdin")]
    script: String,

    #[arg(long, env = "DESKPLAN_CONFIG", help = "Editor config JSON; env overrides still apply")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 200, help = "Animation ticks allowed to settle after the script")]
    ticks: u32,

    #[arg(long, default_value_t = false, help = "Stop on placement failures instead of logging them")]
    strict: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let mut replay = Replay::new(config);
    run_script(&mut replay, open_input(&cli.script)?, cli.strict)?;

    let ticks = replay.settle(cli.ticks);
    tracing::debug!(ticks, "animations settled");

    let engine = replay.engine();
    let rendered = serde_json::to_string_pretty(&engine.snapshot())?;
    println!("{rendered}");
    println!("{}", engine.status());
    Ok(())
}

/// Defaults, then the optional config file, then `DESKPLAN_*` env overrides.
fn load_config(path: Option<&PathBuf>) -> Result<EditorConfig, CliError> {
    let base = match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_reader(BufReader::new(file)).map_err(CliError::InvalidConfig)?
        }
        None => EditorConfig::default(),
    };
    Ok(base.overlay_env().normalized())
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>, CliError> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|source| CliError::Open { path: path.to_owned(), source })?;
    Ok(Box::new(BufReader::new(file)))
}

fn run_script(replay: &mut Replay, reader: impl BufRead, strict: bool) -> Result<(), CliError> {
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let Some(command) = script::parse_line(&line).map_err(|source| CliError::Script { line: number, source })?
        else {
            continue;
        };
        match replay.apply(command) {
            Ok(actions) => {
                for action in &actions {
                    tracing::debug!(line = number, ?action, "action");
                }
            }
            Err(ScriptError::Scene(err @ SceneError::NoSpaceAvailable { .. })) if !strict => {
                tracing::warn!(line = number, code = err.error_code(), "{err}");
            }
            Err(source) => return Err(CliError::Script { line: number, source }),
        }
    }
    Ok(())
}
