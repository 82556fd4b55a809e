use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use letterfall::config::EngineConfig;
use letterfall::play::PlaySession;
use letterfall::replay::{ReplayData, save_replay};
use letterfall::script::SessionScript;
use letterfall::util::init_logging;

#[derive(Parser, Debug)]
#[command(name = "letterfall", about = "Headless runner for the letterfall play engine")]
struct Args {
    /// Path to engine config JSON file.
    #[arg(long, default_value = "letterfall.json")]
    config: PathBuf,

    /// Session script (JSON list of spawn/key/tick steps).
    #[arg(long)]
    script: PathBuf,

    /// Override the starting complexity (0-100).
    #[arg(long)]
    complexity: Option<f64>,

    /// Write the replay as gzip-compressed JSON.
    #[arg(long)]
    replay_out: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Directory for rotating log files.
    #[arg(long, env = "LETTERFALL_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_dir.as_deref(), args.verbose)?;

    let mut config = EngineConfig::load_from(&args.config)?;
    if let Some(complexity) = args.complexity {
        config.complexity = complexity;
    }
    let lanes = config.lanes.keys().to_vec();

    let script = SessionScript::load_from(&args.script)?;
    let mut session = PlaySession::with_log(config)?;
    info!(
        steps = script.steps.len(),
        complexity = session.complexity(),
        "running script"
    );
    script.run(&mut session)?;

    let snapshot = session.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(path) = &args.replay_out {
        let events = session.into_sink().into_events();
        save_replay(&ReplayData::new(lanes, events), path)?;
        info!(path = %path.display(), "replay saved");
    }
    Ok(())
}
