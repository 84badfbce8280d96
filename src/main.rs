//! Headless match-three runner (default binary).
//!
//! Plays one level by always taking the hint and prints every settled board.
//! Usage: `match-three [--level N] [--seed S] [--json]`
//! Engine tunables come from `MATCH3_*` environment variables, log filtering
//! from `RUST_LOG`.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use match_three::demo::{parse_demo_args, play_level, render_text};
use match_three::engine::{EngineConfig, StandardLevels};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let engine_config = EngineConfig::from_env();
    engine_config.validate()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let demo = parse_demo_args(&args, &engine_config)?;
    let report = play_level(&demo, engine_config, &StandardLevels)?;

    if demo.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}
