//! Headless autoplay used by the `match-three` binary.
//!
//! Plays one level by always taking the engine's hint and polling the cascade
//! until it settles, recording every settled board along the way.

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use tracing::debug;

use crate::core::BoardSnapshot;
use crate::engine::{
    Engine, EngineConfig, LevelConfig, LevelOutcome, LevelProvider, Session, Stage,
};
use crate::types::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub level: u32,
    pub seed: u32,
    pub json: bool,
}

/// One player move and the settled board after it
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    pub turn: u32,
    #[serde(rename = "move")]
    pub mv: Move,
    pub score_delta: u64,
    pub score: u64,
    pub moves_left: u32,
    pub reshuffled: bool,
    pub board: BoardSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub level: LevelConfig,
    pub seed: u32,
    pub initial: BoardSnapshot,
    pub rounds: Vec<Round>,
    pub score: u64,
    pub outcome: Option<LevelOutcome>,
}

/// Parse `[--level N] [--seed S] [--json]`. Unset values come from `defaults`.
pub fn parse_demo_args(args: &[String], defaults: &EngineConfig) -> Result<DemoConfig> {
    let mut config = DemoConfig {
        level: 1,
        seed: defaults.seed,
        json: false,
    };
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--level" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --level"))?;
                config.level = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --level value: {}", v))?;
                if config.level == 0 {
                    bail!("levels start at 1");
                }
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--json" => config.json = true,
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }
    Ok(config)
}

/// Play `demo.level` to its outcome.
pub fn play_level(
    demo: &DemoConfig,
    engine_config: EngineConfig,
    levels: &impl LevelProvider,
) -> Result<DemoReport> {
    let level = levels.level(demo.level);
    let mut engine = Engine::new(engine_config.with_seed(demo.seed))?;
    engine.drain_events();
    let mut session = Session::new(level);
    let initial = engine.snapshot();
    let mut rounds = Vec::new();

    let mut turn = 0u32;
    while !session.is_over() {
        let hint = engine
            .find_hint_move()
            .ok_or_else(|| anyhow!("no legal move on an idle board"))?;
        let before = session.score();

        let Some(swap) = session.attempt_swap(&mut engine, hint.from, hint.to) else {
            break;
        };
        if let Some(err) = swap.rejection {
            bail!("hinted move {} -> {} rejected: {}", hint.from, hint.to, err);
        }
        turn += 1;

        let mut reshuffled = false;
        loop {
            let step = session.advance(&mut engine);
            if step.settled {
                reshuffled = step.stage == Stage::Reshuffled;
                break;
            }
        }
        for event in engine.drain_events() {
            debug!(turn, ?event, "engine event");
        }

        rounds.push(Round {
            turn,
            mv: hint,
            score_delta: session.score() - before,
            score: session.score(),
            moves_left: session.moves_left(),
            reshuffled,
            board: engine.snapshot(),
        });
    }

    Ok(DemoReport {
        level,
        seed: demo.seed,
        initial,
        rounds,
        score: session.score(),
        outcome: session.outcome(),
    })
}

/// Text rendering: initial board, one block per round, then the result
pub fn render_text(report: &DemoReport) -> String {
    let mut out = format!(
        "level {}  moves {}  target {}  seed {}\n{}",
        report.level.id,
        report.level.moves,
        report.level.target_score,
        report.seed,
        report.initial
    );
    for round in &report.rounds {
        out.push_str(&format!(
            "\nturn {}: {} -> {}  +{}  score {}  moves left {}{}\n{}",
            round.turn,
            round.mv.from,
            round.mv.to,
            round.score_delta,
            round.score,
            round.moves_left,
            if round.reshuffled { "  (reshuffled)" } else { "" },
            round.board
        ));
    }
    let result = match report.outcome {
        Some(LevelOutcome::Won { stars }) => format!("won with {} star(s)", stars),
        Some(LevelOutcome::Lost) => "lost".to_string(),
        None => "unfinished".to_string(),
    };
    out.push_str(&format!("\nfinal score {}: {}\n", report.score, result));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StandardLevels;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags() {
        let defaults = EngineConfig::default();
        let config = parse_demo_args(&args(&["--level", "3", "--seed", "99", "--json"]), &defaults)
            .unwrap();
        assert_eq!(
            config,
            DemoConfig {
                level: 3,
                seed: 99,
                json: true
            }
        );

        let config = parse_demo_args(&[], &defaults).unwrap();
        assert_eq!(config.level, 1);
        assert_eq!(config.seed, defaults.seed);
        assert!(!config.json);
    }

    #[test]
    fn rejects_bad_flags() {
        let defaults = EngineConfig::default();
        assert!(parse_demo_args(&args(&["--level"]), &defaults).is_err());
        assert!(parse_demo_args(&args(&["--level", "0"]), &defaults).is_err());
        assert!(parse_demo_args(&args(&["--seed", "x"]), &defaults).is_err());
        assert!(parse_demo_args(&args(&["--fast"]), &defaults).is_err());
    }

    #[test]
    fn autoplay_reaches_an_outcome() {
        let demo = DemoConfig {
            level: 1,
            seed: 5,
            json: false,
        };
        let report = play_level(&demo, EngineConfig::default(), &StandardLevels).unwrap();
        assert_eq!(report.rounds.len(), 15);
        assert!(report.outcome.is_some());
        assert_eq!(report.rounds.last().unwrap().moves_left, 0);
        assert_eq!(report.rounds.last().unwrap().score, report.score);

        let text = render_text(&report);
        assert!(text.starts_with("level 1  moves 15  target 1000"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rounds"].as_array().unwrap().len(), 15);
        assert!(json["rounds"][0]["move"]["from"]["row"].is_number());
    }
}
