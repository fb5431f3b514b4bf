//! Run layline strategies at a seeded table from a YAML description.

use anyhow::{Context, Result};
use layline_execution::{
    strategy::{presets, OddsPolicy},
    DiceSource, Player, SeededDice, StrategyStack, Table, TracingSink,
};
use layline_types::PolicyError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Strategy presets selectable from a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// A don't come whenever the point is on, with lay odds behind it.
    DontComeOdds { amount: f64, odds: OddsPolicy },
    /// One don't come per fresh point, with lay odds behind it.
    DontComeNextPoint { amount: f64, odds: OddsPolicy },
    /// Place 6 and 8, a don't come and 2x lay odds.
    PlaceSixEightDontCome { amount: f64 },
}

impl StrategyConfig {
    pub fn build(&self) -> Result<StrategyStack, PolicyError> {
        match self {
            StrategyConfig::DontComeOdds { amount, odds } => presets::dont_come_odds(*amount, *odds),
            StrategyConfig::DontComeNextPoint { amount, odds } => {
                presets::dont_come_next_point(*amount, *odds)
            }
            StrategyConfig::PlaceSixEightDontCome { amount } => {
                presets::place_six_eight_dont_come(*amount)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub bankroll: f64,
    pub strategy: StrategyConfig,
}

/// Run description (from config file).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Dice seed. Fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub max_rolls: u64,
    /// Forward strategy events to the log.
    #[serde(default)]
    pub trace_events: bool,
    pub players: Vec<PlayerConfig>,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no players configured")]
    NoPlayers,
    #[error("duplicate player name: {0}")]
    DuplicateName(String),
    #[error("player {name}: bankroll must be positive (got={bankroll})")]
    Bankroll { name: String, bankroll: f64 },
    #[error("player {name}: {source}")]
    Strategy { name: String, source: PolicyError },
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).context("could not parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        for (index, player) in self.players.iter().enumerate() {
            if self.players[..index]
                .iter()
                .any(|other| other.name == player.name)
            {
                return Err(ConfigError::DuplicateName(player.name.clone()));
            }
            if !(player.bankroll.is_finite() && player.bankroll > 0.0) {
                return Err(ConfigError::Bankroll {
                    name: player.name.clone(),
                    bankroll: player.bankroll,
                });
            }
            player
                .strategy
                .build()
                .map_err(|source| ConfigError::Strategy {
                    name: player.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub bankroll: f64,
    pub wagered: f64,
    pub open_wagers: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub seed: Option<u64>,
    pub rolls: u64,
    pub players: Vec<PlayerSummary>,
}

/// Seat every configured player at a table rolling `dice`.
pub fn build_table<D: DiceSource>(config: &Config, dice: D) -> Result<Table<D>> {
    let mut table = Table::new(dice);
    if config.trace_events {
        table = table.with_events(TracingSink);
    }
    for player in &config.players {
        let strategy = player
            .strategy
            .build()
            .with_context(|| format!("invalid strategy for {}", player.name))?;
        table.add_player(Player::new(player.name.clone(), player.bankroll), strategy);
    }
    Ok(table)
}

/// Play `table` for up to `max_rolls` and collect final bankrolls.
pub fn play<D: DiceSource>(table: &mut Table<D>, max_rolls: u64, seed: Option<u64>) -> Result<Summary> {
    let rolls = table.run(max_rolls).context("run aborted")?;
    let players = table
        .players()
        .map(|player| PlayerSummary {
            name: player.name().to_string(),
            bankroll: player.bankroll(),
            wagered: player.wagered(),
            open_wagers: player.wagers().count(),
        })
        .collect();
    Ok(Summary {
        seed,
        rolls,
        players,
    })
}

/// Run a config end to end with seeded dice.
pub fn run(config: &Config) -> Result<Summary> {
    config.validate()?;
    let dice = match config.seed {
        Some(seed) => SeededDice::new(seed),
        None => SeededDice::from_entropy(),
    };
    let mut table = build_table(config, dice)?;
    info!(
        players = config.players.len(),
        max_rolls = config.max_rolls,
        seed = ?config.seed,
        "Starting run"
    );
    let summary = play(&mut table, config.max_rolls, config.seed)?;
    for player in &summary.players {
        info!(
            name = %player.name,
            bankroll = player.bankroll,
            wagered = player.wagered,
            open_wagers = player.open_wagers,
            "Final bankroll"
        );
    }
    Ok(summary)
}
