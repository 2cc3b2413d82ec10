//! Tournament mode for running many seeded games in parallel and collecting statistics
//!
//! Games are played concurrently with rayon. Each game's seed is derived from
//! the tournament seed and the game index, so results do not depend on thread
//! scheduling.

use crate::{
    core::Side,
    game::{
        GameEndReason, GameLoop, GameResult, HeuristicController, PlayerController, RandomController,
        RulesConfig, VerbosityLevel,
    },
    loader::{CardCatalog, DeckSpec, GameInitializer},
    EngineError, Result,
};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::Instant;

/// Controller type for unattended games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerType {
    Random,
    Heuristic,
}

impl ControllerType {
    fn build(self, side: Side, seed: u64) -> Box<dyn PlayerController> {
        match self {
            ControllerType::Random => Box::new(RandomController::with_seed(side, seed)),
            ControllerType::Heuristic => Box::new(HeuristicController::new(side)),
        }
    }
}

/// Settings shared by every game of a tournament
#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub games: usize,
    pub seed: u64,
    pub human: ControllerType,
    pub cpu: ControllerType,
    pub human_deck: DeckSpec,
    pub cpu_deck: DeckSpec,
    pub rules: RulesConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games: 100,
            seed: 42,
            human: ControllerType::Heuristic,
            cpu: ControllerType::Heuristic,
            human_deck: DeckSpec::standard(),
            cpu_deck: DeckSpec::standard(),
            rules: RulesConfig::default(),
        }
    }
}

/// Aggregate results of a tournament
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TournamentStats {
    pub games: usize,
    pub human_wins: usize,
    pub cpu_wins: usize,
    pub draws: usize,
    pub total_turns: u64,
    pub human_points: u64,
    pub cpu_points: u64,
    pub end_reasons: FxHashMap<GameEndReason, usize>,
}

impl TournamentStats {
    fn record(&mut self, result: &GameResult) {
        self.games += 1;
        match result.winner() {
            Some(Side::Human) => self.human_wins += 1,
            Some(Side::Cpu) => self.cpu_wins += 1,
            None => self.draws += 1,
        }
        self.total_turns += u64::from(result.turns_played);
        self.human_points += u64::from(result.scores.human);
        self.cpu_points += u64::from(result.scores.cpu);
        *self.end_reasons.entry(result.end_reason).or_insert(0) += 1;
    }

    pub fn average_turns(&self) -> f64 {
        ratio(self.total_turns, self.games)
    }

    pub fn average_points(&self, side: Side) -> f64 {
        match side {
            Side::Human => ratio(self.human_points, self.games),
            Side::Cpu => ratio(self.cpu_points, self.games),
        }
    }

    pub fn wins(&self, side: Side) -> usize {
        match side {
            Side::Human => self.human_wins,
            Side::Cpu => self.cpu_wins,
        }
    }

    pub fn print_summary(&self) {
        println!("=== Player Statistics ===");
        for side in Side::ALL {
            println!(
                "{side} wins: {} ({:.1}%), average VP {:.2}",
                self.wins(side),
                100.0 * ratio(self.wins(side) as u64, self.games),
                self.average_points(side)
            );
        }
        println!(
            "Draws: {} ({:.1}%)",
            self.draws,
            100.0 * ratio(self.draws as u64, self.games)
        );
        println!("Average turns: {:.2}", self.average_turns());

        println!("\n=== End Reasons ===");
        for reason in [
            GameEndReason::TurnLimit,
            GameEndReason::VictoryPileEmpty,
            GameEndReason::PilesDepleted,
            GameEndReason::LoopLimit,
        ] {
            if let Some(count) = self.end_reasons.get(&reason) {
                println!("  {reason}: {count}");
            }
        }
    }
}

fn ratio(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Seed for one game of the tournament
pub fn game_seed(tournament_seed: u64, game_idx: usize) -> u64 {
    tournament_seed.wrapping_add((game_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play a single silent game
pub fn play_game(catalog: &Arc<CardCatalog>, config: &TournamentConfig, seed: u64) -> Result<GameResult> {
    let mut game = GameInitializer::new(catalog)
        .with_rules(config.rules.clone())
        .init_game_with_decks(&config.human_deck, &config.cpu_deck, seed)?;

    let mut human = config.human.build(Side::Human, seed.wrapping_add(0x1234_5678_9ABC_DEF0));
    let mut cpu = config.cpu.build(Side::Cpu, seed.wrapping_add(0xFEDC_BA98_7654_3210));

    let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
    game_loop.run_game(&mut *human, &mut *cpu)
}

/// Run the tournament and return its statistics
pub fn run_tourney(catalog: &Arc<CardCatalog>, config: &TournamentConfig) -> Result<TournamentStats> {
    if config.games == 0 {
        return Err(EngineError::InvalidInput(
            "Tournament requires at least one game".to_string(),
        ));
    }
    config.rules.validate()?;
    config.human_deck.validate(catalog)?;
    config.cpu_deck.validate(catalog)?;

    let start = Instant::now();
    let results: Vec<GameResult> = (0..config.games)
        .into_par_iter()
        .map(|game_idx| play_game(catalog, config, game_seed(config.seed, game_idx)))
        .collect::<Result<_>>()?;

    let mut stats = TournamentStats::default();
    for result in &results {
        stats.record(result);
    }

    let elapsed = start.elapsed();
    eprintln!(
        "Played {} games in {:.2}s ({:.1} games/s)",
        stats.games,
        elapsed.as_secs_f64(),
        stats.games as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    Ok(stats)
}
