//! Performance benchmarks for the Sengoku game engine
//!
//! Two iteration modes:
//!
//! 1. **Fresh** - initialize a new game for each iteration
//! 2. **Snapshot** - clone a pre-built initial state each iteration
//!
//! A third group times a single heuristic opponent turn.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sengoku_deck::{
    core::Side,
    game::{run_opponent_turn, GameLoop, GameState, HeuristicController, RandomController, VerbosityLevel},
    loader::{CardCatalog, DeckSpec, GameInitializer},
    Result,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collected during game execution
#[derive(Debug, Clone)]
struct GameMetrics {
    turns: u32,
    choices: u32,
    duration: Duration,
}

impl GameMetrics {
    fn games_per_sec(&self) -> f64 {
        1.0 / self.duration.as_secs_f64()
    }

    fn turns_per_sec(&self) -> f64 {
        self.turns as f64 / self.duration.as_secs_f64()
    }

    fn choices_per_turn(&self) -> f64 {
        if self.turns == 0 {
            0.0
        } else {
            self.choices as f64 / self.turns as f64
        }
    }
}

/// Setup data needed for benchmarking (loaded once, reused across iterations)
struct BenchmarkSetup {
    catalog: Arc<CardCatalog>,
    deck: DeckSpec,
}

impl BenchmarkSetup {
    fn load() -> Result<Self> {
        Ok(BenchmarkSetup {
            catalog: Arc::new(CardCatalog::bundled()?),
            deck: DeckSpec::standard(),
        })
    }

    fn init(&self, seed: u64) -> Result<GameState> {
        GameInitializer::new(&self.catalog).init_game(&self.deck, seed)
    }
}

fn play(game: &mut GameState, seed: u64) -> Result<(u32, u32)> {
    let mut controller1 = RandomController::with_seed(Side::Human, seed);
    let mut controller2 = HeuristicController::new(Side::Cpu);
    let mut game_loop = GameLoop::new(game).with_verbosity(VerbosityLevel::Silent);
    let result = game_loop.run_game(&mut controller1, &mut controller2)?;
    Ok((result.turns_played, game_loop.choices_made()))
}

/// Run a single game and collect metrics
fn run_game_with_metrics(setup: &BenchmarkSetup, seed: u64) -> Result<GameMetrics> {
    let start = Instant::now();
    let mut game = setup.init(seed)?;
    let (turns, choices) = play(&mut game, seed)?;
    Ok(GameMetrics {
        turns,
        choices,
        duration: start.elapsed(),
    })
}

/// Benchmark: Fresh mode - initialize a new game each iteration
fn bench_game_fresh(c: &mut Criterion) {
    let setup = match BenchmarkSetup::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load resources: {}", e);
            return;
        }
    };

    let mut group = c.benchmark_group("game_execution");
    group.measurement_time(Duration::from_secs(10));

    let seed = 42u64;
    println!("\nWarmup game (seed {}):", seed);
    if let Ok(metrics) = run_game_with_metrics(&setup, seed) {
        println!("  Turns: {}", metrics.turns);
        println!("  Choices: {}", metrics.choices);
        println!("  Duration: {:?}", metrics.duration);
        println!("  Games/sec: {:.2}", metrics.games_per_sec());
        println!("  Turns/sec: {:.2}", metrics.turns_per_sec());
        println!("  Choices/turn: {:.2}", metrics.choices_per_turn());
    }

    group.bench_with_input(BenchmarkId::new("fresh", seed), &seed, |b, &seed| {
        b.iter(|| run_game_with_metrics(&setup, black_box(seed)).expect("Game should complete successfully"));
    });

    group.finish();
}

/// Benchmark: Snapshot mode - clone the initial state each iteration
fn bench_game_snapshot(c: &mut Criterion) {
    let setup = match BenchmarkSetup::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load resources: {}", e);
            return;
        }
    };

    let mut group = c.benchmark_group("game_execution");
    group.measurement_time(Duration::from_secs(10));

    let seed = 42u64;
    let initial_game = setup.init(seed).expect("Failed to initialize game");

    group.bench_function(BenchmarkId::new("snapshot", seed), |b| {
        b.iter(|| {
            let mut game = initial_game.clone();
            play(&mut game, seed).expect("Game should complete successfully")
        });
    });

    group.finish();
}

/// Benchmark: one full automated turn from DRAW
fn bench_opponent_turn(c: &mut Criterion) {
    let setup = match BenchmarkSetup::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load resources: {}", e);
            return;
        }
    };

    let mut game = setup.init(7).expect("Failed to initialize game");
    game.active_side = Side::Cpu;
    game.logger.set_verbosity(VerbosityLevel::Silent);

    c.bench_function("opponent_turn", |b| {
        b.iter(|| run_opponent_turn(black_box(&game)));
    });
}

criterion_group!(benches, bench_game_fresh, bench_game_snapshot, bench_opponent_turn);
criterion_main!(benches);
