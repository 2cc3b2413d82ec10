//! Sengoku deck-building engine - Main Binary
//!
//! Plays single games, runs tournaments and inspects card catalogs.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use sengoku_deck::{
    core::Side,
    game::{
        state_hash::{compute_state_hash, format_hash},
        GameLoop, GameResult, HeuristicController, InteractiveController, PlayerController, RandomController,
        RulesConfig, VerbosityLevel,
    },
    loader::{legacy::load_legacy_file, CardCatalog, DeckLoader, DeckSpec, GameInitializer},
    tournament::{self, TournamentConfig},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Controller type for a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ControllerType {
    /// Makes random choices
    Random,
    /// Text UI controller for human play via stdin
    Tui,
    /// Heuristic AI controller (the automated opponent policy)
    Heuristic,
}

impl ControllerType {
    fn unattended(self) -> anyhow::Result<tournament::ControllerType> {
        match self {
            ControllerType::Random => Ok(tournament::ControllerType::Random),
            ControllerType::Heuristic => Ok(tournament::ControllerType::Heuristic),
            ControllerType::Tui => bail!("the tui controller cannot play unattended games"),
        }
    }
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Where cards, rules and decks come from
#[derive(clap::Args, Debug)]
struct SetupArgs {
    /// Card catalog in the canonical JSON format (default: bundled catalog)
    #[arg(long, value_name = "CARDS_JSON", conflicts_with = "legacy_catalog")]
    catalog: Option<PathBuf>,

    /// Card catalog in the legacy trigger/condition format
    #[arg(long, value_name = "LEGACY_JSON")]
    legacy_catalog: Option<PathBuf>,

    /// Keep only legacy cards from this era
    #[arg(long, requires = "legacy_catalog")]
    era: Option<String>,

    /// Rules configuration (JSON)
    #[arg(long, value_name = "RULES_JSON")]
    rules: Option<PathBuf>,

    /// Override the turn limit from the rules
    #[arg(long)]
    max_turns: Option<u32>,

    /// Starting deck file (.deck) for the first side (default: 7 RICE_SMALL + 3 VP_VILLAGE)
    #[arg(long, value_name = "DECK")]
    deck: Option<PathBuf>,

    /// Starting deck file (.deck) for the second side (default: same as --deck)
    #[arg(long, value_name = "DECK")]
    cpu_deck: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "sengoku")]
#[command(about = "Sengoku - deck-building card game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play {
        #[command(flatten)]
        setup: SetupArgs,

        /// Controller for the first (human) side
        #[arg(long, value_enum, default_value = "tui")]
        p1: ControllerType,

        /// Controller for the second (cpu) side
        #[arg(long, value_enum, default_value = "heuristic")]
        p2: ControllerType,

        /// Set random seed for deterministic testing
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Print a hash of the final state
        #[arg(long)]
        show_hash: bool,
    },

    /// Run many seeded games in parallel and print statistics
    Tourney {
        #[command(flatten)]
        setup: SetupArgs,

        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        #[arg(long, value_enum, default_value = "heuristic")]
        p1: ControllerType,

        #[arg(long, value_enum, default_value = "heuristic")]
        p2: ControllerType,

        /// Tournament seed; game seeds are derived from it
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// List the cards of a catalog
    Cards {
        #[command(flatten)]
        setup: SetupArgs,
    },

    /// Convert a legacy catalog to the canonical JSON format
    Convert {
        /// Legacy catalog file
        input: PathBuf,

        /// Keep only cards from this era
        #[arg(long)]
        era: Option<String>,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            setup,
            p1,
            p2,
            seed,
            verbosity,
            show_hash,
        } => run_play(&setup, p1, p2, seed, verbosity.into(), show_hash),
        Commands::Tourney {
            setup,
            games,
            p1,
            p2,
            seed,
        } => run_tourney(&setup, games, p1, p2, seed),
        Commands::Cards { setup } => run_cards(&setup),
        Commands::Convert { input, era, output } => run_convert(&input, era.as_deref(), output.as_deref()),
    }
}

fn load_catalog(setup: &SetupArgs) -> anyhow::Result<Arc<CardCatalog>> {
    let catalog = if let Some(path) = &setup.legacy_catalog {
        let (catalog, report) = load_legacy_file(path, setup.era.as_deref())
            .with_context(|| format!("loading legacy catalog {}", path.display()))?;
        for loss in &report.losses {
            eprintln!("  legacy {}: {:?} effect {:?}", loss.card_id, loss.kind, loss.effect);
        }
        catalog
    } else if let Some(path) = &setup.catalog {
        CardCatalog::load_from_file(path).with_context(|| format!("loading catalog {}", path.display()))?
    } else {
        CardCatalog::bundled().context("loading bundled catalog")?
    };
    Ok(Arc::new(catalog))
}

fn load_rules(setup: &SetupArgs) -> anyhow::Result<RulesConfig> {
    let mut rules = match &setup.rules {
        Some(path) => {
            RulesConfig::load_from_file(path).with_context(|| format!("loading rules {}", path.display()))?
        }
        None => RulesConfig::default(),
    };
    if let Some(max_turns) = setup.max_turns {
        rules = rules.with_max_turns(max_turns);
    }
    rules.validate()?;
    Ok(rules)
}

fn load_deck(path: Option<&Path>) -> anyhow::Result<DeckSpec> {
    match path {
        Some(path) => {
            DeckLoader::load_from_file(path).with_context(|| format!("loading deck {}", path.display()))
        }
        None => Ok(DeckSpec::standard()),
    }
}

fn build_controller(kind: ControllerType, side: Side, seed: u64) -> Box<dyn PlayerController> {
    match kind {
        ControllerType::Random => Box::new(RandomController::with_seed(side, seed)),
        ControllerType::Heuristic => Box::new(HeuristicController::new(side)),
        ControllerType::Tui => Box::new(InteractiveController::stdio(side)),
    }
}

fn run_play(
    setup: &SetupArgs,
    p1: ControllerType,
    p2: ControllerType,
    seed: u64,
    verbosity: VerbosityLevel,
    show_hash: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(setup)?;
    let rules = load_rules(setup)?;
    let human_deck = load_deck(setup.deck.as_deref())?;
    let cpu_deck = match &setup.cpu_deck {
        Some(path) => load_deck(Some(path))?,
        None => human_deck.clone(),
    };

    if verbosity >= VerbosityLevel::Minimal {
        println!("=== Sengoku - Game ===");
        println!("Catalog: {} cards, seed {seed}", catalog.len());
        println!("  {}: {p1:?} ({} cards)", Side::Human, human_deck.total_cards());
        println!("  {}: {p2:?} ({} cards)\n", Side::Cpu, cpu_deck.total_cards());
    }

    let mut game = GameInitializer::new(&catalog)
        .with_rules(rules)
        .init_game_with_decks(&human_deck, &cpu_deck, seed)?;

    let mut controller1 = build_controller(p1, Side::Human, seed);
    // seed + 1 so the sides draw different random sequences
    let mut controller2 = build_controller(p2, Side::Cpu, seed.wrapping_add(1));

    let result = {
        let mut game_loop = GameLoop::new(&mut game).with_verbosity(verbosity);
        game_loop.run_game(&mut *controller1, &mut *controller2)?
    };

    if verbosity >= VerbosityLevel::Minimal {
        print_result(&result);
    }
    if show_hash {
        println!("State hash: {}", format_hash(compute_state_hash(&game)));
    }
    Ok(())
}

fn print_result(result: &GameResult) {
    println!("\n=== Game Over ===");
    match result.winner() {
        Some(side) => println!("Winner: {side}"),
        None => println!("Game ended in a draw"),
    }
    println!("Turns played: {}", result.turns_played);
    println!("Reason: {}", result.end_reason);
    println!("\n=== Final Score ===");
    for side in Side::ALL {
        println!("  {side}: {} VP", result.scores.get(side));
    }
}

fn run_tourney(
    setup: &SetupArgs,
    games: usize,
    p1: ControllerType,
    p2: ControllerType,
    seed: u64,
) -> anyhow::Result<()> {
    println!("=== Sengoku - Tournament Mode ===\n");
    let catalog = load_catalog(setup)?;
    let human_deck = load_deck(setup.deck.as_deref())?;
    let cpu_deck = match &setup.cpu_deck {
        Some(path) => load_deck(Some(path))?,
        None => human_deck.clone(),
    };
    let config = TournamentConfig {
        games,
        seed,
        human: p1.unattended()?,
        cpu: p2.unattended()?,
        human_deck,
        cpu_deck,
        rules: load_rules(setup)?,
    };

    println!("Running {games} games with seed {seed}");
    println!("Controllers: P1={p1:?}, P2={p2:?}\n");
    let stats = tournament::run_tourney(&catalog, &config)?;
    stats.print_summary();
    Ok(())
}

fn run_cards(setup: &SetupArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(setup)?;
    for card in catalog.iter() {
        let effects: Vec<String> = card.effects.iter().map(ToString::to_string).collect();
        println!(
            "{:<14} {:<10} cost {:>2} knowledge {:>2}  {:<16} [{}]",
            card.id.as_str(),
            card.card_type.as_str(),
            card.cost,
            card.knowledge_required,
            card.name,
            effects.join(", ")
        );
    }
    println!("{} cards", catalog.len());
    Ok(())
}

fn run_convert(input: &Path, era: Option<&str>, output: Option<&Path>) -> anyhow::Result<()> {
    let (catalog, report) =
        load_legacy_file(input, era).with_context(|| format!("converting {}", input.display()))?;
    for loss in &report.losses {
        eprintln!("{}: {:?} effect {:?}", loss.card_id, loss.kind, loss.effect);
    }
    let json = serde_json::to_string_pretty(&catalog)?;
    match output {
        Some(path) => std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    eprintln!(
        "Converted {} cards ({} lossy effects)",
        catalog.len(),
        report.losses.len()
    );
    Ok(())
}
