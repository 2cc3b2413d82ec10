//! Game state, turn flow and controllers

pub mod controller;
pub mod game_loop;
pub mod heuristic_controller;
pub mod interactive_controller;
pub mod interpreter;
pub mod logger;
pub mod phase;
pub mod random_controller;
pub mod rules;
pub mod score;
pub mod state;
pub mod state_hash;
pub mod turn_flow;

pub use controller::{GameStateView, PlayerController};
pub use game_loop::{GameLoop, GameResult, VerbosityLevel};
pub use heuristic_controller::{run_opponent_turn, HeuristicController};
pub use interactive_controller::InteractiveController;
pub use interpreter::{apply_effect, apply_effects};
pub use logger::{GameLogger, LogEntry, OutputMode};
pub use phase::Phase;
pub use random_controller::RandomController;
pub use rules::{RulesConfig, SupplyCounts};
pub use score::{compute_victory_points, judge_winner, score_board, ScoreBoard};
pub use state::{GameEndReason, GameOutcome, GameState, SupplyPile};
pub use turn_flow::{advance_phase, advance_phase_with_choice, can_afford, run_turn_with_choices};
