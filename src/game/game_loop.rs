//! Game loop implementation
//!
//! Drives a `GameState` to completion with one controller per side, asking
//! each controller for its ACTION and BUY choices.

use crate::core::{CardId, Side};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::score::{judge_winner, score_board, ScoreBoard};
use crate::game::turn_flow::{advance_phase_with_choice, affordable_supply, playable_action_cards};
use crate::game::{GameEndReason, GameOutcome, GameState, Phase};
use crate::{EngineError, Result};

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - turns and decisions (default)
    #[default]
    Normal = 2,
    /// Verbose - every phase and effect
    Verbose = 3,
}

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: GameOutcome,
    /// Value of the turn counter when the game ended
    pub turns_played: u32,
    pub end_reason: GameEndReason,
    pub scores: ScoreBoard,
}

impl GameResult {
    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            GameOutcome::Won(side) => Some(side),
            _ => None,
        }
    }
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state, replaced after every transition
    pub game: &'a mut GameState,
    /// Turn counter value at which the loop stops a game the rules have not ended
    max_turns: u32,
    /// Verbosity level for output (cached from game.logger)
    pub verbosity: VerbosityLevel,
    /// Number of controller decisions taken so far
    choice_counter: u32,
}

impl<'a> GameLoop<'a> {
    pub fn new(game: &'a mut GameState) -> Self {
        let verbosity = game.logger.verbosity();
        GameLoop {
            game,
            max_turns: 1000,
            verbosity,
            choice_counter: 0,
        }
    }

    /// Set the safety cap on turns
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set verbosity on both the loop and the game's logger
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self.game.logger.set_verbosity(verbosity);
        self
    }

    pub fn choices_made(&self) -> u32 {
        self.choice_counter
    }

    /// Run the game to completion
    pub fn run_game(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> Result<GameResult> {
        if controller1.side() == controller2.side() {
            return Err(EngineError::InvalidInput(format!(
                "both controllers play the {} side",
                controller1.side()
            )));
        }

        while !self.game.ended {
            if self.game.turn_count > self.max_turns {
                self.force_end();
                break;
            }
            let controller: &mut dyn PlayerController = if controller1.side() == self.game.active_side {
                &mut *controller1
            } else {
                &mut *controller2
            };
            self.step(controller);
        }

        let result = self.result();
        self.notify_game_end(controller1, result.winner());
        self.notify_game_end(controller2, result.winner());
        Ok(result)
    }

    /// Run until the current side's turn is over (or the game ends)
    pub fn run_turn(&mut self, controller: &mut dyn PlayerController) -> Result<()> {
        let side = self.game.active_side;
        if controller.side() != side {
            return Err(EngineError::InvalidInput(format!(
                "it is {side}'s turn, controller plays {}",
                controller.side()
            )));
        }
        while !self.game.ended && self.game.active_side == side {
            self.step(controller);
        }
        Ok(())
    }

    /// Advance one phase, consulting the controller in ACTION and BUY
    fn step(&mut self, controller: &mut dyn PlayerController) {
        let side = self.game.active_side;
        let choice = match self.game.phase {
            Phase::Draw => {
                self.game.logger.normal(&format!(
                    "=== Turn {} ({side}) ===",
                    self.game.turn_count
                ));
                None
            }
            Phase::Action => {
                let candidates = playable_action_cards(self.game, side);
                self.ask(controller, "plays", &candidates, |c, view, cands| {
                    c.choose_action_card(view, cands)
                })
            }
            Phase::Buy => {
                let candidates = affordable_supply(self.game, side);
                self.ask(controller, "buys", &candidates, |c, view, cands| {
                    c.choose_buy_card(view, cands)
                })
            }
            Phase::Resource | Phase::Cleanup => None,
        };
        *self.game = advance_phase_with_choice(self.game, choice.as_ref());
    }

    fn ask<F>(
        &mut self,
        controller: &mut dyn PlayerController,
        verb: &str,
        candidates: &[CardId],
        decide: F,
    ) -> Option<CardId>
    where
        F: FnOnce(&mut dyn PlayerController, &GameStateView, &[CardId]) -> Option<CardId>,
    {
        if candidates.is_empty() {
            return None;
        }
        let side = self.game.active_side;
        let view = GameStateView::new(self.game, side);
        let choice = decide(controller, &view, candidates);
        self.choice_counter += 1;
        let message = match &choice {
            Some(id) => format!("{verb} {id}"),
            None => format!("passes ({verb} nothing)"),
        };
        self.game.logger.controller_choice(side, &message);
        choice
    }

    /// Stop a game the rules have not ended yet and score it as it stands
    fn force_end(&mut self) {
        let mut ended = self.game.clone();
        ended.ended = true;
        ended.end_reason = Some(GameEndReason::LoopLimit);
        ended.outcome = judge_winner(&ended);
        ended
            .logger
            .game_end(&format!("Game stopped after {} turns: {}", self.max_turns, ended.outcome));
        *self.game = ended;
    }

    fn result(&self) -> GameResult {
        GameResult {
            outcome: self.game.outcome,
            turns_played: self.game.turn_count,
            end_reason: self.game.end_reason.unwrap_or(GameEndReason::LoopLimit),
            scores: score_board(self.game),
        }
    }

    fn notify_game_end(&self, controller: &mut dyn PlayerController, winner: Option<Side>) {
        let side = controller.side();
        let view = GameStateView::new(self.game, side);
        controller.on_game_end(&view, winner == Some(side));
    }
}
