//! Interactive text controller for a human player
//!
//! Prints the legal options as a numbered menu and reads a choice per line.
//! `0` or an empty line passes, `s` shows the supply, `?` shows help.
//! End of input passes every remaining decision.

use crate::core::{CardId, Side};
use crate::game::controller::{GameStateView, PlayerController};
use std::io::{self, BufRead, Write};

pub struct InteractiveController<R: BufRead, W: Write> {
    side: Side,
    input: R,
    output: W,
}

impl InteractiveController<io::StdinLock<'static>, io::Stdout> {
    /// Controller reading from stdin and writing to stdout
    pub fn stdio(side: Side) -> Self {
        InteractiveController::new(side, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractiveController<R, W> {
    pub fn new(side: Side, input: R, output: W) -> Self {
        InteractiveController { side, input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn show_status(&mut self, view: &GameStateView) -> io::Result<()> {
        let hand: Vec<&str> = view
            .hand()
            .iter()
            .map(|id| view.card_name(id).unwrap_or(id.as_str()))
            .collect();
        writeln!(
            self.output,
            "Turn {} {} | rice {} | knowledge {} | VP {} (opponent {})",
            view.turn_count(),
            view.phase(),
            view.rice(),
            view.knowledge(),
            view.victory_points(),
            view.opponent_victory_points()
        )?;
        writeln!(self.output, "Hand: {}", hand.join(", "))
    }

    fn show_supply(&mut self, view: &GameStateView) -> io::Result<()> {
        for (pile, card) in view.game().supply_cards() {
            writeln!(
                self.output,
                "  {:<14} {:<10} cost {:>2} knowledge {:>2} left {:>2}  {}",
                card.id.as_str(),
                card.card_type.as_str(),
                card.cost,
                card.knowledge_required,
                pile.remaining,
                card.text
            )?;
        }
        Ok(())
    }

    fn show_help(&mut self) -> io::Result<()> {
        writeln!(self.output, "  <number>  choose that option")?;
        writeln!(self.output, "  0 / enter pass")?;
        writeln!(self.output, "  s         show supply")?;
        writeln!(self.output, "  ?         this help")
    }

    fn prompt(&mut self, view: &GameStateView, title: &str, candidates: &[CardId]) -> io::Result<Option<CardId>> {
        self.show_status(view)?;
        writeln!(self.output, "{title}:")?;
        writeln!(self.output, "  0) pass")?;
        for (i, id) in candidates.iter().enumerate() {
            match view.card(id) {
                Some(card) => writeln!(self.output, "  {}) {} - {}", i + 1, card, card.text)?,
                None => writeln!(self.output, "  {}) {}", i + 1, id)?,
            }
        }

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim() {
                "" | "0" => return Ok(None),
                "s" => self.show_supply(view)?,
                "?" => self.show_help()?,
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= candidates.len() => {
                        return Ok(Some(candidates[n - 1].clone()));
                    }
                    _ => writeln!(self.output, "Enter 0-{} (? for help)", candidates.len())?,
                },
            }
        }
    }

    fn choose(&mut self, view: &GameStateView, title: &str, candidates: &[CardId]) -> Option<CardId> {
        self.prompt(view, title, candidates).unwrap_or_else(|e| {
            eprintln!("input error, passing: {e}");
            None
        })
    }
}

impl<R: BufRead, W: Write> PlayerController for InteractiveController<R, W> {
    fn side(&self) -> Side {
        self.side
    }

    fn name(&self) -> &str {
        "interactive"
    }

    fn choose_action_card(&mut self, view: &GameStateView, candidates: &[CardId]) -> Option<CardId> {
        if candidates.is_empty() {
            return None;
        }
        self.choose(view, "Play an action card", candidates)
    }

    fn choose_buy_card(&mut self, view: &GameStateView, candidates: &[CardId]) -> Option<CardId> {
        if candidates.is_empty() {
            return None;
        }
        self.choose(view, "Buy a card", candidates)
    }

    fn on_game_end(&mut self, view: &GameStateView, won: bool) {
        let verdict = if won { "You win!" } else { "Game over." };
        let _ = writeln!(
            self.output,
            "{verdict} {} VP to {} VP",
            view.victory_points(),
            view.opponent_victory_points()
        );
    }
}
