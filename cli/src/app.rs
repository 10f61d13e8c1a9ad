use std::io::{BufRead, Write};

use anyhow::Context;
use ottsweeper_core::{
    CellIndex, Cover, GameSession, GameState, MarkOutcome, RevealOutcome, Snapshot,
};
use web_time::Instant;

use crate::input::{Command, CommandError, HELP};
use crate::render;

/// Frame loop owning the session: one command in, one settled frame out.
pub(crate) struct App {
    session: GameSession,
    last_frame: Instant,
    pressed: Vec<CellIndex>,
}

/// Result of one command: whether the board changed, and a status line to print.
struct Step {
    redraw: bool,
    message: Option<String>,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            last_frame: Instant::now(),
            pressed: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        self.draw(&mut output)?;

        for line in input.lines() {
            let line = line.context("Could not read command")?;
            self.tick();

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => writeln!(output, "{}", HELP)?,
                Ok(command) => {
                    let step = self.apply(command);
                    if let Some(message) = step.message {
                        writeln!(output, "{}", message)?;
                    }
                    if step.redraw {
                        self.draw(&mut output)?;
                    }
                }
                Err(CommandError::Empty) => {}
                Err(err) => writeln!(output, "{}", err)?,
            }
        }

        Ok(())
    }

    fn tick(&mut self) {
        let now = Instant::now();
        self.session.tick(now.duration_since(self.last_frame));
        self.last_frame = now;
    }

    /// Applies one command. Only the end of a game produces a status line.
    fn apply(&mut self, command: Command) -> Step {
        let was_pressed = !self.pressed.is_empty();
        self.pressed.clear();

        let (mark, outcome) = match command {
            Command::Reveal(coords) => (MarkOutcome::NoChange, self.session.reveal(coords)),
            Command::Chord(coords) => (MarkOutcome::NoChange, self.session.chord_reveal(coords)),
            Command::Flag(coords) => (self.session.cycle_flag(coords), RevealOutcome::NoChange),
            Command::Peek(coords) => {
                let (pressed, any) = self.session.board().neighbors_of_type(coords, |_, cover| {
                    matches!(cover, Cover::Covered | Cover::Unknown)
                });
                if any && self.session.visible_kind(coords).is_some_and(|kind| !kind.is_covered()) {
                    self.pressed = pressed;
                }
                (MarkOutcome::NoChange, RevealOutcome::NoChange)
            }
            Command::Reset => {
                self.session.reset();
                self.last_frame = Instant::now();
                return Step {
                    redraw: true,
                    message: Some("New game".to_owned()),
                };
            }
            Command::Help | Command::Quit => (MarkOutcome::NoChange, RevealOutcome::NoChange),
        };

        let message = match (outcome, self.session.state()) {
            (RevealOutcome::Won, GameState::Win) => Some(format!(
                "You won! Time: {} s",
                self.session.elapsed_or_final_time().as_secs()
            )),
            (RevealOutcome::HitMine, GameState::Loss) => Some("You lose! Try again :)".to_owned()),
            _ => None,
        };
        Step {
            redraw: mark.has_update()
                || outcome.has_update()
                || was_pressed
                || !self.pressed.is_empty(),
            message,
        }
    }

    fn draw<W: Write>(&self, output: &mut W) -> anyhow::Result<()> {
        render::draw(&Snapshot::from_session(&self.session), &self.pressed, output)
            .context("Could not draw board")?;
        output.flush().context("Could not flush output")
    }
}
