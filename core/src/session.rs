use alloc::string::ToString;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// How many out-of-range moves a single turn tolerates before giving up.
pub const MAX_MOVE_RETRIES: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Continue,
    Won,
    Lost,
}

impl TurnOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Summary of a session, also the shape the command line prints as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub config: GridConfig,
    pub outcome: TurnOutcome,
    pub turns: usize,
    pub cleared: usize,
    pub triggered_mine: Option<Coord2>,
    pub inferred_mines: usize,
    pub inferred_safe: usize,
}

/// Mixed into the session seed so the agent never draws from the grid's stream.
const AGENT_SEED_MIX: u64 = 0x9e37_79b9;

/// Turn loop pairing one grid with the player that plays it.
#[derive(Clone, Debug)]
pub struct Session<P = InferenceAgent<SmallRng>> {
    grid: Grid,
    player: P,
    turns: usize,
    outcome: TurnOutcome,
}

impl Session<InferenceAgent<SmallRng>> {
    /// Generates a grid and an agent from one seed, each with its own stream.
    pub fn seeded(config: GridConfig, seed: u64) -> Result<Self> {
        let grid = Grid::generate(config, seed)?;
        Ok(Self::new(grid, InferenceAgent::new(seed.rotate_left(32) ^ AGENT_SEED_MIX)))
    }
}

impl<P: MoveSource> Session<P> {
    pub fn new(grid: Grid, player: P) -> Self {
        Self {
            grid,
            player,
            turns: 0,
            outcome: TurnOutcome::Continue,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn outcome(&self) -> TurnOutcome {
        self.outcome
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Asks the player for a move, reveals it, and reports whether the game goes on.
    pub fn play_turn(&mut self) -> Result<TurnOutcome> {
        if self.outcome.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        let coords = self.next_move()?;
        let revealed = self.grid.reveal(coords)?;
        self.turns += 1;
        log::info!("turn {}: reveal {},{}", self.turns, coords.0, coords.1);

        self.outcome = if revealed.is_hit() {
            TurnOutcome::Lost
        } else if self.grid.is_won() {
            TurnOutcome::Won
        } else {
            TurnOutcome::Continue
        };
        Ok(self.outcome)
    }

    /// Plays until the grid is cleared or a mine goes off.
    pub fn run(&mut self) -> Result<SessionReport> {
        while !self.play_turn()?.is_finished() {}
        let report = self.report();
        log::info!(
            "{:?} after {} turns, {} cells cleared",
            report.outcome,
            report.turns,
            report.cleared
        );
        Ok(report)
    }

    pub fn report(&self) -> SessionReport {
        let cleared = self
            .grid
            .revealed()
            .iter()
            .filter(|&&pos| !self.grid.label_at(pos).is_mine())
            .count();
        let (inferred_mines, inferred_safe) = self
            .player
            .deductions()
            .map_or((0, 0), |known| (known.mines().len(), known.safe().len()));
        SessionReport {
            config: self.grid.config(),
            outcome: self.outcome,
            turns: self.turns,
            cleared,
            triggered_mine: self.grid.triggered_mine(),
            inferred_mines,
            inferred_safe,
        }
    }

    /// The move travels as text, the same way an external player would submit it.
    fn next_move(&mut self) -> Result<Coord2> {
        let dimension = self.grid.dimension();
        let mut retries = 0;
        loop {
            let view = self.grid.visible_view();
            let text = self
                .player
                .next_move(&view, self.grid.revealed(), dimension)?
                .to_string();

            match text.parse::<Move>().and_then(|mv| mv.validate(dimension)) {
                Ok(coords) => return Ok(coords),
                Err(err @ GameError::OutOfRange { .. }) if retries < MAX_MOVE_RETRIES => {
                    retries += 1;
                    log::warn!("{}, asking again", err);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
