use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - InProgress -> Win / Lose (terminal until restart)
/// - InProgress <-> Paused
/// - any -> InProgress via restart with a fresh board
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Win,
    Lose,
    Paused,
}

impl GameState {
    /// The game ended and no moves can be made anymore.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }

    pub const fn accepts_moves(self) -> bool {
        matches!(self, Self::InProgress)
    }
}

/// External inputs accepted by the session, one per tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    ToggleFlag(Coord2),
    Pause,
    Resume,
    Restart,
}

/// What a command did, reported back to the caller for display updates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Revealed(RevealOutcome),
    Flagged(MarkOutcome),
    Paused,
    Resumed,
    Restarted,
    Ignored,
}

/// A single play-through of one board, from first reveal to win or loss.
///
/// The session exclusively owns all mutable game state. Every operation runs
/// synchronously to completion; commands arriving in states that do not accept
/// them are silently ignored, as are out-of-range coordinates, so stale input
/// events have no side effects.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    tiles: Array2<TileState>,
    revealed_count: CellCount,
    /// Display-only counter: total mines minus flags placed. Not validated
    /// against actual mine positions and may go negative when over-flagged.
    mines_left: i32,
    state: GameState,
    clock: PlayClock,
    win_banked: bool,
}

impl GameSession {
    pub fn new(board: Board, now: Instant) -> Self {
        let size = board.size();
        let mines_left = board.mine_count().into();
        Self {
            board,
            tiles: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            mines_left,
            state: GameState::InProgress,
            clock: PlayClock::start(now),
            win_banked: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn mines_left(&self) -> i32 {
        self.mines_left
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board.cell_at(coords)
    }

    pub fn tile_at(&self, coords: Coord2) -> TileState {
        self.tiles[coords.to_nd_index()]
    }

    /// Whole seconds of active play. Frozen while paused or after the game
    /// ended, so `now` only matters in `InProgress`.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.clock.elapsed_secs(now)
    }

    /// Single entry point for the external event loop.
    pub fn apply(
        &mut self,
        generator: &mut impl BoardGenerator,
        command: Command,
        now: Instant,
    ) -> Result<Applied> {
        Ok(match command {
            Command::Reveal(coords) => Applied::Revealed(self.reveal(coords, now)),
            Command::ToggleFlag(coords) => Applied::Flagged(self.toggle_flag(coords)),
            Command::Pause => {
                if self.pause(now) {
                    Applied::Paused
                } else {
                    Applied::Ignored
                }
            }
            Command::Resume => {
                if self.resume(now) {
                    Applied::Resumed
                } else {
                    Applied::Ignored
                }
            }
            Command::Restart => {
                self.restart(generator, now)?;
                Applied::Restarted
            }
        })
    }

    /// Reveals the tile at `coords`, flood-filling zero regions. Ignored
    /// unless the session is in progress, the coordinates are in bounds, and
    /// the tile is neither flagged nor already revealed.
    pub fn reveal(&mut self, coords: Coord2, now: Instant) -> RevealOutcome {
        if !self.state.accepts_moves() || !self.board.in_bounds(coords) {
            return RevealOutcome::NoChange;
        }
        if self.tile_at(coords) != TileState::Hidden {
            return RevealOutcome::NoChange;
        }

        if self.board.is_mine(coords) {
            self.reveal_all_mines();
            self.state = GameState::Lose;
            self.clock.freeze(now);
            log::debug!("mine hit at {coords:?}, session lost");
            return RevealOutcome::MineHit;
        }

        let newly_revealed = self.flood_reveal(coords);
        self.revealed_count += newly_revealed;
        log::debug!("revealed {newly_revealed} tiles from {coords:?}");

        if self.revealed_count == self.board.safe_cell_count() {
            self.state = GameState::Win;
            self.clock.freeze(now);
            log::debug!("all safe tiles revealed, session won");
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Breadth-first reveal starting at a safe cell: zero cells expand to
    /// their neighbors, non-zero cells form the revealed fringe. Returns how
    /// many previously hidden tiles became revealed.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut revealed = 0;
        let mut visited = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(coords) = queue.pop_front() {
            // Mines are never enqueued from a zero region, but the check
            // stays as a hard safety guard. Flagged tiles keep their flag.
            if self.tile_at(coords) != TileState::Hidden || self.board.is_mine(coords) {
                continue;
            }

            self.tiles[coords.to_nd_index()] = TileState::Revealed;
            revealed += 1;

            if self.board.cell_at(coords) == Cell::Number(0) {
                for neighbor in self.board.iter_neighbors(coords) {
                    if visited.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        revealed
    }

    /// Marks every mine revealed for end-of-game display. The revealed-tile
    /// counter tracks safe cells only, so it is left untouched.
    fn reveal_all_mines(&mut self) {
        for coords in self.board.iter_mines() {
            self.tiles[coords.to_nd_index()] = TileState::Revealed;
        }
    }

    /// Toggles a hidden tile's flag and adjusts the mines-left display
    /// counter. Ignored on revealed tiles, out-of-range coordinates, and
    /// outside `InProgress`.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.state.accepts_moves() || !self.board.in_bounds(coords) {
            return MarkOutcome::NoChange;
        }

        match self.tile_at(coords) {
            TileState::Hidden => {
                self.tiles[coords.to_nd_index()] = TileState::Flagged;
                self.mines_left -= 1;
                MarkOutcome::Changed
            }
            TileState::Flagged => {
                self.tiles[coords.to_nd_index()] = TileState::Hidden;
                self.mines_left += 1;
                MarkOutcome::Changed
            }
            TileState::Revealed => MarkOutcome::NoChange,
        }
    }

    /// Suspends play, pinning the clock. Returns whether the state changed.
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.state.accepts_moves() {
            self.state = GameState::Paused;
            self.clock.freeze(now);
            true
        } else {
            false
        }
    }

    /// Resumes from pause; the paused interval is excluded from play time.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.state == GameState::Paused {
            self.state = GameState::InProgress;
            self.clock.unfreeze(now);
            true
        } else {
            false
        }
    }

    /// Discards the current play-through and starts over on a freshly
    /// generated board with the same configuration. Valid from any state.
    pub fn restart(&mut self, generator: &mut impl BoardGenerator, now: Instant) -> Result<()> {
        let board = generator.generate(self.board.config())?;
        *self = Self::new(board, now);
        log::debug!("session restarted");
        Ok(())
    }

    /// One-shot win latch: yields the final elapsed seconds the first time it
    /// is called on a won session, `None` afterwards and in any other state.
    /// Guards the caller's leaderboard insertion against duplicate records.
    pub fn take_win_time(&mut self) -> Option<u64> {
        if self.state == GameState::Win && !self.win_banked {
            self.win_banked = true;
            self.clock.frozen_secs()
        } else {
            None
        }
    }
}
