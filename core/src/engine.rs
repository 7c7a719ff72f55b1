use alloc::vec::Vec;
use core::ops::BitOr;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Playing, through a round reset, which always lands in Playing
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

impl Phase {
    /// Indicates the round has ended and only a reset is accepted
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Playing
    }
}

/// Discrete player action addressed by tile index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal(TileIndex),
    ToggleFlag(TileIndex),
    /// Reveal the tile, then reveal its neighbors if its flags account for
    /// every adjacent mine.
    Chord(TileIndex),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Detonated,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Detonated => true,
            Won => true,
        }
    }

    pub const fn detonated(self) -> bool {
        matches!(self, Self::Detonated)
    }
}

/// Used to merge outcomes when revealing several tiles in one action
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Detonated, _) => Detonated,
            (_, Detonated) => Detonated,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
    /// A finished round was replaced by a fresh one.
    NewRound,
}

impl Outcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Mark(outcome) => outcome.has_update(),
            Self::NewRound => true,
        }
    }
}

/// Applies player actions to a [`Board`] and tracks the round phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    board: Board,
    phase: Phase,
    triggered_mine: Option<TileIndex>,
}

impl GameEngine {
    /// Wraps a board whose mines are already placed.
    pub fn new(board: Board) -> Self {
        let mut engine = Self {
            board,
            phase: Phase::Playing,
            triggered_mine: None,
        };
        engine.refresh_phase();
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Total mines minus placed flags, recomputed on every call.
    pub fn mines_remaining(&self) -> isize {
        self.board.mines_remaining()
    }

    pub fn tile(&self, index: TileIndex) -> Result<&Tile> {
        self.board.tile(index)
    }

    pub fn neighbor_mine_count(&self, index: TileIndex) -> Result<u8> {
        self.board.neighbor_mine_count(index)
    }

    /// The mine that ended the round, if it was lost.
    pub fn triggered_mine(&self) -> Option<TileIndex> {
        self.triggered_mine
    }

    pub fn view(&self, index: TileIndex) -> Result<TileView> {
        let index = self.board.validate_index(index)?;
        Ok(self.view_unchecked(index))
    }

    /// Views of every tile, indexed by `[x, y]`.
    pub fn views(&self) -> Array2<TileView> {
        let size = self.board.size();
        Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            self.view_unchecked(linear_index((x as Coord, y as Coord), size.1))
        })
    }

    pub fn can_chord_reveal_at(&self, index: TileIndex) -> bool {
        if self.phase.is_finished() || index >= self.board.len() {
            return false;
        }

        let tile = self.board.at(index);
        tile.is_discovered
            && !tile.is_mine
            && self.board.count_neighbors(index, |t| t.is_mine)
                == self.board.count_neighbors(index, |t| t.is_flagged)
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        Ok(match action {
            Action::Reveal(index) => Outcome::Reveal(self.reveal(index)?),
            Action::ToggleFlag(index) => Outcome::Mark(self.toggle_flag(index)?),
            Action::Chord(index) => {
                let opened = self.reveal(index)?;
                Outcome::Reveal(opened | self.chord_reveal(index)?)
            }
        })
    }

    /// Reveals a single tile, cascading through zero-count regions.
    pub fn reveal(&mut self, index: TileIndex) -> Result<RevealOutcome> {
        let index = self.board.validate_index(index)?;
        if self.ignore_when_finished("reveal") {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.discover(index);
        Ok(self.conclude(outcome))
    }

    /// Reveals every neighbor of a discovered tile once its flag count
    /// matches its mine count. No-op otherwise.
    pub fn chord_reveal(&mut self, index: TileIndex) -> Result<RevealOutcome> {
        let index = self.board.validate_index(index)?;
        if self.ignore_when_finished("chord") {
            return Ok(RevealOutcome::NoChange);
        }
        if !self.can_chord_reveal_at(index) {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self
            .board
            .at(index)
            .neighbors()
            .map(|neighbor| self.discover(neighbor))
            .fold(RevealOutcome::NoChange, BitOr::bitor);
        Ok(self.conclude(outcome))
    }

    pub fn toggle_flag(&mut self, index: TileIndex) -> Result<MarkOutcome> {
        let index = self.board.validate_index(index)?;
        if self.ignore_when_finished("flag") {
            return Ok(MarkOutcome::NoChange);
        }

        let tile = self.board.at_mut(index);
        if tile.is_discovered {
            return Ok(MarkOutcome::NoChange);
        }
        tile.is_flagged = !tile.is_flagged;
        Ok(MarkOutcome::Changed)
    }

    /// Starts a new round with `mine_count` freshly placed mines.
    pub fn reset_round<R: Rng + ?Sized>(&mut self, mine_count: CellCount, rng: &mut R) -> Result<()> {
        self.board.place_mines(mine_count, rng)?;
        self.restart();
        Ok(())
    }

    /// Starts a new round with mines at exactly the given tiles.
    pub fn reset_round_at(&mut self, mines: &[TileIndex]) -> Result<()> {
        self.board.place_mines_at(mines)?;
        self.restart();
        Ok(())
    }

    fn restart(&mut self) {
        log::debug!("New round, previous phase {:?}", self.phase);
        self.phase = Phase::Playing;
        self.triggered_mine = None;
        self.refresh_phase();
    }

    fn ignore_when_finished(&self, action: &str) -> bool {
        if self.phase.is_finished() {
            log::debug!("Ignoring {} after round ended as {:?}", action, self.phase);
            true
        } else {
            false
        }
    }

    /// Marks `index` discovered and floods through zero-count neighbors.
    ///
    /// Flagged and already discovered tiles stop the flood, so every tile is
    /// discovered at most once and the worklist drains on a finite board.
    fn discover(&mut self, index: TileIndex) -> RevealOutcome {
        let tile = self.board.at(index);
        if tile.is_flagged || tile.is_discovered {
            return RevealOutcome::NoChange;
        }

        self.board.at_mut(index).is_discovered = true;
        if self.board.at(index).is_mine {
            log::debug!("Mine hit at {}", index);
            self.triggered_mine.get_or_insert(index);
            return RevealOutcome::Detonated;
        }

        let mut to_visit = Vec::new();
        if self.board.count_neighbors(index, |t| t.is_mine) == 0 {
            to_visit.extend(self.board.at(index).neighbors());
        }

        while let Some(visit) = to_visit.pop() {
            let tile = self.board.at_mut(visit);
            if tile.is_flagged || tile.is_discovered {
                continue;
            }
            // only reached through zero-count tiles, so never a mine
            tile.is_discovered = true;

            let count = self.board.count_neighbors(visit, |t| t.is_mine);
            log::trace!("Flood discovered tile {}, mine count: {}", visit, count);
            if count == 0 {
                let board = &self.board;
                to_visit.extend(board.at(visit).neighbors().filter(|&pos| {
                    let next = board.at(pos);
                    !next.is_discovered && !next.is_flagged
                }));
            }
        }

        RevealOutcome::Revealed
    }

    /// Recomputes the phase after an action and folds it into the outcome.
    fn conclude(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        if outcome.detonated() {
            self.phase = Phase::Lost;
            for tile in self.board.tiles_mut().filter(|tile| tile.is_mine) {
                tile.is_discovered = true;
            }
            log::debug!("Round lost");
            return RevealOutcome::Detonated;
        }

        if self.refresh_phase() {
            RevealOutcome::Won
        } else {
            outcome
        }
    }

    /// Moves a playing round to won once every safe tile is discovered,
    /// returning whether that transition happened.
    fn refresh_phase(&mut self) -> bool {
        if self.phase == Phase::Playing && self.board.all_safe_discovered() {
            self.phase = Phase::Won;
            log::debug!("Round won");
            true
        } else {
            false
        }
    }

    fn view_unchecked(&self, index: TileIndex) -> TileView {
        let tile = self.board.at(index);
        match (tile.is_discovered, tile.is_mine, tile.is_flagged) {
            (true, true, flagged) => TileView::Mine { flagged },
            (true, false, _) => {
                TileView::Revealed(self.board.count_neighbors(index, |t| t.is_mine))
            }
            (false, _, true) => TileView::Flagged,
            (false, _, false) => TileView::Hidden,
        }
    }
}
