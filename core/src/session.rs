use rand::prelude::*;
use web_time::{Instant, SystemTime};

use crate::*;

/// Everything one player's game needs, owned in one place.
///
/// A presentation layer resolves the pointer to a tile (see
/// [`Board::tile_at_point`]), forwards clicks here, and reads the engine back
/// to draw.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    engine: GameEngine,
    clicks: ClickInterpreter,
    clock: RoundClock,
    rng: SmallRng,
}

impl Session {
    /// Builds the board once and places the first round's mines.
    pub fn new(config: GameConfig, layout: Layout, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::with_layout(config.size, layout)?;
        board.place_mines(config.mines, &mut rng)?;
        Ok(Self {
            config,
            engine: GameEngine::new(board),
            clicks: ClickInterpreter::new(),
            clock: RoundClock::new(),
            rng,
        })
    }

    /// Like [`Session::new`], seeded from the wall clock.
    pub fn from_clock(config: GameConfig, layout: Layout) -> Result<Self> {
        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|since| since.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(config, layout, seed)
    }

    pub fn with_clicks(mut self, clicks: ClickInterpreter) -> Self {
        self.clicks = clicks;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn mines_remaining(&self) -> isize {
        self.engine.mines_remaining()
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.clock.elapsed_secs(now)
    }

    /// Tile under the pointer, if any is close enough.
    pub fn tile_at_point(&self, point: Point) -> Option<TileIndex> {
        self.engine.board().tile_at_point(point)
    }

    /// Reveals or chords while playing; starts a new round once finished.
    pub fn left_click(&mut self, tile: Option<TileIndex>, now: Instant) -> Result<Outcome> {
        if self.engine.is_finished() {
            self.reset_round()?;
            return Ok(Outcome::NewRound);
        }

        self.clock.start(now);
        let Some(action) = self.clicks.left_click(tile, now) else {
            return Ok(Outcome::Reveal(RevealOutcome::NoChange));
        };
        let outcome = self.engine.apply(action)?;
        if self.engine.is_finished() {
            self.clock.stop(now);
        }
        Ok(outcome)
    }

    /// Toggles a flag while playing; ignored once the round is finished.
    pub fn right_click(&mut self, tile: Option<TileIndex>, now: Instant) -> Result<Outcome> {
        if self.engine.is_finished() {
            return Ok(Outcome::Mark(MarkOutcome::NoChange));
        }

        self.clock.start(now);
        match self.clicks.right_click(tile) {
            Some(action) => self.engine.apply(action),
            None => Ok(Outcome::Mark(MarkOutcome::NoChange)),
        }
    }

    /// Re-places `config.mines` mines and returns to playing.
    pub fn reset_round(&mut self) -> Result<()> {
        self.engine.reset_round(self.config.mines, &mut self.rng)?;
        self.clicks.clear();
        self.clock.reset();
        Ok(())
    }
}
