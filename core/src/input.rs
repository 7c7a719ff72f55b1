use core::time::Duration;
use web_time::Instant;

use crate::*;

/// Turns left clicks into [`Action::Reveal`] or [`Action::Chord`].
///
/// A left click that lands within the chord window of the previous left
/// click, on any tile, is a chord. Clicks that miss every tile still restart
/// the window.
#[derive(Copy, Clone, Debug)]
pub struct ClickInterpreter {
    chord_window: Duration,
    last_left_click: Option<Instant>,
}

impl ClickInterpreter {
    pub const DEFAULT_CHORD_WINDOW: Duration = Duration::from_millis(180);

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_CHORD_WINDOW)
    }

    pub fn with_window(chord_window: Duration) -> Self {
        if chord_window.is_zero() {
            log::warn!("Chord window is zero, double clicks will never chord");
        }
        Self {
            chord_window,
            last_left_click: None,
        }
    }

    pub fn chord_window(&self) -> Duration {
        self.chord_window
    }

    /// Records a left click at `now` and classifies it.
    pub fn left_click(&mut self, tile: Option<TileIndex>, now: Instant) -> Option<Action> {
        let rapid = self
            .last_left_click
            .and_then(|last| now.checked_duration_since(last))
            .is_some_and(|since| since < self.chord_window);
        self.last_left_click = Some(now);

        let tile = tile?;
        Some(if rapid {
            log::trace!("Double click on tile {}", tile);
            Action::Chord(tile)
        } else {
            Action::Reveal(tile)
        })
    }

    pub fn right_click(&self, tile: Option<TileIndex>) -> Option<Action> {
        tile.map(Action::ToggleFlag)
    }

    /// Forgets the previous click, so the next one cannot chord.
    pub fn clear(&mut self) {
        self.last_left_click = None;
    }
}

impl Default for ClickInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_click_reveals() {
        let mut clicks = ClickInterpreter::new();

        assert_eq!(clicks.left_click(Some(3), Instant::now()), Some(Action::Reveal(3)));
    }

    #[test]
    fn rapid_second_click_chords() {
        let mut clicks = ClickInterpreter::new();
        let start = Instant::now();

        clicks.left_click(Some(3), start);
        let second = clicks.left_click(Some(3), start + Duration::from_millis(120));

        assert_eq!(second, Some(Action::Chord(3)));
    }

    #[test]
    fn slow_second_click_reveals() {
        let mut clicks = ClickInterpreter::new();
        let start = Instant::now();

        clicks.left_click(Some(3), start);
        let second = clicks.left_click(Some(3), start + ClickInterpreter::DEFAULT_CHORD_WINDOW);

        assert_eq!(second, Some(Action::Reveal(3)));
    }

    #[test]
    fn missed_click_still_starts_window() {
        let mut clicks = ClickInterpreter::with_window(Duration::from_millis(50));
        let start = Instant::now();

        assert_eq!(clicks.left_click(None, start), None);
        let second = clicks.left_click(Some(1), start + Duration::from_millis(10));

        assert_eq!(second, Some(Action::Chord(1)));
    }

    #[test]
    fn clear_forgets_previous_click() {
        let mut clicks = ClickInterpreter::new();
        let start = Instant::now();

        clicks.left_click(Some(2), start);
        clicks.clear();

        assert_eq!(
            clicks.left_click(Some(2), start + Duration::from_millis(1)),
            Some(Action::Reveal(2))
        );
    }

    #[test]
    fn right_click_toggles_flag() {
        let clicks = ClickInterpreter::new();

        assert_eq!(clicks.right_click(Some(5)), Some(Action::ToggleFlag(5)));
        assert_eq!(clicks.right_click(None), None);
    }
}
