//! Leaderboard panel
//!
//! Rows are read from the high score file each time the manager opens the
//! board. Text is the backend's job; this emits the panel and the crowns for
//! the three best distinct scores.

use glam::Vec2;

use crate::highscores::{HighScore, HighScores};
use crate::renderer::{DrawList, Drawable, Texture, layers};
use crate::sim::{GameManager, Rect};

/// Rows shown on the panel
pub const LEADERBOARD_ROWS: usize = 5;

const PANEL_TEXTURE_SIZE: Vec2 = Vec2::new(240.0, 288.0);
const PANEL_SCALE: f32 = 2.0;
/// First row's text origin and the gap between rows, in texture pixels
const ROW_ORIGIN: Vec2 = Vec2::new(43.0, 65.0);
const ROW_STEP: f32 = 37.0;
const CROWN_SIZE: Vec2 = Vec2::new(32.0, 32.0);

/// Screen rectangle of the panel, centered
pub fn panel_bounds(screen: Vec2) -> Rect {
    let size = PANEL_TEXTURE_SIZE * PANEL_SCALE;
    Rect::from_pos_size((screen - size) / 2.0, size)
}

pub struct Leaderboard {
    panel: Rect,
    rows: Vec<HighScore>,
    shown: bool,
}

impl Leaderboard {
    pub fn new(screen: Vec2) -> Self {
        Self {
            panel: panel_bounds(screen),
            rows: Vec::new(),
            shown: false,
        }
    }

    /// Follow the manager's overlay, reloading rows when the board opens.
    /// Returns true on the frame it opened.
    pub fn sync(&mut self, game: &GameManager, scores: &HighScores) -> bool {
        let open = game.overlay().leaderboard;
        let opened = open && !self.shown;
        if opened {
            self.rows = scores.get_high_scores(LEADERBOARD_ROWS);
            log::debug!("Leaderboard loaded {} rows", self.rows.len());
        }
        self.shown = open;
        opened
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn rows(&self) -> &[HighScore] {
        &self.rows
    }

    /// Screen position of a row's text
    pub fn row_position(&self, row: usize) -> Vec2 {
        self.panel.position() + (ROW_ORIGIN + Vec2::new(0.0, ROW_STEP * row as f32)) * PANEL_SCALE
    }

    /// Crown (1 = gold, 2, 3) for each row. Rows with equal scores share a
    /// crown, so more than three rows can be crowned.
    pub fn crowns(&self) -> Vec<Option<u8>> {
        let mut place = 0u8;
        let mut last = None;
        self.rows
            .iter()
            .map(|row| {
                if last != Some(row.score) {
                    place = place.saturating_add(1);
                    last = Some(row.score);
                }
                (place <= 3).then_some(place)
            })
            .collect()
    }
}

impl Drawable for Leaderboard {
    fn draw(&self, list: &mut DrawList) {
        if !self.shown {
            return;
        }
        list.push_quad(
            layers::PANEL,
            Texture::Leaderboard,
            &self.panel,
            &Rect::from_pos_size(Vec2::ZERO, PANEL_TEXTURE_SIZE),
            1.0,
        );

        for (row, crown) in self.crowns().into_iter().enumerate() {
            let Some(place) = crown else {
                continue;
            };
            let pos = self.row_position(row) - Vec2::new(CROWN_SIZE.x * PANEL_SCALE, 0.0);
            list.push_quad(
                layers::UI,
                Texture::Crowns,
                &Rect::from_pos_size(pos, CROWN_SIZE * PANEL_SCALE),
                &Rect::from_pos_size(Vec2::new(0.0, (place - 1) as f32 * CROWN_SIZE.y), CROWN_SIZE),
                1.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;

    fn scores_with(tag: &str, entries: &[(&str, u64)]) -> HighScores {
        let path = std::env::temp_dir().join(format!("full-throttle-board-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_file(&path);
        let mut scores = HighScores::open(path);
        for (name, score) in entries {
            scores.add_high_score(name, *score).unwrap();
        }
        scores
    }

    #[test]
    fn test_loads_when_opened() {
        let scores = scores_with("open", &[("ACE", 30), ("BEE", 20)]);
        let mut game = GameManager::new(Tuning::default()).unwrap();
        let mut board = Leaderboard::new(Vec2::new(1280.0, 720.0));

        assert!(!board.sync(&game, &scores));
        assert!(board.rows().is_empty());

        game.show_leaderboard();
        assert!(board.sync(&game, &scores));
        assert!(!board.sync(&game, &scores));
        assert_eq!(board.rows().len(), 2);
        assert_eq!(board.rows()[0].name, "ACE");

        game.close_leaderboard();
        board.sync(&game, &scores);
        assert!(!board.is_shown());
        let _ = std::fs::remove_file(scores.path());
    }

    #[test]
    fn test_crowns_share_ties() {
        let scores = scores_with("crowns", &[("A", 50), ("B", 50), ("C", 40), ("D", 30), ("E", 20)]);
        let mut game = GameManager::new(Tuning::default()).unwrap();
        let mut board = Leaderboard::new(Vec2::new(1280.0, 720.0));
        game.show_leaderboard();
        board.sync(&game, &scores);

        assert_eq!(board.crowns(), vec![Some(1), Some(1), Some(2), Some(3), None]);

        let mut list = DrawList::new();
        board.draw(&mut list);
        assert_eq!(list.quads_for(Texture::Leaderboard), 1);
        assert_eq!(list.quads_for(Texture::Crowns), 4);
        let _ = std::fs::remove_file(scores.path());
    }

    #[test]
    fn test_panel_is_centered() {
        let panel = panel_bounds(Vec2::new(1280.0, 720.0));
        assert_eq!(panel.position(), Vec2::new(400.0, 72.0));
        assert_eq!(panel.size(), Vec2::new(480.0, 576.0));
    }
}
