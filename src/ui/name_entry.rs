//! Letter reels for entering a leaderboard name
//!
//! Each reel holds one of `A..=Z` and spins with wraparound. Reels take
//! keyboard focus one at a time; typed letters fill the focused reel and move
//! focus right.

use glam::Vec2;

use crate::platform::{InputState, Key};
use crate::renderer::{DrawList, Drawable, Texture, layers};
use crate::sim::Rect;

pub const NAME_LENGTH: usize = 3;

/// One reel in the sheet; the letter strip sits below the frame row
const REEL_SIZE: Vec2 = Vec2::new(64.0, 128.0);
const LETTER_SIZE: Vec2 = Vec2::new(64.0, 64.0);

#[derive(Debug, Clone, PartialEq)]
pub struct NameEntry {
    letters: [u8; NAME_LENGTH],
    focus: usize,
    origin: Vec2,
}

impl NameEntry {
    /// Reels laid out left to right from `origin`
    pub fn new(origin: Vec2) -> Self {
        Self {
            letters: [b'A'; NAME_LENGTH],
            focus: 0,
            origin,
        }
    }

    pub fn reset(&mut self) {
        self.letters = [b'A'; NAME_LENGTH];
        self.focus = 0;
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn name(&self) -> String {
        self.letters.iter().map(|&b| b as char).collect()
    }

    /// Previous letter on the focused reel, `A` wraps to `Z`
    pub fn spin_up(&mut self) {
        let letter = &mut self.letters[self.focus];
        *letter = if *letter == b'A' { b'Z' } else { *letter - 1 };
    }

    /// Next letter on the focused reel, `Z` wraps to `A`
    pub fn spin_down(&mut self) {
        let letter = &mut self.letters[self.focus];
        *letter = if *letter == b'Z' { b'A' } else { *letter + 1 };
    }

    pub fn focus_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_right(&mut self) {
        self.focus = (self.focus + 1).min(NAME_LENGTH - 1);
    }

    /// Set the focused reel to `c` if it is a letter. Returns whether it was.
    pub fn type_char(&mut self, c: char) -> bool {
        if !c.is_ascii_alphabetic() {
            return false;
        }
        self.letters[self.focus] = c.to_ascii_uppercase() as u8;
        self.focus_right();
        true
    }

    /// Apply this frame's keyboard input. Returns true when Enter was
    /// pressed to confirm the name.
    pub fn feed(&mut self, input: &InputState) -> bool {
        for &c in input.typed() {
            self.type_char(c);
        }
        if input.was_pressed(Key::Up) {
            self.spin_up();
        }
        if input.was_pressed(Key::Down) {
            self.spin_down();
        }
        if input.was_pressed(Key::Left) || input.was_pressed(Key::Backspace) {
            self.focus_left();
        }
        if input.was_pressed(Key::Right) {
            self.focus_right();
        }
        input.was_pressed(Key::Enter)
    }

    pub fn reel_bounds(&self, reel: usize) -> Rect {
        Rect::from_pos_size(self.origin + Vec2::new(reel as f32 * REEL_SIZE.x, 0.0), REEL_SIZE)
    }
}

impl Drawable for NameEntry {
    fn draw(&self, list: &mut DrawList) {
        for (i, &letter) in self.letters.iter().enumerate() {
            let reel = self.reel_bounds(i);
            let frame_row = if i == self.focus { 1.0 } else { 0.0 };
            list.push_quad(
                layers::PANEL,
                Texture::LetterReel,
                &reel,
                &Rect::from_pos_size(Vec2::new(frame_row * REEL_SIZE.x, 0.0), REEL_SIZE),
                1.0,
            );

            let glyph = Vec2::new((letter - b'A') as f32 * LETTER_SIZE.x, REEL_SIZE.y);
            let centered = reel.position() + (REEL_SIZE - LETTER_SIZE) / 2.0;
            list.push_quad(
                layers::UI,
                Texture::LetterReel,
                &Rect::from_pos_size(centered, LETTER_SIZE),
                &Rect::from_pos_size(glyph, LETTER_SIZE),
                1.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reels_wrap() {
        let mut entry = NameEntry::new(Vec2::ZERO);
        entry.spin_up();
        assert_eq!(entry.name(), "ZAA");
        entry.spin_down();
        entry.spin_down();
        assert_eq!(entry.name(), "BAA");
    }

    #[test]
    fn test_typing_fills_and_advances() {
        let mut entry = NameEntry::new(Vec2::ZERO);
        assert!(entry.type_char('j'));
        assert!(!entry.type_char('7'));
        entry.type_char('o');
        entry.type_char('e');
        entry.type_char('x');
        // Focus stays on the last reel
        assert_eq!(entry.name(), "JOX");
        assert_eq!(entry.focus(), NAME_LENGTH - 1);
    }

    #[test]
    fn test_feed_from_input() {
        let mut entry = NameEntry::new(Vec2::ZERO);
        let mut input = InputState::new();
        input.char_typed('b');
        input.key_down(Key::Backspace);
        input.key_down(Key::Down);
        // Typing moves focus on, the arrow spins the second reel, then
        // backspace steps back
        assert!(!entry.feed(&input));
        assert_eq!(entry.name(), "BBA");
        assert_eq!(entry.focus(), 0);
        input.end_frame();

        input.key_down(Key::Enter);
        assert!(entry.feed(&input));
    }

    #[test]
    fn test_draws_frame_and_letter_per_reel() {
        let entry = NameEntry::new(Vec2::new(100.0, 300.0));
        let mut list = DrawList::new();
        entry.draw(&mut list);
        assert_eq!(list.quads_for(Texture::LetterReel), NAME_LENGTH * 2);
        assert_eq!(entry.reel_bounds(2).left, 228.0);
    }
}
