//! Polled keyboard and mouse state
//!
//! The window layer feeds raw events in; game code polls held/pressed/released
//! flags. Edge flags and typed text only last for the frame they arrived in.

use glam::Vec2;

use crate::sim::TickInput;
use crate::ui::MouseEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
    Backspace,
    Escape,
    Enter,
}

impl Key {
    pub const COUNT: usize = 12;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    pub const COUNT: usize = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags<const N: usize> {
    held: [bool; N],
    pressed: [bool; N],
    released: [bool; N],
}

impl<const N: usize> Default for Flags<N> {
    fn default() -> Self {
        Self {
            held: [false; N],
            pressed: [false; N],
            released: [false; N],
        }
    }
}

impl<const N: usize> Flags<N> {
    fn down(&mut self, i: usize) {
        // OS key repeat must not re-trigger the press edge
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    fn up(&mut self, i: usize) {
        if self.held[i] {
            self.released[i] = true;
        }
        self.held[i] = false;
    }

    fn clear_edges(&mut self) {
        self.pressed = [false; N];
        self.released = [false; N];
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: Flags<{ Key::COUNT }>,
    buttons: Flags<{ MouseButton::COUNT }>,
    mouse_pos: Vec2,
    typed: Vec<char>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Event feed ---

    pub fn key_down(&mut self, key: Key) {
        self.keys.down(key as usize);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.up(key as usize);
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        self.buttons.down(button as usize);
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        self.buttons.up(button as usize);
    }

    pub fn mouse_moved(&mut self, pos: Vec2) {
        self.mouse_pos = pos;
    }

    /// Text input, after the platform's keyboard layout is applied
    pub fn char_typed(&mut self, c: char) {
        self.typed.push(c);
    }

    /// Call once per frame after the game has polled
    pub fn end_frame(&mut self) {
        self.keys.clear_edges();
        self.buttons.clear_edges();
        self.typed.clear();
    }

    // --- Polling ---

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.held[key as usize]
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.keys.pressed[key as usize]
    }

    pub fn was_released(&self, key: Key) -> bool {
        self.keys.released[key as usize]
    }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.buttons.held[button as usize]
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons.pressed[button as usize]
    }

    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.buttons.released[button as usize]
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Characters typed this frame, in order
    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    /// Driving controls: arrows or WASD, space to dash
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_held(Key::A) || self.is_held(Key::Left),
            right: self.is_held(Key::D) || self.is_held(Key::Right),
            up: self.is_held(Key::W) || self.is_held(Key::Up),
            down: self.is_held(Key::S) || self.is_held(Key::Down),
            dash: self.is_held(Key::Space),
        }
    }

    /// This frame's pointer state for the UI
    pub fn mouse_event(&self) -> MouseEvent {
        MouseEvent {
            position: self.mouse_pos,
            pressed: [
                self.mouse_pressed(MouseButton::Left),
                self.mouse_pressed(MouseButton::Right),
            ],
            released: [
                self.mouse_released(MouseButton::Left),
                self.mouse_released(MouseButton::Right),
            ],
        }
    }
}
