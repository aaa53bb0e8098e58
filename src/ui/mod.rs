//! Clickable widgets
//!
//! Buttons hold typed callbacks registered per [`ActionType`]. The frame driver
//! hands each frame's [`MouseEvent`] to a [`ButtonSet`], which invokes the
//! callbacks directly with the context it is given.

pub mod leaderboard;
pub mod menu;
pub mod name_entry;

use glam::Vec2;

pub use leaderboard::{LEADERBOARD_ROWS, Leaderboard};
pub use menu::GameButtons;
pub use name_entry::{NAME_LENGTH, NameEntry};

use crate::renderer::{DrawList, Drawable, Texture, layers};
use crate::sim::Rect;

/// Pointer state for one frame. Button arrays are indexed left, right.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseEvent {
    pub position: Vec2,
    pub pressed: [bool; 2],
    pub released: [bool; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    LeftClick,
    RightClick,
    /// Pointer moved onto the button
    Enter,
    /// Pointer left the button
    Exit,
}

const CLICKS: [ActionType; 2] = [ActionType::LeftClick, ActionType::RightClick];

/// How a button should be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLook {
    Idle,
    Hovered,
    Held,
    Disabled,
}

impl ButtonLook {
    fn sheet_row(self) -> f32 {
        match self {
            ButtonLook::Idle => 0.0,
            ButtonLook::Hovered => 1.0,
            ButtonLook::Held => 2.0,
            ButtonLook::Disabled => 3.0,
        }
    }
}

struct Action<C> {
    kind: ActionType,
    /// Fires only while the button's enabled state equals this
    when_enabled: bool,
    callback: fn(&mut C),
}

pub struct Button<C> {
    bounds: Rect,
    actions: Vec<Action<C>>,
    hovered: bool,
    held: [bool; 2],
    pub enabled: bool,
    pub visible: bool,
}

impl<C> Button<C> {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            actions: Vec::new(),
            hovered: false,
            held: [false; 2],
            enabled: true,
            visible: true,
        }
    }

    /// Register a callback that fires while the button is enabled
    pub fn on(mut self, kind: ActionType, callback: fn(&mut C)) -> Self {
        self.actions.push(Action {
            kind,
            when_enabled: true,
            callback,
        });
        self
    }

    /// Register a callback that fires while the button is disabled
    pub fn on_disabled(mut self, kind: ActionType, callback: fn(&mut C)) -> Self {
        self.actions.push(Action {
            kind,
            when_enabled: false,
            callback,
        });
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.bounds = Rect::from_pos_size(pos, self.bounds.size());
    }

    /// Edges count as inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.bounds.left
            && point.x <= self.bounds.right()
            && point.y >= self.bounds.top
            && point.y <= self.bounds.bottom()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn look(&self) -> ButtonLook {
        if !self.enabled {
            ButtonLook::Disabled
        } else if self.held.iter().any(|&h| h) {
            ButtonLook::Held
        } else if self.hovered {
            ButtonLook::Hovered
        } else {
            ButtonLook::Idle
        }
    }

    /// Invoke every callback registered for `kind` in the current enabled state
    pub fn trigger(&self, kind: ActionType, ctx: &mut C) -> usize {
        let mut fired = 0;
        for action in &self.actions {
            if action.kind == kind && action.when_enabled == self.enabled {
                (action.callback)(ctx);
                fired += 1;
            }
        }
        fired
    }

    /// Feed one frame of pointer state. A click is a press and a release
    /// that both land on the button.
    pub fn handle(&mut self, event: &MouseEvent, ctx: &mut C) -> usize {
        let inside = self.contains_point(event.position);
        let mut fired = 0;

        if inside != self.hovered {
            self.hovered = inside;
            let kind = if inside { ActionType::Enter } else { ActionType::Exit };
            fired += self.trigger(kind, ctx);
        }

        for (i, kind) in CLICKS.into_iter().enumerate() {
            if event.pressed[i] && inside {
                self.held[i] = true;
            }
            if event.released[i] {
                if inside && self.held[i] {
                    fired += self.trigger(kind, ctx);
                }
                self.held[i] = false;
            }
        }
        fired
    }
}

impl<C> Drawable for Button<C> {
    fn draw(&self, list: &mut DrawList) {
        if !self.visible {
            return;
        }
        let size = self.bounds.size();
        list.push_quad(
            layers::UI,
            Texture::Button,
            &self.bounds,
            &Rect::from_pos_size(Vec2::new(0.0, self.look().sheet_row() * size.y), size),
            1.0,
        );
    }
}

/// Buttons that receive the frame's mouse event, registered once at startup
pub struct ButtonSet<C> {
    buttons: Vec<Button<C>>,
}

impl<C> Default for ButtonSet<C> {
    fn default() -> Self {
        Self { buttons: Vec::new() }
    }
}

impl<C> ButtonSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the button's index
    pub fn add(&mut self, button: Button<C>) -> usize {
        self.buttons.push(button);
        self.buttons.len() - 1
    }

    pub fn get(&self, idx: usize) -> Option<&Button<C>> {
        self.buttons.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Button<C>> {
        self.buttons.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Dispatch to every visible button; returns how many callbacks fired
    pub fn handle(&mut self, event: &MouseEvent, ctx: &mut C) -> usize {
        self.buttons
            .iter_mut()
            .filter(|b| b.visible)
            .map(|b| b.handle(event, ctx))
            .sum()
    }
}

impl<C> Drawable for ButtonSet<C> {
    fn draw(&self, list: &mut DrawList) {
        for button in &self.buttons {
            button.draw(list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        left: u32,
        right: u32,
        disabled: u32,
        entered: u32,
    }

    fn button() -> Button<Counter> {
        Button::<Counter>::new(Rect::new(10.0, 10.0, 100.0, 50.0))
            .on(ActionType::LeftClick, |c| c.left += 1)
            .on(ActionType::RightClick, |c| c.right += 1)
            .on_disabled(ActionType::LeftClick, |c| c.disabled += 1)
            .on(ActionType::Enter, |c| c.entered += 1)
    }

    fn at(x: f32, y: f32) -> MouseEvent {
        MouseEvent {
            position: Vec2::new(x, y),
            ..Default::default()
        }
    }

    fn click(b: &mut Button<Counter>, ctx: &mut Counter, x: f32, y: f32) {
        let mut down = at(x, y);
        down.pressed[0] = true;
        b.handle(&down, ctx);
        let mut up = at(x, y);
        up.released[0] = true;
        b.handle(&up, ctx);
    }

    #[test]
    fn test_click_inside_fires_once() {
        let mut b = button();
        let mut ctx = Counter::default();
        click(&mut b, &mut ctx, 50.0, 30.0);
        assert_eq!(ctx.left, 1);
        assert_eq!(ctx.entered, 1);
        assert_eq!(ctx.right, 0);
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut b = button();
        let mut ctx = Counter::default();
        let mut down = at(50.0, 30.0);
        down.pressed[0] = true;
        b.handle(&down, &mut ctx);
        assert_eq!(b.look(), ButtonLook::Held);

        let mut up = at(500.0, 500.0);
        up.released[0] = true;
        b.handle(&up, &mut ctx);
        assert_eq!(ctx.left, 0);
        assert_eq!(b.look(), ButtonLook::Idle);
    }

    #[test]
    fn test_disabled_runs_disabled_actions() {
        let mut b = button();
        let mut ctx = Counter::default();
        b.toggle_enabled();
        click(&mut b, &mut ctx, 50.0, 30.0);
        assert_eq!(ctx.left, 0);
        assert_eq!(ctx.disabled, 1);
        assert_eq!(b.look(), ButtonLook::Disabled);
    }

    #[test]
    fn test_set_skips_hidden_buttons() {
        let mut set = ButtonSet::new();
        let shown = set.add(button());
        let hidden = set.add(button());
        set.get_mut(hidden).unwrap().visible = false;

        let mut ctx = Counter::default();
        let mut down = at(50.0, 30.0);
        down.pressed[0] = true;
        set.handle(&down, &mut ctx);
        let mut up = at(50.0, 30.0);
        up.released[0] = true;
        set.handle(&up, &mut ctx);

        assert_eq!(ctx.left, 1);
        assert!(set.get(shown).unwrap().is_hovered());
        assert!(!set.get(hidden).unwrap().is_hovered());
    }
}
