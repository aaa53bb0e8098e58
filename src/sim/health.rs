//! Heart-based life counter

use glam::Vec2;

use super::anim::Animation;
use crate::consts::{HEART_FPS, HEART_FRAMES};

/// One heart icon. Frame 0 is full; playing runs it down to empty.
#[derive(Debug, Clone)]
pub struct Heart {
    anim: Animation,
    filled: bool,
    pub position: Vec2,
    pub size: Vec2,
}

impl Heart {
    /// New hearts start empty, resting on the last frame
    fn new(position: Vec2, size: Vec2) -> Self {
        let mut anim = Animation::new(HEART_FRAMES, HEART_FPS, false);
        anim.position = position;
        anim.jump_to_end();
        anim.pause();
        Self {
            anim,
            filled: false,
            position,
            size,
        }
    }

    fn add(&mut self) {
        self.anim.restart();
        self.anim.pause();
        self.filled = true;
    }

    fn remove(&mut self) {
        self.anim.play();
        self.filled = false;
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn animation(&self) -> &Animation {
        &self.anim
    }
}

/// Fixed row of hearts; the number of filled hearts always equals
/// `current_health`
#[derive(Debug, Clone)]
pub struct HealthManager {
    max_health: usize,
    current_health: usize,
    position: Vec2,
    heart_size: Vec2,
    hearts: Vec<Heart>,
}

impl HealthManager {
    pub fn new(max_health: usize, position: Vec2, height: f32) -> Self {
        let heart_size = Vec2::splat(height);
        let hearts = (0..max_health)
            .map(|i| {
                let mut heart = Heart::new(position + Vec2::new(i as f32 * height, 0.0), heart_size);
                heart.add();
                heart
            })
            .collect();

        Self {
            max_health,
            current_health: max_health,
            position,
            heart_size,
            hearts,
        }
    }

    pub fn max_health(&self) -> usize {
        self.max_health
    }

    pub fn current_health(&self) -> usize {
        self.current_health
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn filled_hearts(&self) -> usize {
        self.hearts.iter().filter(|h| h.is_filled()).count()
    }

    /// Lose one heart. Never drops below zero. Returns the new health.
    pub fn remove_health(&mut self) -> usize {
        if self.current_health == 0 {
            return 0;
        }
        self.current_health -= 1;
        self.hearts[self.current_health].remove();
        self.current_health
    }

    /// Regain one heart, up to the number of heart slots
    pub fn add_health(&mut self) -> usize {
        if self.current_health < self.hearts.len() {
            self.hearts[self.current_health].add();
            self.current_health += 1;
        }
        self.current_health
    }

    /// Append a heart slot, raising both maximum and current health
    pub fn add_max_health(&mut self) {
        let position = self.position + Vec2::new(self.hearts.len() as f32 * self.heart_size.x, 0.0);
        self.hearts.push(Heart::new(position, self.heart_size));
        self.max_health += 1;
        self.current_health += 1;
        self.hearts[self.current_health - 1].add();
    }

    /// Drop the last heart slot, keeping at least one. Returns whether a
    /// slot was removed.
    pub fn remove_max_health(&mut self) -> bool {
        if self.max_health <= 1 {
            return false;
        }
        self.hearts.pop();
        self.max_health -= 1;
        self.current_health = self.current_health.min(self.max_health);
        true
    }

    pub fn reset(&mut self) {
        self.current_health = self.max_health;
        for heart in &mut self.hearts {
            heart.add();
        }
    }

    pub fn animate(&mut self, dt: f32) {
        for heart in &mut self.hearts {
            heart.anim.advance(dt);
        }
    }
}
