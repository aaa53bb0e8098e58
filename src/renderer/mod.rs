//! Draw data
//!
//! Game objects emit textured quads into a [`DrawList`] each frame. Each batch
//! carries a layer ordinal; higher layers are further back and are returned
//! first so a backend can draw back-to-front without its own sorting.

pub mod scene;
pub mod vertex;

pub use vertex::{TexVertex, quad};

use crate::sim::Rect;

/// Depth ordinal; larger is further back
pub type Layer = u8;

pub mod layers {
    use super::Layer;

    pub const ROAD: Layer = 10;
    pub const PICKUPS: Layer = 8;
    pub const OBSTACLES: Layer = 7;
    pub const PLAYER: Layer = 5;
    pub const EXPLOSION: Layer = 4;
    pub const HUD: Layer = 3;
    pub const ALERT: Layer = 2;
    /// Backing panels under widgets
    pub const PANEL: Layer = 1;
    pub const UI: Layer = 0;
}

/// Sprite sheet a batch samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Texture {
    RoadTiles,
    Obstacles,
    Pickups,
    Explosion,
    Player,
    Hearts,
    HealthAlert,
    FuelBar,
    Button,
    Leaderboard,
    Crowns,
    LetterReel,
    UpgradeMarker,
}

/// Quads sharing a layer and a texture
#[derive(Debug, Clone)]
pub struct Batch {
    pub layer: Layer,
    pub texture: Texture,
    pub vertices: Vec<TexVertex>,
}

impl Batch {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

#[derive(Debug, Default)]
pub struct DrawList {
    batches: Vec<Batch>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's quads, keeping allocations
    pub fn clear(&mut self) {
        for batch in &mut self.batches {
            batch.vertices.clear();
        }
    }

    pub fn push_quad(&mut self, layer: Layer, texture: Texture, dest: &Rect, src: &Rect, alpha: f32) {
        let idx = match self
            .batches
            .iter()
            .position(|b| b.layer == layer && b.texture == texture)
        {
            Some(idx) => idx,
            None => {
                self.batches.push(Batch {
                    layer,
                    texture,
                    vertices: Vec::new(),
                });
                self.batches.len() - 1
            }
        };
        self.batches[idx].vertices.extend_from_slice(&quad(dest, src, alpha));
    }

    /// Non-empty batches, furthest layer first. Batches on the same layer
    /// keep the order they were first used in.
    pub fn back_to_front(&self) -> Vec<&Batch> {
        let mut batches: Vec<&Batch> = self.batches.iter().filter(|b| !b.vertices.is_empty()).collect();
        batches.sort_by(|a, b| b.layer.cmp(&a.layer));
        batches
    }

    pub fn quad_count(&self) -> usize {
        self.batches.iter().map(Batch::quad_count).sum()
    }

    pub fn quads_for(&self, texture: Texture) -> usize {
        self.batches
            .iter()
            .filter(|b| b.texture == texture)
            .map(Batch::quad_count)
            .sum()
    }
}

/// Anything that can emit quads for the current frame
pub trait Drawable {
    fn draw(&self, list: &mut DrawList);
}
