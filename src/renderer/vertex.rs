//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::Rect;

/// Textured 2D vertex. Texcoords are in sheet pixels; the backend normalizes
/// by the bound texture's size.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TexVertex {
    pub position: [f32; 2],
    pub texcoord: [f32; 2],
    pub alpha: f32,
}

impl TexVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, alpha: f32) -> Self {
        Self {
            position: [x, y],
            texcoord: [u, v],
            alpha,
        }
    }

    fn at(pos: Vec2, uv: Vec2, alpha: f32) -> Self {
        Self::new(pos.x, pos.y, uv.x, uv.y, alpha)
    }
}

/// Two triangles mapping `src` (sheet pixels) onto `dest` (screen pixels)
pub fn quad(dest: &Rect, src: &Rect, alpha: f32) -> [TexVertex; 6] {
    let tl = TexVertex::at(dest.position(), src.position(), alpha);
    let tr = TexVertex::at(
        Vec2::new(dest.right(), dest.top),
        Vec2::new(src.right(), src.top),
        alpha,
    );
    let bl = TexVertex::at(
        Vec2::new(dest.left, dest.bottom()),
        Vec2::new(src.left, src.bottom()),
        alpha,
    );
    let br = TexVertex::at(
        Vec2::new(dest.right(), dest.bottom()),
        Vec2::new(src.right(), src.bottom()),
        alpha,
    );
    [tl, tr, bl, bl, tr, br]
}
