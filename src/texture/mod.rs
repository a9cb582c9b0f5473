//! Procedural surface textures
//!
//! Surfaces are synthesised block by block: the raster is split into a grid,
//! every block draws one noise sample, and the sample drives both a colour
//! jitter and a pattern specific motif. Randomness is injected by the caller so
//! a fixed seed reproduces the same surfaces.

use rand::Rng;

use crate::catalog::{PatternKind, Rgb};

pub mod raster;

pub use raster::Raster;
use raster::{Rgba, opaque, texel};

/// Smallest texture side in texels
pub const MIN_TEXTURE_SIDE: u32 = 128;
/// Texels per unit of body size
pub const TEXELS_PER_SIZE: f32 = 12.0;
/// Nominal number of blocks per raster side
const BLOCKS_PER_SIDE: u32 = 16;
const MIN_BLOCK_SIDE: u32 = 4;

/// Side of the square texture generated for a body of the given size
pub fn texture_side(size: f32) -> u32 {
    (size * TEXELS_PER_SIZE).max(MIN_TEXTURE_SIDE as f32) as u32
}

/// Side of a noise block for a texture of the given side
pub fn block_side(texture_side: u32) -> u32 {
    (texture_side / BLOCKS_PER_SIDE).max(MIN_BLOCK_SIDE)
}

/// Generate a surface texture for a body
pub fn generate<R: Rng + ?Sized>(base: Rgb, size: f32, pattern: PatternKind, rng: &mut R) -> Raster {
    let side = texture_side(size);
    let mut raster = Raster::filled(side, opaque(base));
    if pattern == PatternKind::Solid {
        return raster;
    }

    let block = block_side(side);
    let blocks = side.div_ceil(block);

    // Sample the whole noise grid up front, column by column
    let noise: Vec<Vec<f32>> = (0..blocks)
        .map(|_| (0..blocks).map(|_| rng.random::<f32>()).collect())
        .collect();

    let base_f = [base.r as f32, base.g as f32, base.b as f32];
    let bs = block as f32;

    for (bx, column) in noise.iter().enumerate() {
        for (by, &n) in column.iter().enumerate() {
            let variation = n * 40.0 - 20.0;
            let jittered = base_f.map(|c| (c + variation).clamp(0.0, 255.0));
            let block_color = texel(jittered[0], jittered[1], jittered[2]);
            let x0 = bx as f32 * bs;
            let y0 = by as f32 * bs;

            match pattern {
                PatternKind::Solid => {}
                PatternKind::Craters => {
                    if n > 0.7 {
                        let crater = bs * (0.3 + n * 0.7);
                        let cx = x0 + bs / 2.0;
                        let cy = y0 + bs / 2.0;
                        raster.fill_disk(cx, cy, crater / 2.0, block_color);

                        let shade = jittered.map(|c| c * 0.7);
                        raster.fill_disk(
                            cx - crater / 5.0,
                            cy - crater / 5.0,
                            crater / 3.0,
                            texel(shade[0], shade[1], shade[2]),
                        );
                    }
                }
                PatternKind::Gas => {
                    if by % 3 == 0 || n > 0.6 {
                        let height = bs * (0.5 + n * 1.5);
                        raster.fill_rect(x0, y0, bs, height, block_color);
                    }
                }
                PatternKind::Lava => {
                    if n > 0.3 {
                        let intensity = (155.0 + n * 100.0).floor();
                        let cx = x0 + rng.random::<f32>() * bs;
                        let cy = y0 + rng.random::<f32>() * bs;
                        raster.fill_disk(
                            cx,
                            cy,
                            bs * (0.2 + n * 0.6),
                            texel(intensity, intensity * 0.6, 0.0),
                        );
                    }
                }
                PatternKind::Ice => {
                    if n > 0.5 {
                        let frost = base_f.map(|c| c + 40.0);
                        raster.fill_rect(x0, y0, bs * 0.8, bs * 0.8, texel(frost[0], frost[1], frost[2]));
                    }
                }
            }
        }
    }

    raster
}

/// Colour stops of the sun glow, from the centre outwards
const GLOW_STOPS: [(f32, [f32; 4]); 4] = [
    (0.0, [255.0, 200.0, 50.0, 1.0]),
    (0.1, [255.0, 150.0, 0.0, 0.8]),
    (0.5, [255.0, 100.0, 0.0, 0.3]),
    (1.0, [255.0, 50.0, 0.0, 0.0]),
];

pub const GLOW_SIDE: u32 = 128;

/// Radial gradient used for the sun glow billboard
pub fn glow(side: u32) -> Raster {
    let mut raster = Raster::filled(side, [0, 0, 0, 0]);
    let half = side as f32 / 2.0;
    for y in 0..side {
        for x in 0..side {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let t = ((dx * dx + dy * dy).sqrt() / half).min(1.0);
            raster.set(x, y, gradient_at(t));
        }
    }
    raster
}

fn gradient_at(t: f32) -> Rgba {
    let upper = GLOW_STOPS
        .iter()
        .position(|(offset, _)| *offset >= t)
        .unwrap_or(GLOW_STOPS.len() - 1);
    let (to_offset, to) = GLOW_STOPS[upper];
    let (from_offset, from) = GLOW_STOPS[upper.saturating_sub(1)];
    let span = to_offset - from_offset;
    let f = if span > 0.0 { (t - from_offset) / span } else { 0.0 };
    let mix = |i: usize| from[i] + (to[i] - from[i]) * f;
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    [
        channel(mix(0)),
        channel(mix(1)),
        channel(mix(2)),
        channel(mix(3) * 255.0),
    ]
}
