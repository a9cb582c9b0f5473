//! Square RGBA raster with the few fill primitives the generators need

use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::catalog::Rgb;

pub type Rgba = [u8; 4];

pub fn opaque(color: Rgb) -> Rgba {
    [color.r, color.g, color.b, 255]
}

/// Round and clamp floating point channels to an opaque texel
pub fn texel(r: f32, g: f32, b: f32) -> Rgba {
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    [channel(r), channel(g), channel(b), 255]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    side: u32,
    pixels: Vec<Rgba>,
}

impl Raster {
    pub fn filled(side: u32, color: Rgba) -> Self {
        Self {
            side,
            pixels: vec![color; (side * side) as usize],
        }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.side + x) as usize]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        let index = (y * self.side + x) as usize;
        self.pixels[index] = color;
    }

    /// Fill every texel whose centre lies in `[x, x + w) x [y, y + h)`
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let (x0, x1) = self.texel_span(x, x + w);
        let (y0, y1) = self.texel_span(y, y + h);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set(px, py, color);
            }
        }
    }

    /// Fill every texel whose centre lies within `radius` of `(cx, cy)`
    pub fn fill_disk(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let (x0, x1) = self.texel_span(cx - radius, cx + radius + 1.0);
        let (y0, y1) = self.texel_span(cy - radius, cy + radius + 1.0);
        let r2 = radius * radius;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.set(px, py, color);
                }
            }
        }
    }

    /// Texel indices whose centres fall in `[from, to)`, clipped to the raster
    fn texel_span(&self, from: f32, to: f32) -> (u32, u32) {
        let side = self.side as f32;
        let start = (from - 0.5).ceil().clamp(0.0, side) as u32;
        let end = (to - 0.5).ceil().clamp(0.0, side) as u32;
        (start, end.max(start))
    }

    /// Upload-ready texture using nearest-neighbour sampling
    pub fn into_image(self) -> Image {
        let data: Vec<u8> = self.pixels.into_iter().flatten().collect();
        let mut image = Image::new(
            Extent3d {
                width: self.side,
                height: self.side,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            data,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        );
        image.sampler = ImageSampler::nearest();
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const BLACK: Rgba = [0, 0, 0, 255];

    #[test]
    fn test_fill_rect_covers_texel_centres() {
        let mut raster = Raster::filled(8, BLACK);
        raster.fill_rect(2.0, 2.0, 3.0, 2.0, RED);

        let red: usize = raster.pixels().iter().filter(|&&p| p == RED).count();
        assert_eq!(red, 6);
        assert_eq!(raster.pixel(2, 2), RED);
        assert_eq!(raster.pixel(4, 3), RED);
        assert_eq!(raster.pixel(5, 3), BLACK);
        assert_eq!(raster.pixel(2, 4), BLACK);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut raster = Raster::filled(4, BLACK);
        raster.fill_rect(2.0, 2.0, 10.0, 10.0, RED);
        assert_eq!(raster.pixels().iter().filter(|&&p| p == RED).count(), 4);
    }

    #[test]
    fn test_fill_disk_is_symmetric_and_clipped() {
        let mut raster = Raster::filled(16, BLACK);
        raster.fill_disk(8.0, 8.0, 3.0, RED);
        assert_eq!(raster.pixel(8, 8), RED);
        assert_eq!(raster.pixel(7, 7), RED);
        assert_eq!(raster.pixel(8, 12), BLACK);
        for y in 0..16 {
            for x in 0..16 {
                // Mirror around the disk centre at texel boundary 8
                assert_eq!(raster.pixel(x, y), raster.pixel(15 - x, 15 - y));
            }
        }

        let mut corner = Raster::filled(4, BLACK);
        corner.fill_disk(0.0, 0.0, 2.0, RED);
        assert_eq!(corner.pixel(0, 0), RED);
        assert_eq!(corner.pixel(3, 3), BLACK);
    }

    #[test]
    fn test_texel_rounds_and_clamps() {
        assert_eq!(texel(-4.0, 127.5, 300.0), [0, 128, 255, 255]);
    }

    #[test]
    fn test_into_image_keeps_dimensions() {
        let image = Raster::filled(32, RED).into_image();
        assert_eq!(image.width(), 32);
        assert_eq!(image.height(), 32);
    }
}
