use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::gpu::device::{TextureDesc, TextureFormat};

/// Floor checkerboard size in texels.
pub const FLOOR_TEXTURE_SIZE: u32 = 256;
/// Checker square size in texels.
pub const CHECKER_SQUARE: u32 = 32;
/// Light checker color, ARGB `0xFF808080`.
pub const CHECKER_LIGHT: [u8; 4] = [0x80, 0x80, 0x80, 0xFF];
/// Dark checker color, ARGB `0xFF404040`.
pub const CHECKER_DARK: [u8; 4] = [0x40, 0x40, 0x40, 0xFF];
/// Edge length of each mobile texture.
pub const MOBILE_TEXTURE_SIZE: u32 = 128;

const BLEND_MAP_SEED: u64 = 0x7269_7669_6577;
const BLEND_MAP_CELLS: usize = 8;

/// Tightly packed RGBA8 pixels with their creation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    /// Creation parameters.
    pub desc: TextureDesc,
    /// Row-major RGBA8 texels.
    pub pixels: Vec<u8>,
}

impl TextureImage {
    fn generate(
        label: &'static str,
        size: u32,
        format: TextureFormat,
        mut texel: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Self {
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                pixels.extend_from_slice(&texel(x, y));
            }
        }
        Self {
            desc: TextureDesc {
                label,
                width: size,
                height: size,
                format,
            },
            pixels,
        }
    }

    /// RGBA at texel `(x, y)`.
    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.desc.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// 256x256 checkerboard of 32-texel squares.
#[must_use]
pub fn floor_checker() -> TextureImage {
    TextureImage::generate(
        "Floor Texture",
        FLOOR_TEXTURE_SIZE,
        TextureFormat::Rgba8Unorm,
        |x, y| {
            if ((x / CHECKER_SQUARE) + (y / CHECKER_SQUARE)) % 2 == 0 {
                CHECKER_LIGHT
            } else {
                CHECKER_DARK
            }
        },
    )
}

/// The four mobile textures in binding order.
#[derive(Debug, Clone)]
pub struct MobileTextures {
    /// Primary surface.
    pub base: TextureImage,
    /// Secondary for selector 0.
    pub detail: TextureImage,
    /// Secondary for selector 1.
    pub blend_map: TextureImage,
    /// Secondary for selector 2.
    pub alternate: TextureImage,
}

impl MobileTextures {
    /// Generate the full set. Deterministic across runs.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            base: base_texture(),
            detail: brick_texture(),
            blend_map: blend_map_texture(),
            alternate: plate_texture(),
        }
    }
}

/// Framed panel with a diagonal gradient.
fn base_texture() -> TextureImage {
    let n = MOBILE_TEXTURE_SIZE;
    TextureImage::generate(
        "Mobile Base Texture",
        n,
        TextureFormat::Rgba8UnormSrgb,
        |x, y| {
            let border = n / 16;
            if x < border || y < border || x >= n - border || y >= n - border {
                return [30, 30, 40, 255];
            }
            let t = (x + y) as f32 / (2 * n) as f32;
            [(60.0 + 160.0 * t) as u8, (110.0 + 80.0 * t) as u8, 210, 255]
        },
    )
}

/// Running-bond bricks with mortar lines.
fn brick_texture() -> TextureImage {
    const BRICK_W: u32 = 32;
    const BRICK_H: u32 = 16;
    const MORTAR: u32 = 2;
    TextureImage::generate(
        "Mobile Detail Texture",
        MOBILE_TEXTURE_SIZE,
        TextureFormat::Rgba8UnormSrgb,
        |x, y| {
            let row = y / BRICK_H;
            let shifted = x + (row % 2) * (BRICK_W / 2);
            if y % BRICK_H < MORTAR || shifted % BRICK_W < MORTAR {
                [190, 185, 175, 255]
            } else {
                let shade = ((shifted / BRICK_W + row) % 3) as u8 * 12;
                [150 + shade, 60 + shade / 2, 45, 255]
            }
        },
    )
}

/// Smooth grayscale value noise: random lattice values, bilinearly
/// interpolated with wraparound so the map tiles.
fn blend_map_texture() -> TextureImage {
    let mut rng = StdRng::seed_from_u64(BLEND_MAP_SEED);
    let mut lattice = [[0.0_f32; BLEND_MAP_CELLS]; BLEND_MAP_CELLS];
    for row in &mut lattice {
        for value in row.iter_mut() {
            *value = rng.random::<f32>();
        }
    }
    let cell = (MOBILE_TEXTURE_SIZE as usize / BLEND_MAP_CELLS) as f32;
    TextureImage::generate(
        "Mobile Blend Map",
        MOBILE_TEXTURE_SIZE,
        TextureFormat::Rgba8Unorm,
        |x, y| {
            let fx = x as f32 / cell;
            let fy = y as f32 / cell;
            let (x0, y0) = (fx as usize, fy as usize);
            let (x1, y1) = ((x0 + 1) % BLEND_MAP_CELLS, (y0 + 1) % BLEND_MAP_CELLS);
            let (tx, ty) = (fx.fract(), fy.fract());
            let top = lattice[y0][x0] + (lattice[y0][x1] - lattice[y0][x0]) * tx;
            let bottom =
                lattice[y1][x0] + (lattice[y1][x1] - lattice[y1][x0]) * tx;
            let v = ((top + (bottom - top) * ty) * 255.0) as u8;
            [v, v, v, 255]
        },
    )
}

/// Brushed metal plate with corner rivets.
fn plate_texture() -> TextureImage {
    let n = MOBILE_TEXTURE_SIZE;
    TextureImage::generate(
        "Mobile Alternate Texture",
        n,
        TextureFormat::Rgba8UnormSrgb,
        |x, y| {
            let inset = n as f32 / 8.0;
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            let near = |c: f32| (c - inset).abs().min((c - (n as f32 - inset)).abs());
            if near(fx).hypot(near(fy)) < n as f32 / 32.0 {
                return [220, 220, 225, 255];
            }
            let streak = ((y * 7 + x / 16) % 11) as u8 * 3;
            [120 + streak, 125 + streak, 135 + streak, 255]
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_checker_layout() {
        let tex = floor_checker();
        assert_eq!(tex.desc.width, 256);
        assert_eq!(tex.desc.height, 256);
        assert_eq!(tex.desc.format, TextureFormat::Rgba8Unorm);
        assert_eq!(tex.pixels.len(), tex.desc.byte_len());

        assert_eq!(tex.texel(0, 0), [128, 128, 128, 255]);
        assert_eq!(tex.texel(31, 31), [128, 128, 128, 255]);
        assert_eq!(tex.texel(32, 0), [64, 64, 64, 255]);
        assert_eq!(tex.texel(0, 32), [64, 64, 64, 255]);
        assert_eq!(tex.texel(32, 32), [128, 128, 128, 255]);
        assert_eq!(tex.texel(255, 255), [128, 128, 128, 255]);
    }

    #[test]
    fn mobile_textures_are_complete_and_deterministic() {
        let a = MobileTextures::generate();
        let b = MobileTextures::generate();
        for (x, y) in [
            (&a.base, &b.base),
            (&a.detail, &b.detail),
            (&a.blend_map, &b.blend_map),
            (&a.alternate, &b.alternate),
        ] {
            assert_eq!(x.pixels.len(), x.desc.byte_len());
            assert_eq!(x, y);
        }
    }

    #[test]
    fn blend_map_is_grayscale_and_varied() {
        let tex = MobileTextures::generate().blend_map;
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        for px in tex.pixels.chunks(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            min = min.min(px[0]);
            max = max.max(px[0]);
        }
        assert!(max - min > 64);
    }
}
