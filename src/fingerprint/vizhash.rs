//! Visual hash: a deterministic abstract picture of the password bytes.
//!
//! The SHA-256 digest of the password seeds a ChaCha stream which picks a
//! background gradient and a stack of translucent rectangles and ellipses.
//! Same bytes, same picture; a one character change gives a different one.

use image::{Pixel, Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use super::{FingerprintKind, FingerprintRenderer, Surface};
use crate::error::RenderFailure;

const SHAPES: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct VisualHashRenderer {
    size: u32,
    canvas_supported: bool,
}

impl VisualHashRenderer {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            canvas_supported: true,
        }
    }

    /// Record whether the host can display drawn surfaces at all.
    pub fn with_canvas_support(mut self, supported: bool) -> Self {
        self.canvas_supported = supported;
        self
    }

    pub fn supports_canvas(&self) -> bool {
        self.canvas_supported
    }

    /// Draw the hash of `data` onto a new image.
    pub fn canvas_hash(&self, data: &[u8]) -> RgbaImage {
        let seed: [u8; 32] = Sha256::digest(data).into();
        let mut rng = ChaCha8Rng::from_seed(seed);
        let size = self.size;

        let top = random_color(&mut rng, 255);
        let bottom = random_color(&mut rng, 255);
        let mut image = RgbaImage::from_fn(size, size, |_, y| {
            let t = if size > 1 { y as f32 / (size - 1) as f32 } else { 0.0 };
            mix(top, bottom, t)
        });

        for _ in 0..SHAPES {
            let alpha = rng.random_range(60..=180);
            let color = random_color(&mut rng, alpha);
            let x0 = rng.random_range(0..size);
            let y0 = rng.random_range(0..size);
            let x1 = rng.random_range(x0..=size);
            let y1 = rng.random_range(y0..=size);
            if rng.random_bool(0.5) {
                fill_rect(&mut image, (x0, y0, x1, y1), color);
            } else {
                fill_ellipse(&mut image, (x0, y0, x1, y1), color);
            }
        }
        image
    }
}

fn random_color(rng: &mut impl Rng, alpha: u8) -> Rgba<u8> {
    Rgba([rng.random(), rng.random(), rng.random(), alpha])
}

fn mix(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let channel = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
    Rgba([channel(0), channel(1), channel(2), 255])
}

fn fill_rect(image: &mut RgbaImage, (x0, y0, x1, y1): (u32, u32, u32, u32), color: Rgba<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            image.get_pixel_mut(x, y).blend(&color);
        }
    }
}

fn fill_ellipse(image: &mut RgbaImage, (x0, y0, x1, y1): (u32, u32, u32, u32), color: Rgba<u8>) {
    let rx = (x1 - x0) as f32 / 2.0;
    let ry = (y1 - y0) as f32 / 2.0;
    if rx < 0.5 || ry < 0.5 {
        return;
    }
    let cx = x0 as f32 + rx;
    let cy = y0 as f32 + ry;
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                image.get_pixel_mut(x, y).blend(&color);
            }
        }
    }
}

impl FingerprintRenderer for VisualHashRenderer {
    fn kind(&self) -> FingerprintKind {
        FingerprintKind::VisualHash
    }

    fn render(
        &self,
        password: &str,
        requested: bool,
        existing: Option<Surface>,
    ) -> Result<Option<Surface>, RenderFailure> {
        if !self.canvas_supported {
            return Ok(existing);
        }

        if requested && !password.is_empty() {
            return Ok(Some(Surface::from_image(self.canvas_hash(password.as_bytes()))));
        }

        Ok(existing.map(|mut surface| {
            surface.hide();
            surface
        }))
    }
}
