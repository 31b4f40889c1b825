//! QR code of the password's SHA-256 digest.

use image::Rgba;
use qrcode::{Color, QrCode};
use sha2::{Digest, Sha256};

use super::{FingerprintKind, FingerprintRenderer, Surface};
use crate::error::{Error, RenderFailure, Result};

/// Light modules around the code, as the QR standard requires
const QUIET_ZONE: usize = 4;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Hex encoded SHA-256 of `password`; the QR payload.
pub fn payload(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[derive(Debug, Clone, Copy)]
pub struct QrRenderer {
    size: u32,
}

impl QrRenderer {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Draw the code for `data` centred on `surface`, replacing its pixels.
    fn draw(&self, data: &str, surface: &mut Surface) -> Result<()> {
        let code = QrCode::new(data.as_bytes())?;
        let width = code.width();
        let modules = width + 2 * QUIET_ZONE;
        let scale = self.size / modules as u32;
        if scale == 0 {
            return Err(Error::SurfaceTooSmall {
                modules,
                size: self.size,
            });
        }
        let offset = (self.size - scale * modules as u32) / 2 + scale * QUIET_ZONE as u32;

        let image = surface.image_mut();
        for pixel in image.pixels_mut() {
            *pixel = LIGHT;
        }
        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color != Color::Dark {
                continue;
            }
            let x0 = offset + (i % width) as u32 * scale;
            let y0 = offset + (i / width) as u32 * scale;
            for y in y0..y0 + scale {
                for x in x0..x0 + scale {
                    image.put_pixel(x, y, DARK);
                }
            }
        }
        Ok(())
    }
}

impl FingerprintRenderer for QrRenderer {
    fn kind(&self) -> FingerprintKind {
        FingerprintKind::Qr
    }

    fn render(
        &self,
        password: &str,
        requested: bool,
        existing: Option<Surface>,
    ) -> std::result::Result<Option<Surface>, RenderFailure> {
        if !requested || password.is_empty() {
            return Ok(existing.map(|mut surface| {
                surface.hide();
                surface
            }));
        }

        // The failure placeholder is never drawn into
        let mut surface = match existing {
            Some(surface) if !surface.is_failed() && surface.size() == self.size => surface,
            _ => Surface::blank(self.size),
        };

        match self.draw(&payload(password), &mut surface) {
            Ok(()) => {
                surface.show();
                Ok(Some(surface))
            }
            Err(source) => Err(RenderFailure {
                kind: self.kind(),
                source,
                fallback: Some(Surface::failure_placeholder(self.size)),
            }),
        }
    }
}
