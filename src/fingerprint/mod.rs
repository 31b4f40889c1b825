//! Visual fingerprints of the current password.
//!
//! Two independent renderers draw into [`Surface`]s: a QR code of the
//! password's SHA-256 digest and a visual hash of the raw password bytes.
//! [`Fingerprints`] drives both and keeps one failing renderer from
//! affecting the other.

pub mod qr;
pub mod vizhash;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use image::{Rgba, RgbaImage};
use log::warn;

use crate::error::RenderFailure;
pub use qr::QrRenderer;
pub use vizhash::VisualHashRenderer;

/// Width and height of both fingerprints, in pixels
pub const DEFAULT_SIZE: u32 = 128;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerprintKind {
    Qr,
    VisualHash,
}

impl fmt::Display for FingerprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FingerprintKind::Qr => write!(f, "QRCode"),
            FingerprintKind::VisualHash => write!(f, "VizHash"),
        }
    }
}

/// A square drawing surface holding one rendered fingerprint.
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
    hidden: bool,
    failed: bool,
    revision: u64,
}

impl Surface {
    /// White, visible surface
    pub fn blank(size: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255])),
            hidden: false,
            failed: false,
            revision: next_revision(),
        }
    }

    pub(crate) fn from_image(image: RgbaImage) -> Self {
        Self {
            image,
            hidden: false,
            failed: false,
            revision: next_revision(),
        }
    }

    /// Static image shown after a failed render. Renderers never reuse it.
    pub fn failure_placeholder(size: u32) -> Self {
        let mut image = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));
        let red = Rgba([200, 30, 30, 255]);
        let stroke = (size / 16).max(1);
        for i in 0..size {
            for t in 0..stroke {
                let j = (i + t).min(size - 1);
                image.put_pixel(i, j, red);
                image.put_pixel(size - 1 - i, j, red);
            }
        }
        Self {
            image,
            hidden: false,
            failed: true,
            revision: next_revision(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        self.revision = next_revision();
        &mut self.image
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    /// True for the failure placeholder
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Changes every time the pixels change; lets the UI cache uploads.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// One way of turning a password into a picture.
pub trait FingerprintRenderer {
    fn kind(&self) -> FingerprintKind;

    /// Render `password` if `requested`, otherwise hide `existing`.
    ///
    /// Returns the surface that should now be displayed, if any.
    fn render(
        &self,
        password: &str,
        requested: bool,
        existing: Option<Surface>,
    ) -> Result<Option<Surface>, RenderFailure>;
}

/// The fingerprint area of the view.
#[derive(Debug, Clone, Default)]
pub struct FingerprintPanel {
    pub visible: bool,
    pub qr: Option<Surface>,
    pub visual: Option<Surface>,
}

/// Which fingerprints the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerprintRequest {
    pub qr: bool,
    pub visual: bool,
}

impl FingerprintRequest {
    pub fn any(&self) -> bool {
        self.qr || self.visual
    }
}

/// Drives both renderers for every roll.
pub struct Fingerprints {
    qr: Box<dyn FingerprintRenderer>,
    visual: Box<dyn FingerprintRenderer>,
}

impl Fingerprints {
    pub fn new(size: u32, canvas_supported: bool) -> Self {
        Self {
            qr: Box::new(QrRenderer::new(size)),
            visual: Box::new(VisualHashRenderer::new(size).with_canvas_support(canvas_supported)),
        }
    }

    pub fn with_renderers(
        qr: Box<dyn FingerprintRenderer>,
        visual: Box<dyn FingerprintRenderer>,
    ) -> Self {
        Self { qr, visual }
    }

    /// Update `panel` for `password`.
    ///
    /// The panel is shown when at least one fingerprint is requested and the
    /// password is non-empty. An empty password drops both surfaces. Failures are collected, never propagated, so
    /// both renderers always get their turn.
    pub fn refresh(
        &self,
        panel: &mut FingerprintPanel,
        password: &str,
        request: FingerprintRequest,
    ) -> Vec<RenderFailure> {
        if password.is_empty() {
            panel.qr = None;
            panel.visual = None;
        }
        panel.visible = request.any() && !password.is_empty();
        if !panel.visible {
            return Vec::new();
        }

        let mut failures = Vec::new();
        for (renderer, slot, requested) in [
            (&self.qr, &mut panel.qr, request.qr),
            (&self.visual, &mut panel.visual, request.visual),
        ] {
            match renderer.render(password, requested, slot.take()) {
                Ok(surface) => *slot = surface,
                Err(mut failure) => {
                    warn!("{} render failed: {}", failure.kind, failure.source);
                    *slot = failure.fallback.take();
                    failures.push(failure);
                }
            }
        }
        failures
    }
}

// ------------------ TESTS ------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Broken;

    impl FingerprintRenderer for Broken {
        fn kind(&self) -> FingerprintKind {
            FingerprintKind::VisualHash
        }

        fn render(
            &self,
            _password: &str,
            _requested: bool,
            _existing: Option<Surface>,
        ) -> Result<Option<Surface>, RenderFailure> {
            Err(RenderFailure {
                kind: self.kind(),
                source: Error::SurfaceTooSmall { modules: 29, size: 0 },
                fallback: None,
            })
        }
    }

    fn both() -> FingerprintRequest {
        FingerprintRequest {
            qr: true,
            visual: true,
        }
    }

    #[test]
    fn test_panel_hidden_for_empty_password() {
        let fingerprints = Fingerprints::new(DEFAULT_SIZE, true);
        let mut panel = FingerprintPanel::default();
        let failures = fingerprints.refresh(&mut panel, "", both());
        assert!(failures.is_empty());
        assert!(!panel.visible);
        assert!(panel.qr.is_none());
    }

    #[test]
    fn test_empty_password_drops_previous_surfaces() {
        let fingerprints = Fingerprints::new(DEFAULT_SIZE, true);
        let mut panel = FingerprintPanel::default();
        fingerprints.refresh(&mut panel, "hunter2", both());
        assert!(panel.qr.is_some());
        assert!(panel.visual.is_some());

        fingerprints.refresh(&mut panel, "", both());
        assert!(!panel.visible);
        assert!(panel.qr.is_none());
        assert!(panel.visual.is_none());
    }

    #[test]
    fn test_panel_hidden_when_nothing_requested() {
        let fingerprints = Fingerprints::new(DEFAULT_SIZE, true);
        let mut panel = FingerprintPanel::default();
        fingerprints.refresh(&mut panel, "secret", FingerprintRequest::default());
        assert!(!panel.visible);
    }

    #[test]
    fn test_both_rendered() {
        let fingerprints = Fingerprints::new(DEFAULT_SIZE, true);
        let mut panel = FingerprintPanel::default();
        let failures = fingerprints.refresh(&mut panel, "secret", both());
        assert!(failures.is_empty());
        assert!(panel.visible);
        assert_eq!(panel.qr.as_ref().map(Surface::size), Some(DEFAULT_SIZE));
        assert_eq!(panel.visual.as_ref().map(Surface::size), Some(DEFAULT_SIZE));
    }

    #[test]
    fn test_unrequested_surface_is_hidden_not_dropped() {
        let fingerprints = Fingerprints::new(DEFAULT_SIZE, true);
        let mut panel = FingerprintPanel::default();
        fingerprints.refresh(&mut panel, "secret", both());
        fingerprints.refresh(
            &mut panel,
            "secret",
            FingerprintRequest {
                qr: false,
                visual: true,
            },
        );
        let qr = panel.qr.as_ref().expect("qr surface kept");
        assert!(qr.is_hidden());
        assert!(!panel.visual.as_ref().unwrap().is_hidden());
    }

    #[test]
    fn test_failure_is_isolated() {
        let fingerprints =
            Fingerprints::with_renderers(Box::new(QrRenderer::new(DEFAULT_SIZE)), Box::new(Broken));
        let mut panel = FingerprintPanel::default();
        let failures = fingerprints.refresh(&mut panel, "secret", both());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].kind, FingerprintKind::VisualHash);
        assert!(panel.visible);
        assert!(panel.qr.is_some());
        assert!(panel.visual.is_none());
    }

    #[test]
    fn test_failure_placeholder_is_marked() {
        let placeholder = Surface::failure_placeholder(32);
        assert!(placeholder.is_failed());
        assert_eq!(placeholder.size(), 32);
        assert!(!Surface::blank(32).is_failed());
    }

    #[test]
    fn test_revision_changes_on_mutation() {
        let mut surface = Surface::blank(8);
        let before = surface.revision();
        surface.image_mut();
        assert_ne!(before, surface.revision());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FingerprintKind::Qr.to_string(), "QRCode");
        assert_eq!(FingerprintKind::VisualHash.to_string(), "VizHash");
    }
}
