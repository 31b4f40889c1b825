//! Protect It! - password generator with a strength meter, a spelling aid
//! and visual fingerprints (QR code and visual hash) of the password.
//!
//! The library holds all of the logic; the `protectit` binary only draws
//! [`controller::ViewState`] with egui and feeds user input back as
//! [`controller::Action`]s.

pub mod charset;
pub mod complexity;
pub mod controller;
pub mod error;
pub mod fingerprint;
pub mod password;
pub mod scheduler;
pub mod settings;
pub mod speller;

pub use error::{Error, Result};
