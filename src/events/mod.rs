//! Event and message types exchanged across systems.
//!
//! Submodules:
//! - [`asset`] – load requests and results for the loader system
//! - [`audio`] – commands and messages for the background audio thread
//! - [`collision`] – overlap notifications from the collision detector
//! - [`switchdebug`] – toggle collision debug overlays on/off

pub mod asset;
pub mod audio;
pub mod collision;
pub mod switchdebug;
