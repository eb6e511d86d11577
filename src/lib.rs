//! Packhorse library.
//!
//! A 2D asset-pipeline runtime: entities declare the assets they need in a
//! manifest component, and the engine resolves, loads, and wires them
//! (textures, sprite-sheet animations, skeletal animations, audio) relative
//! to a configurable resource root. Exposed as a library for integration
//! tests and embedding.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
