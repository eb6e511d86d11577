//! ECS components for entities.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangular collider
//! - [`manifest`] – declared assets, loaded when the component appears
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`sheetanim`] – sprite-sheet animation playback state
//! - [`skeletonpose`] – skeletal animation playback state and computed pose
//! - [`sprite`] – 2D sprite rendering component
//! - [`zindex`] – rendering order hint

pub mod boxcollider;
pub mod manifest;
pub mod mapposition;
pub mod sheetanim;
pub mod skeletonpose;
pub mod sprite;
pub mod zindex;
