use bevy_ecs::prelude::Component;

/// World transform of a single bone, produced by the skeleton system each
/// frame. Rotation is in degrees, matching raylib's drawing API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for BonePose {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Playback state for a skeletal animation defined in the
/// [`SkeletonStore`](crate::resources::skeletonstore::SkeletonStore).
///
/// `bones` holds the most recently computed per-bone world transforms,
/// indexed like the skeleton's bone list. It is empty until the skeleton
/// system has run once.
#[derive(Debug, Clone, Component)]
pub struct SkeletonPose {
    pub skeleton_key: String,
    pub animation: String,
    pub elapsed: f32,
    pub playing: bool,
    pub bones: Vec<BonePose>,
}

impl SkeletonPose {
    pub fn new(skeleton_key: impl Into<String>, animation: impl Into<String>) -> Self {
        Self {
            skeleton_key: skeleton_key.into(),
            animation: animation.into(),
            elapsed: 0.0,
            playing: true,
            bones: Vec::new(),
        }
    }

    /// Switch to another animation and restart playback.
    pub fn play(&mut self, animation: impl Into<String>) {
        self.animation = animation.into();
        self.elapsed = 0.0;
        self.playing = true;
    }

    /// Freeze on the current pose.
    pub fn stop(&mut self) {
        self.playing = false;
    }
}
