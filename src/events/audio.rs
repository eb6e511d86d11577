//! Commands and messages exchanged with the background audio thread.
//!
//! Two kinds of audio share one command set: streamed tracks (music, pumped
//! continuously while playing) and one-shot clips (sound effects). Commands
//! carry locations already resolved through the resource root.

use bevy_ecs::message::Message;

/// Which loading/playback path a key uses on the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioKind {
    /// Streamed from disk while playing; supports pause/resume/looping.
    Stream,
    /// Fully loaded; fire-and-forget playback.
    Clip,
}

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone)]
pub enum AudioCmd {
    Load {
        key: String,
        path: String,
        kind: AudioKind,
    },
    /// Clips ignore `looped`.
    Play {
        key: String,
        looped: bool,
    },
    Stop {
        key: String,
    },
    Pause {
        key: String,
    },
    Resume {
        key: String,
    },
    SetVolume {
        key: String,
        vol: f32,
    },
    Unload {
        key: String,
    },
    UnloadAll,
    Shutdown,
}

/// Messages sent *back* from the audio thread.
#[derive(Message, Debug, Clone)]
pub enum AudioMessage {
    Loaded { key: String },
    LoadFailed { key: String, error: String },
    Started { key: String },
    Stopped { key: String },
    /// A non-looping stream reached its end, or a clip finished.
    Finished { key: String },
    VolumeChanged { key: String, vol: f32 },
    Unloaded { key: String },
    UnloadedAll,
}
