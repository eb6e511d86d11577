//! Audio playback on a dedicated thread.
//!
//! Raylib audio handles are not sendable across threads, so a single
//! background thread owns the audio device and every loaded handle:
//! - [`audio_thread`] runs the device, reacts to
//!   [`AudioCmd`](crate::events::audio::AudioCmd)s and reports back with
//!   [`AudioMessage`](crate::events::audio::AudioMessage)s.
//! - [`forward_audio_cmds`] moves ECS command messages onto the channel.
//! - [`poll_audio_messages`] drains the thread's responses into the ECS
//!   mailbox each frame.
//! - the two `update_*` systems advance the double-buffered mailboxes.
//!
//! Streams need `update_stream()` pumped while playing; the thread's loop
//! takes care of that and detects natural end-of-track, restarting looped
//! streams and emitting `Finished` otherwise. Clips are fire-and-forget;
//! their end is detected by polling `is_playing`.
//!
//! Spawn the thread once via
//! [`setup_audio`](crate::resources::audio::setup_audio) and stop it via
//! [`shutdown_audio`](crate::resources::audio::shutdown_audio).

use crate::events::audio::{AudioCmd, AudioKind, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::Messages;
use bevy_ecs::prelude::{MessageReader, MessageWriter, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Drain pending thread messages into the ECS mailbox. Non-blocking; run
/// every frame.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS [`AudioCmd`] messages to the audio thread.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // send errors only happen during shutdown; drop the command
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Owns the audio device and all `Music`/`Sound` handles for its lifetime.
/// Blocks until [`AudioCmd::Shutdown`] arrives, then unloads everything and
/// exits.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("audio device init failed, audio disabled: {}", e);
            return;
        }
    };

    debug!("audio thread starting (id={:?})", std::thread::current().id());

    let mut streams: FxHashMap<String, Music> = FxHashMap::default();
    let mut stream_playing: FxHashSet<String> = FxHashSet::default();
    let mut stream_looped: FxHashSet<String> = FxHashSet::default();
    let mut clips: FxHashMap<String, Sound> = FxHashMap::default();
    let mut clip_playing: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::Load { key, path, kind } => match kind {
                    AudioKind::Stream => match audio.new_music(&path) {
                        Ok(music) => {
                            info!("stream '{}' loaded from '{}'", key, path);
                            streams.insert(key.clone(), music);
                            let _ = tx_msg.send(AudioMessage::Loaded { key });
                        }
                        Err(e) => {
                            warn!("stream '{}' failed to load from '{}': {}", key, path, e);
                            let _ = tx_msg.send(AudioMessage::LoadFailed {
                                key,
                                error: e.to_string(),
                            });
                        }
                    },
                    AudioKind::Clip => match audio.new_sound(&path) {
                        Ok(sound) => {
                            info!("clip '{}' loaded from '{}'", key, path);
                            clips.insert(key.clone(), sound);
                            let _ = tx_msg.send(AudioMessage::Loaded { key });
                        }
                        Err(e) => {
                            warn!("clip '{}' failed to load from '{}': {}", key, path, e);
                            let _ = tx_msg.send(AudioMessage::LoadFailed {
                                key,
                                error: e.to_string(),
                            });
                        }
                    },
                },
                AudioCmd::Play { key, looped } => {
                    if let Some(music) = streams.get(&key) {
                        debug!("stream '{}' play, looped={}", key, looped);
                        music.seek_stream(0.0);
                        music.play_stream();
                        stream_playing.insert(key.clone());
                        if looped {
                            stream_looped.insert(key.clone());
                        } else {
                            stream_looped.remove(&key);
                        }
                        let _ = tx_msg.send(AudioMessage::Started { key });
                    } else if let Some(sound) = clips.get(&key) {
                        debug!("clip '{}' play", key);
                        sound.play();
                        clip_playing.insert(key.clone());
                        let _ = tx_msg.send(AudioMessage::Started { key });
                    } else {
                        warn!("play '{}' ignored: not loaded", key);
                    }
                }
                AudioCmd::Stop { key } => {
                    if let Some(music) = streams.get(&key) {
                        music.stop_stream();
                        stream_playing.remove(&key);
                        stream_looped.remove(&key);
                        let _ = tx_msg.send(AudioMessage::Stopped { key });
                    } else if let Some(sound) = clips.get(&key) {
                        sound.stop();
                        clip_playing.remove(&key);
                        let _ = tx_msg.send(AudioMessage::Stopped { key });
                    }
                }
                AudioCmd::Pause { key } => {
                    if let Some(music) = streams.get(&key) {
                        music.pause_stream();
                        stream_playing.remove(&key);
                        let _ = tx_msg.send(AudioMessage::Stopped { key });
                    }
                }
                AudioCmd::Resume { key } => {
                    if let Some(music) = streams.get(&key) {
                        music.resume_stream();
                        stream_playing.insert(key.clone());
                        let _ = tx_msg.send(AudioMessage::Started { key });
                    }
                }
                AudioCmd::SetVolume { key, vol } => {
                    if let Some(music) = streams.get(&key) {
                        music.set_volume(vol);
                        let _ = tx_msg.send(AudioMessage::VolumeChanged { key, vol });
                    } else if let Some(sound) = clips.get(&key) {
                        sound.set_volume(vol);
                        let _ = tx_msg.send(AudioMessage::VolumeChanged { key, vol });
                    }
                }
                AudioCmd::Unload { key } => {
                    if let Some(music) = streams.remove(&key) {
                        drop(music);
                        stream_playing.remove(&key);
                        stream_looped.remove(&key);
                        let _ = tx_msg.send(AudioMessage::Unloaded { key });
                    } else if let Some(sound) = clips.remove(&key) {
                        drop(sound);
                        clip_playing.remove(&key);
                        let _ = tx_msg.send(AudioMessage::Unloaded { key });
                    }
                }
                AudioCmd::UnloadAll => {
                    debug!("unload all audio");
                    streams.clear();
                    stream_playing.clear();
                    stream_looped.clear();
                    clips.clear();
                    clip_playing.clear();
                    let _ = tx_msg.send(AudioMessage::UnloadedAll);
                }
                AudioCmd::Shutdown => {
                    debug!("audio shutdown requested");
                    streams.clear();
                    stream_playing.clear();
                    stream_looped.clear();
                    clips.clear();
                    clip_playing.clear();
                    let _ = tx_msg.send(AudioMessage::UnloadedAll);
                    break 'run;
                }
            }
        }

        // 2) Pump streams and detect natural ends. `update_stream()` must be
        //    called regularly while a stream plays; a track that stopped on
        //    its own either restarts (looped) or emits Finished once.
        let mut ended: SmallVec<[String; 4]> = SmallVec::new();
        for key in stream_playing.iter() {
            if let Some(music) = streams.get(key) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else {
                    let length = music.get_time_length();
                    let played = music.get_time_played();
                    if played >= length - 0.01 {
                        ended.push(key.clone());
                    }
                }
            }
        }
        for key in ended {
            if stream_looped.contains(&key) {
                if let Some(music) = streams.get(&key) {
                    debug!("stream '{}' restarting (looped)", key);
                    music.seek_stream(0.0);
                    music.play_stream();
                    let _ = tx_msg.send(AudioMessage::Started { key });
                }
            } else {
                debug!("stream '{}' finished", key);
                stream_playing.remove(&key);
                let _ = tx_msg.send(AudioMessage::Finished { key });
            }
        }

        // 3) Clip end detection: tracked as playing but raylib says it
        //    stopped (or the handle is gone) -> emit Finished once.
        let mut clips_ended: SmallVec<[String; 4]> = SmallVec::new();
        for key in clip_playing.iter() {
            let still_playing = clips
                .get(key)
                .map(|sound| sound.is_playing())
                .unwrap_or(false);
            if !still_playing {
                clips_ended.push(key.clone());
            }
        }
        for key in clips_ended {
            debug!("clip '{}' finished", key);
            clip_playing.remove(&key);
            let _ = tx_msg.send(AudioMessage::Finished { key });
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    debug!("audio thread exiting (id={:?})", std::thread::current().id());

    // streams and clips drop before `audio`, satisfying handle lifetimes
}
