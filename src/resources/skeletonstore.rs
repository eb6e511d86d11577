//! Skeletal animation registry.
//!
//! A skeleton ships as a file triplet sharing a base name: `{base}_ske.json`
//! (bones, slots, keyframed animations), `{base}_tex.json` (atlas regions
//! plus the name of the sheet texture), and the sheet texture itself. The
//! loader reads both JSON files, loads the texture, and registers the built
//! [`SkeletonResource`] here.
//!
//! The skeleton file looks like:
//!
//! ```json
//! {
//!   "name": "hero",
//!   "bones": [
//!     { "name": "root" },
//!     { "name": "arm", "parent": "root", "x": 10.0, "rotation": 45.0 }
//!   ],
//!   "slots": [ { "name": "arm", "bone": "arm", "attachment": "arm_piece" } ],
//!   "animations": {
//!     "wave": {
//!       "duration": 1.0,
//!       "bones": {
//!         "arm": { "rotate": [ { "time": 0.0, "angle": 0.0 },
//!                              { "time": 1.0, "angle": 90.0 } ] }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Bones must be declared parent-first; building fails otherwise. Timeline
//! keys must be in non-decreasing time order.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

fn one() -> f32 {
    1.0
}

fn half() -> f32 {
    0.5
}

fn default_looped() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Serde models of the on-disk files
// ---------------------------------------------------------------------------

/// A rectangle inside the atlas texture. Pivot is normalized (0..1) within
/// the region, defaulting to its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "half")]
    pub pivot_x: f32,
    #[serde(default = "half")]
    pub pivot_y: f32,
}

/// `{base}_tex.json`: the atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasFile {
    /// Sheet texture file, relative to the atlas file's directory.
    pub texture: String,
    pub regions: FxHashMap<String, Region>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneDef {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "one")]
    pub scale_x: f32,
    #[serde(default = "one")]
    pub scale_y: f32,
    #[serde(default)]
    pub length: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotDef {
    pub name: String,
    pub bone: String,
    pub attachment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranslateKey {
    pub time: f32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotateKey {
    pub time: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleKey {
    pub time: f32,
    #[serde(default = "one")]
    pub x: f32,
    #[serde(default = "one")]
    pub y: f32,
}

/// Keyframed channels for one bone inside one animation. Channels are
/// additive on top of the bone's rest pose (scale multiplies).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoneTimeline {
    #[serde(default)]
    pub translate: Vec<TranslateKey>,
    #[serde(default)]
    pub rotate: Vec<RotateKey>,
    #[serde(default)]
    pub scale: Vec<ScaleKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDef {
    pub duration: f32,
    #[serde(default = "default_looped")]
    pub looped: bool,
    #[serde(default)]
    pub bones: FxHashMap<String, BoneTimeline>,
}

/// `{base}_ske.json`: the skeleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkeletonFile {
    pub name: String,
    pub bones: Vec<BoneDef>,
    #[serde(default)]
    pub slots: Vec<SlotDef>,
    #[serde(default)]
    pub animations: FxHashMap<String, AnimationDef>,
}

// ---------------------------------------------------------------------------
// Built, index-resolved form
// ---------------------------------------------------------------------------

/// Rest transform of a bone relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneRest {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    /// Index of the parent in the bone list; `None` for roots. Parents
    /// always come before children.
    pub parent: Option<usize>,
    pub rest: BoneRest,
    pub length: f32,
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub name: String,
    pub bone: usize,
    pub region: Region,
}

/// One animation with its timelines indexed by bone.
#[derive(Debug, Clone)]
pub struct SkeletonAnimation {
    pub duration: f32,
    pub looped: bool,
    /// `timelines[bone_index]` is `None` for bones this animation leaves at
    /// rest.
    pub timelines: Vec<Option<BoneTimeline>>,
}

/// A fully resolved skeleton: bones in parent-first order, slots bound to
/// atlas regions, animations indexed by bone.
#[derive(Debug, Clone)]
pub struct SkeletonResource {
    pub name: String,
    /// Key of the atlas texture in the texture store.
    pub tex_key: String,
    pub bones: Vec<Bone>,
    pub slots: Vec<Slot>,
    pub animations: FxHashMap<String, SkeletonAnimation>,
}

impl SkeletonResource {
    /// Parse both JSON files and build the resolved skeleton.
    pub fn parse(
        ske_json: &str,
        atlas_json: &str,
        tex_key: impl Into<String>,
    ) -> Result<Self, String> {
        let ske: SkeletonFile =
            serde_json::from_str(ske_json).map_err(|e| format!("invalid skeleton file: {}", e))?;
        let atlas: AtlasFile =
            serde_json::from_str(atlas_json).map_err(|e| format!("invalid atlas file: {}", e))?;
        Self::build(ske, atlas, tex_key)
    }

    /// Resolve names to indices and validate the data.
    pub fn build(
        ske: SkeletonFile,
        atlas: AtlasFile,
        tex_key: impl Into<String>,
    ) -> Result<Self, String> {
        let mut index_of: FxHashMap<String, usize> = FxHashMap::default();
        let mut bones = Vec::with_capacity(ske.bones.len());

        for (index, def) in ske.bones.into_iter().enumerate() {
            let parent = match &def.parent {
                None => None,
                Some(parent_name) => Some(*index_of.get(parent_name).ok_or_else(|| {
                    format!(
                        "bone '{}' references parent '{}' that is not declared before it",
                        def.name, parent_name
                    )
                })?),
            };
            if index_of.insert(def.name.clone(), index).is_some() {
                return Err(format!("duplicate bone '{}'", def.name));
            }
            bones.push(Bone {
                name: def.name,
                parent,
                rest: BoneRest {
                    x: def.x,
                    y: def.y,
                    rotation: def.rotation,
                    scale_x: def.scale_x,
                    scale_y: def.scale_y,
                },
                length: def.length,
            });
        }

        let mut slots = Vec::with_capacity(ske.slots.len());
        for def in ske.slots {
            let bone = *index_of
                .get(&def.bone)
                .ok_or_else(|| format!("slot '{}' references unknown bone '{}'", def.name, def.bone))?;
            let region = *atlas.regions.get(&def.attachment).ok_or_else(|| {
                format!(
                    "slot '{}' references attachment '{}' missing from the atlas",
                    def.name, def.attachment
                )
            })?;
            slots.push(Slot {
                name: def.name,
                bone,
                region,
            });
        }

        let mut animations = FxHashMap::default();
        for (anim_name, def) in ske.animations {
            if def.duration <= 0.0 {
                return Err(format!(
                    "animation '{}' has non-positive duration",
                    anim_name
                ));
            }
            let mut timelines: Vec<Option<BoneTimeline>> = vec![None; bones.len()];
            for (bone_name, timeline) in def.bones {
                let bone = *index_of.get(&bone_name).ok_or_else(|| {
                    format!(
                        "animation '{}' animates unknown bone '{}'",
                        anim_name, bone_name
                    )
                })?;
                validate_timeline(&anim_name, &bone_name, &timeline)?;
                timelines[bone] = Some(timeline);
            }
            animations.insert(
                anim_name,
                SkeletonAnimation {
                    duration: def.duration,
                    looped: def.looped,
                    timelines,
                },
            );
        }

        Ok(Self {
            name: ske.name,
            tex_key: tex_key.into(),
            bones,
            slots,
            animations,
        })
    }

    pub fn bone_index(&self, name: impl AsRef<str>) -> Option<usize> {
        let name = name.as_ref();
        self.bones.iter().position(|bone| bone.name == name)
    }

    pub fn animation(&self, name: impl AsRef<str>) -> Option<&SkeletonAnimation> {
        self.animations.get(name.as_ref())
    }
}

fn validate_timeline(anim: &str, bone: &str, timeline: &BoneTimeline) -> Result<(), String> {
    let sorted = |times: &mut dyn Iterator<Item = f32>| -> bool {
        let mut previous = f32::NEG_INFINITY;
        times.all(|t| {
            let ok = t >= previous;
            previous = t;
            ok
        })
    };
    if !sorted(&mut timeline.translate.iter().map(|k| k.time))
        || !sorted(&mut timeline.rotate.iter().map(|k| k.time))
        || !sorted(&mut timeline.scale.iter().map(|k| k.time))
    {
        return Err(format!(
            "animation '{}' bone '{}' has timeline keys out of order",
            anim, bone
        ));
    }
    Ok(())
}

/// Central registry of skeletons keyed by string IDs.
#[derive(Resource, Default)]
pub struct SkeletonStore {
    skeletons: FxHashMap<String, SkeletonResource>,
}

impl SkeletonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, skeleton: SkeletonResource) {
        self.skeletons.insert(key.into(), skeleton);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&SkeletonResource> {
        self.skeletons.get(key.as_ref())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.skeletons.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.skeletons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skeletons.is_empty()
    }
}
