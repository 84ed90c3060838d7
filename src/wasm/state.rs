//! Host-side state for a running module
//!
//! One explicit context object holds everything a module call can touch:
//! resource tables, transforms, input bridge, timing, and the platform
//! capability. It is created when a session starts and dropped whole when the
//! session stops, so teardown is a single drop and nothing survives a
//! stop/start cycle.

use image::RgbaImage;
use wasmtime::{Memory, TypedFunc};

use crate::input::InputBridge;
use crate::platform::Platform;
use crate::resources::ResourceTable;
use crate::transform::Transforms;

/// All host state reachable from a module call, stored as the
/// `wasmtime::Store` data
pub struct HostContext<P: Platform> {
    /// The embedder's backend capabilities
    pub platform: P,

    /// Module linear memory (set after instantiation)
    pub memory: Option<Memory>,

    /// Decoded textures, by handle
    pub textures: ResourceTable<RgbaImage>,

    /// Playable sounds, by handle
    pub sounds: ResourceTable<P::Sound>,

    /// Loaded font faces, by handle
    pub fonts: ResourceTable<P::Font>,

    /// Present-state input snapshot
    pub input: InputBridge,

    /// Projection and view transforms
    pub transforms: Transforms,

    /// Frame callback, resolved once from the indirect-call table when the
    /// module registers it
    pub frame_entry: Option<TypedFunc<(), ()>>,

    /// Timestamp of the current tick, seconds
    pub now: f64,

    /// Delta time of the current tick, seconds
    pub delta_time: f32,
}

impl<P: Platform> HostContext<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            memory: None,
            textures: ResourceTable::new("texture"),
            sounds: ResourceTable::new("sound"),
            fonts: ResourceTable::new("font"),
            input: InputBridge::new(),
            transforms: Transforms::new(),
            frame_entry: None,
            now: 0.0,
            delta_time: 0.0,
        }
    }
}
