//! Audio calls
//!
//! The module sees opaque sound handles; decoding and playback live behind
//! the platform. Load failures return the 0 sentinel and playback of unknown
//! handles is a logged no-op, matching the rest of the resource surface.

use anyhow::Result;
use tracing::warn;
use wasmtime::{Caller, Linker};

use super::require_memory;
use crate::memory;
use crate::platform::Platform;
use crate::wasm::HostContext;

pub fn register<P: Platform>(linker: &mut Linker<HostContext<P>>) -> Result<()> {
    linker.func_wrap("env", "InitAudio", init_audio::<P>)?;
    linker.func_wrap("env", "LoadSoundFromFileWave", load_sound_from_file_wave::<P>)?;
    linker.func_wrap("env", "PlaySound", play_sound::<P>)?;
    linker.func_wrap("env", "UnloadSound", unload_sound::<P>)?;
    Ok(())
}

/// Zero on success, -1 on backend failure (C convention on the module side)
fn init_audio<P: Platform>(mut caller: Caller<'_, HostContext<P>>) -> i32 {
    match caller.data_mut().platform.init_audio() {
        Ok(()) => 0,
        Err(e) => {
            warn!("InitAudio failed: {e:#}");
            -1
        }
    }
}

/// Returns the sound handle, or 0 when loading fails
fn load_sound_from_file_wave<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    path_ptr: u32,
) -> Result<u32> {
    let memory = require_memory(&caller)?;
    let path = memory::read_cstr(memory, &caller, path_ptr)?;
    let ctx = caller.data_mut();
    match ctx.platform.load_sound(&path) {
        Ok(sound) => Ok(ctx.sounds.insert(sound)),
        Err(e) => {
            warn!("LoadSoundFromFileWave('{path}') failed: {e:#}");
            Ok(0)
        }
    }
}

fn play_sound<P: Platform>(mut caller: Caller<'_, HostContext<P>>, sound_id: u32) {
    let HostContext {
        sounds, platform, ..
    } = caller.data_mut();
    match sounds.get_mut(sound_id) {
        Some(sound) => platform.play_sound(sound),
        None => warn!("PlaySound: unknown sound handle {sound_id}"),
    }
}

/// The argument is a pointer to the module-side `Sound` struct; the handle is
/// its only word.
fn unload_sound<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    sound_ptr: u32,
) -> Result<()> {
    let memory = require_memory(&caller)?;
    let [handle] = memory::read_u32_words::<1>(memory, &caller, sound_ptr)?;
    caller.data_mut().sounds.remove(handle);
    Ok(())
}
