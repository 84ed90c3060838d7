//! System calls: logging, time, lifecycle, frame-loop registration

use anyhow::Result;
use tracing::info;
use wasmtime::{Caller, Extern, Linker, Ref};

use super::require_memory;
use crate::memory;
use crate::platform::Platform;
use crate::wasm::HostContext;

pub fn register<P: Platform>(linker: &mut Linker<HostContext<P>>) -> Result<()> {
    linker.func_wrap("env", "PlatformPrint", platform_print::<P>)?;
    linker.func_wrap("env", "PlatformGetTime", platform_get_time::<P>)?;
    linker.func_wrap("env", "WindowShouldClose", window_should_close::<P>)?;
    linker.func_wrap("env", "WasmSetMainLoop", set_main_loop::<P>)?;
    linker.func_wrap("env", "qsort", qsort::<P>)?;
    Ok(())
}

fn platform_print<P: Platform>(mut caller: Caller<'_, HostContext<P>>, text_ptr: u32) -> Result<()> {
    let mem = require_memory(&caller)?;
    let message = memory::read_cstr(mem, &caller, text_ptr)?;
    info!("[game] {}", message);
    Ok(())
}

/// Timestamp of the current tick, seconds. Frozen for the duration of a frame
/// so repeated reads within one callback agree.
fn platform_get_time<P: Platform>(caller: Caller<'_, HostContext<P>>) -> f64 {
    caller.data().now
}

/// Shutdown is driven by the embedder, never polled by the module
fn window_should_close<P: Platform>(_caller: Caller<'_, HostContext<P>>) -> i32 {
    0
}

/// Resolve the module's frame callback out of its indirect-call table and
/// keep the typed handle. Resolution happens once here, not per frame.
fn set_main_loop<P: Platform>(mut caller: Caller<'_, HostContext<P>>, entry: i32) -> Result<()> {
    let Some(Extern::Table(table)) = caller.get_export("__indirect_function_table") else {
        anyhow::bail!("WasmSetMainLoop: module does not export __indirect_function_table");
    };
    let slot = table
        .get(&mut caller, entry as u32 as u64)
        .ok_or_else(|| anyhow::anyhow!("WasmSetMainLoop: table index {entry} out of range"))?;
    let Ref::Func(Some(func)) = slot else {
        anyhow::bail!("WasmSetMainLoop: table slot {entry} does not hold a function");
    };
    let frame_entry = func.typed::<(), ()>(&caller)?;
    caller.data_mut().frame_entry = Some(frame_entry);
    Ok(())
}

/// The module's C runtime imports qsort but the shipped module never sorts
/// through it; the binding exists so instantiation succeeds. Left inert until
/// a module actually needs host-side sorting.
fn qsort<P: Platform>(
    _caller: Caller<'_, HostContext<P>>,
    _base: u32,
    _count: u32,
    _size: u32,
    _compare: u32,
) {
}
