//! Module-memory file loading
//!
//! `PlatformLoadFile{Binary,Text}` fetch bytes through the platform, allocate
//! space for them inside module memory via the module's own exported `malloc`,
//! copy them in, and hand the module the pointer. Ownership of the allocation
//! is the module's; the paired unload calls route back through its `free`.
//!
//! The allocator call can grow linear memory, so the memory view is acquired
//! once up front and every access after `module_alloc` re-derives its slice
//! through [`crate::memory`].

use anyhow::Result;
use tracing::warn;
use wasmtime::{Caller, Linker};

use super::{module_alloc, module_free, require_memory};
use crate::memory;
use crate::platform::Platform;
use crate::wasm::HostContext;

pub fn register<P: Platform>(linker: &mut Linker<HostContext<P>>) -> Result<()> {
    linker.func_wrap("env", "PlatformLoadFileBinary", load_file_binary::<P>)?;
    linker.func_wrap("env", "PlatformUnloadFileBinary", unload_file::<P>)?;
    linker.func_wrap("env", "PlatformLoadFileText", load_file_text::<P>)?;
    linker.func_wrap("env", "PlatformUnloadFileText", unload_file::<P>)?;
    Ok(())
}

/// Fetch a file and copy its bytes into module memory.
///
/// On success: returns the data pointer and writes the byte count at
/// `size_ptr`. On fetch failure: logs, writes a zero size, and returns 0.
fn load_file_binary<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    filename_ptr: u32,
    size_ptr: u32,
) -> Result<u32> {
    let mem = require_memory(&caller)?;
    let filename = memory::read_cstr(mem, &caller, filename_ptr)?;
    let bytes = match caller.data_mut().platform.fetch(&filename) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("PlatformLoadFileBinary('{filename}') failed: {e:#}");
            memory::write_u32_words(mem, &mut caller, size_ptr, [0])?;
            return Ok(0);
        }
    };
    let size = bytes.len() as u32;
    let data_ptr = module_alloc(&mut caller, size)?;
    if data_ptr == 0 {
        warn!("PlatformLoadFileBinary('{filename}'): module allocator returned null for {size} bytes");
        memory::write_u32_words(mem, &mut caller, size_ptr, [0])?;
        return Ok(0);
    }
    memory::write_bytes(mem, &mut caller, data_ptr, &bytes)?;
    memory::write_u32_words(mem, &mut caller, size_ptr, [size])?;
    Ok(data_ptr)
}

/// Text variant: same fetch path, but the copy is NUL-terminated and no size
/// is written back. Returns 0 on fetch failure.
fn load_file_text<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    filename_ptr: u32,
) -> Result<u32> {
    let mem = require_memory(&caller)?;
    let filename = memory::read_cstr(mem, &caller, filename_ptr)?;
    let bytes = match caller.data_mut().platform.fetch(&filename) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("PlatformLoadFileText('{filename}') failed: {e:#}");
            return Ok(0);
        }
    };
    let size = bytes.len() as u32;
    let data_ptr = module_alloc(&mut caller, size + 1)?;
    if data_ptr == 0 {
        warn!("PlatformLoadFileText('{filename}'): module allocator returned null");
        return Ok(0);
    }
    memory::write_bytes(mem, &mut caller, data_ptr, &bytes)?;
    memory::write_bytes(mem, &mut caller, data_ptr + size, &[0])?;
    Ok(data_ptr)
}

/// Both unload variants hand the allocation back to the module's `free`
fn unload_file<P: Platform>(mut caller: Caller<'_, HostContext<P>>, data_ptr: u32) -> Result<()> {
    if data_ptr == 0 {
        // A failed load handed the module a null; unloading it is a no-op
        return Ok(());
    }
    module_free(&mut caller, data_ptr)
}
