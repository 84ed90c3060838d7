//! Host call surface
//!
//! Every function the module imports is registered here with the wasmtime
//! linker, one submodule per concern. Implemented calls unmarshal their
//! pointer arguments through [`crate::memory`], do the work against the
//! [`HostContext`], and write results back into module memory or return
//! scalar handles.
//!
//! Imports the module declares that the linker does not define are bound to
//! a fallback that traps with `NotImplemented`, naming the call and its
//! arguments. Silently returning zero for an unimplemented import would
//! corrupt module logic invisibly.

mod audio;
mod files;
mod graphics;
mod input;
mod math;
mod system;
mod text;


use anyhow::{Context, Result};
use wasmtime::{Caller, Extern, ExternType, Linker, Memory, Module, Store};

use crate::error::HostError;
use crate::platform::Platform;
use crate::wasm::HostContext;

/// Register the complete host call surface with the linker
pub fn register_host_ffi<P: Platform>(linker: &mut Linker<HostContext<P>>) -> Result<()> {
    graphics::register(linker)?;
    text::register(linker)?;
    audio::register(linker)?;
    files::register(linker)?;
    input::register(linker)?;
    math::register(linker)?;
    system::register(linker)?;
    Ok(())
}

/// Bind every module import the linker does not define to a stub that traps
/// with `NotImplemented`, naming the call and its arguments.
pub fn bind_unknown_imports<P: Platform>(
    linker: &mut Linker<HostContext<P>>,
    store: &mut Store<HostContext<P>>,
    module: &Module,
) -> Result<()> {
    for import in module.imports() {
        if linker
            .get(&mut *store, import.module(), import.name())
            .is_some()
        {
            continue;
        }
        let ExternType::Func(func_ty) = import.ty() else {
            continue;
        };
        let name = import.name().to_string();
        tracing::debug!("module imports unimplemented function '{}'", name);
        linker.func_new(
            import.module(),
            import.name(),
            func_ty,
            move |_caller, args, _results| {
                Err(HostError::NotImplemented {
                    name: name.clone(),
                    args: format!("{args:?}"),
                }
                .into())
            },
        )?;
    }
    Ok(())
}

/// The module's linear memory, which must exist for any pointer-taking call
pub(crate) fn require_memory<P: Platform>(
    caller: &Caller<'_, HostContext<P>>,
) -> Result<Memory> {
    caller.data().memory.context("module memory is not available")
}

/// Allocate `size` bytes inside module memory via the module's exported
/// allocator.
///
/// This may grow the memory; any previously derived view is stale afterwards
/// and must be re-acquired.
pub(crate) fn module_alloc<P: Platform>(
    caller: &mut Caller<'_, HostContext<P>>,
    size: u32,
) -> Result<u32> {
    let Some(Extern::Func(func)) = caller.get_export("malloc") else {
        anyhow::bail!("module does not export malloc");
    };
    let malloc = func.typed::<u32, u32>(&*caller)?;
    let ptr = malloc
        .call(&mut *caller, size)
        .context("module malloc trapped")?;
    Ok(ptr)
}

/// Release a module-memory allocation via the module's exported allocator
pub(crate) fn module_free<P: Platform>(
    caller: &mut Caller<'_, HostContext<P>>,
    ptr: u32,
) -> Result<()> {
    let Some(Extern::Func(func)) = caller.get_export("free") else {
        anyhow::bail!("module does not export free");
    };
    let free = func.typed::<u32, ()>(&*caller)?;
    free.call(&mut *caller, ptr)
        .context("module free trapped")?;
    Ok(())
}
