//! Instance wrapper for a loaded game module

use anyhow::{Context, Result};
use wasmtime::{Instance, Linker, Module, Store, TypedFunc};

use super::WasmEngine;
use super::state::HostContext;
use crate::ffi;
use crate::platform::Platform;

/// A loaded and instantiated game module
pub struct ModuleInstance<P: Platform> {
    store: Store<HostContext<P>>,
    /// The WASM instance.
    /// Not directly used after initialization, but must be kept alive to
    /// maintain the lifetime of exported functions and memory references.
    #[allow(dead_code)]
    instance: Instance,
    main_fn: Option<TypedFunc<(), ()>>,
}

impl<P: Platform> ModuleInstance<P> {
    /// Instantiate a module against the host call surface.
    ///
    /// Any import the linker does not define is bound to a fallback that
    /// traps with `NotImplemented`, so an incompatible module fails loudly at
    /// the first such call instead of silently misbehaving.
    pub fn new(
        engine: &WasmEngine,
        module: &Module,
        linker: &mut Linker<HostContext<P>>,
        platform: P,
    ) -> Result<Self> {
        let mut store = Store::new(engine.engine(), HostContext::new(platform));

        ffi::bind_unknown_imports(linker, &mut store, module)?;

        let instance = linker
            .instantiate(&mut store, module)
            .context("Failed to instantiate WASM module")?;

        // Get the memory export
        if let Some(memory) = instance.get_memory(&mut store, "memory") {
            store.data_mut().memory = Some(memory);
        }

        let main_fn = instance.get_typed_func::<(), ()>(&mut store, "main").ok();

        Ok(Self {
            store,
            instance,
            main_fn,
        })
    }

    /// Call the module's `main` initialization entry point
    pub fn run_main(&mut self) -> Result<()> {
        if let Some(main) = &self.main_fn {
            main.call(&mut self.store, ())
                .context("WASM main() failed")?;
        }
        Ok(())
    }

    /// Run one frame: record timing, then invoke the frame callback the
    /// module registered (if any).
    pub fn tick(&mut self, delta_time: f32, now: f64) -> Result<()> {
        {
            let ctx = self.store.data_mut();
            ctx.delta_time = delta_time;
            ctx.now = now;
        }
        if let Some(entry) = self.store.data().frame_entry.clone() {
            entry
                .call(&mut self.store, ())
                .context("WASM frame callback failed")?;
        }
        Ok(())
    }

    /// Whether the module has registered its frame callback
    pub fn has_frame_entry(&self) -> bool {
        self.store.data().frame_entry.is_some()
    }

    /// Get mutable reference to the store
    pub fn store_mut(&mut self) -> &mut Store<HostContext<P>> {
        &mut self.store
    }

    /// Get reference to the store
    pub fn store(&self) -> &Store<HostContext<P>> {
        &self.store
    }

    /// Get mutable reference to host state
    pub fn context_mut(&mut self) -> &mut HostContext<P> {
        self.store.data_mut()
    }

    /// Get reference to host state
    pub fn context(&self) -> &HostContext<P> {
        self.store.data()
    }
}
