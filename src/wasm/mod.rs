//! WASM runtime wrapper
//!
//! Abstractions over wasmtime for loading and executing the game module.
//!
//! # Key Types
//!
//! - [`WasmEngine`] - Shared WASM engine (one per application)
//! - [`HostContext`] - All host-side state a running module can touch
//! - [`ModuleInstance`] - Loaded and instantiated game module

pub mod instance;
pub mod state;

use anyhow::{Context, Result};
use wasmtime::{Engine, Module};

pub use instance::ModuleInstance;
pub use state::HostContext;

/// Shared WASM engine (one per application)
pub struct WasmEngine {
    engine: Engine,
}

impl WasmEngine {
    /// Create a new WASM engine with default configuration
    pub fn new() -> Result<Self> {
        let engine = Engine::default();
        Ok(Self { engine })
    }

    /// Get a reference to the underlying wasmtime engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Compile a WASM module from bytes
    pub fn load_module(&self, bytes: &[u8]) -> Result<Module> {
        Module::new(&self.engine, bytes).context("Failed to compile WASM module")
    }
}

// NOTE: WasmEngine intentionally does not implement Default. Engine
// initialization is fallible on unsupported platforms; WasmEngine::new()
// returns Result<Self> and propagates that.
