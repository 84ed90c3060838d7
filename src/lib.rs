//! Melon Host - WASM game module bridge
//!
//! This crate hosts a WASM-compiled game module inside a native graphical
//! application: it marshals data across the module's linear memory, keeps
//! host-side resource tables, bridges device input, composes draw transforms
//! and drives the module's frame loop.
//!
//! # Architecture
//!
//! - [`Platform`] - Trait implemented by the embedder's rendering/audio/asset backends
//! - [`Runner`] - Session lifecycle and frame driver
//! - [`ModuleInstance`] - WASM game module loaded and instantiated
//! - [`HostContext`] - All host-side state reachable from a module call

pub mod error;
pub mod ffi;
pub mod input;
pub mod memory;
pub mod platform;
pub mod resources;
pub mod runner;
#[cfg(test)]
pub mod test_utils;
pub mod transform;
pub mod wasm;

// Re-export core traits and types
pub use error::HostError;
pub use input::InputBridge;
pub use platform::{Color, Platform, TextAlign, TextureRect};
pub use resources::ResourceTable;
pub use runner::Runner;
pub use transform::Transforms;
pub use wasm::{HostContext, ModuleInstance, WasmEngine};
