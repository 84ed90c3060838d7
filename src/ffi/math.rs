//! Libc math intrinsics the module links against
//!
//! Thin forwards to the corresponding float intrinsics, plus a host-backed
//! `rand`. These take no context and never fail.

use anyhow::Result;
use rand::Rng;
use wasmtime::Linker;

use crate::platform::Platform;
use crate::wasm::HostContext;

pub fn register<P: Platform>(linker: &mut Linker<HostContext<P>>) -> Result<()> {
    linker.func_wrap("env", "rand", || -> i32 {
        rand::rng().random_range(0..=i32::MAX)
    })?;
    linker.func_wrap("env", "sinf", |x: f32| -> f32 { x.sin() })?;
    linker.func_wrap("env", "cosf", |x: f32| -> f32 { x.cos() })?;
    linker.func_wrap("env", "atan2f", |y: f32, x: f32| -> f32 { y.atan2(x) })?;
    linker.func_wrap("env", "powf", |base: f32, exp: f32| -> f32 { base.powf(exp) })?;
    linker.func_wrap("env", "fmodf", |num: f32, den: f32| -> f32 { num % den })?;
    Ok(())
}
