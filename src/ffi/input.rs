//! Input queries
//!
//! All reads are synchronous snapshots of the [`crate::input::InputBridge`];
//! key and button codes use the GLFW numbering the module was compiled
//! against. Negative codes cannot be pressed and query as false.

use anyhow::Result;
use wasmtime::{Caller, Linker};

use super::require_memory;
use crate::memory;
use crate::platform::Platform;
use crate::wasm::HostContext;

pub fn register<P: Platform>(linker: &mut Linker<HostContext<P>>) -> Result<()> {
    linker.func_wrap("env", "JsIsKeyDown", is_key_down::<P>)?;
    linker.func_wrap("env", "JsIsMouseButtonDown", is_mouse_button_down::<P>)?;
    linker.func_wrap("env", "JsClearInput", clear_input::<P>)?;
    linker.func_wrap("env", "JsGetMouseWheelMove", mouse_wheel_move::<P>)?;
    linker.func_wrap("env", "JsGetMousePosition", mouse_position::<P>)?;
    Ok(())
}

fn is_key_down<P: Platform>(caller: Caller<'_, HostContext<P>>, key: i32) -> i32 {
    (key >= 0 && caller.data().input.is_key_down(key as u32)) as i32
}

fn is_mouse_button_down<P: Platform>(caller: Caller<'_, HostContext<P>>, button: i32) -> i32 {
    (button >= 0 && caller.data().input.is_mouse_button_down(button as u32)) as i32
}

fn clear_input<P: Platform>(mut caller: Caller<'_, HostContext<P>>) {
    caller.data_mut().input.clear_pressed();
}

/// Sign of the most recent wheel event: 1 up, -1 down, 0 never moved
fn mouse_wheel_move<P: Platform>(caller: Caller<'_, HostContext<P>>) -> i32 {
    caller.data().input.wheel_move()
}

/// Writes the cursor position as two f32 words at `out_ptr`
fn mouse_position<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    out_ptr: u32,
) -> Result<()> {
    let mem = require_memory(&caller)?;
    let (x, y) = caller.data().input.cursor();
    memory::write_f32_words(mem, &mut caller, out_ptr, [x, y])?;
    Ok(())
}
