//! Session lifecycle and frame driver
//!
//! A [`Runner`] owns at most one running module at a time. `start` compiles,
//! instantiates and runs the module's `main`; after that the embedder calls
//! `tick` with its clock timestamp whenever it wants a frame. `stop` is
//! deferred: the flag is honored at the next tick boundary, so a frame never
//! ends mid-callback, and teardown is simply dropping the session.

use anyhow::Result;
use wasmtime::Linker;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::error::HostError;
use crate::ffi;
use crate::platform::{Color, Platform};
use crate::wasm::{HostContext, ModuleInstance, WasmEngine};

/// Drives one module session at a time over a platform
pub struct Runner<P: Platform> {
    engine: WasmEngine,
    session: Option<Session<P>>,
}

/// Everything owned by a running module; dropped whole on stop
struct Session<P: Platform> {
    instance: ModuleInstance<P>,
    /// Timestamp of the previous tick, ms. `None` until the first tick, which
    /// only establishes the clock base.
    previous: Option<f64>,
    stop_requested: bool,
}

impl<P: Platform> Runner<P> {
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: WasmEngine::new()?,
            session: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Compile and instantiate the module, then run its `main`.
    ///
    /// Fails with [`HostError::AlreadyRunning`] while a session is active;
    /// the embedder must `stop()` and let a tick pass first.
    pub fn start(&mut self, wasm: &[u8], platform: P) -> Result<()> {
        if self.session.is_some() {
            return Err(HostError::AlreadyRunning.into());
        }
        let module = self.engine.load_module(wasm)?;
        let mut linker = Linker::new(self.engine.engine());
        ffi::register_host_ffi(&mut linker)?;
        let mut instance = ModuleInstance::new(&self.engine, &module, &mut linker, platform)?;
        instance.run_main()?;
        self.session = Some(Session {
            instance,
            previous: None,
            stop_requested: false,
        });
        Ok(())
    }

    /// Request teardown at the next tick boundary
    pub fn stop(&mut self) {
        if let Some(session) = &mut self.session {
            session.stop_requested = true;
        }
    }

    /// Advance one frame. `timestamp_ms` is the embedder's clock in
    /// milliseconds; delta time is derived from consecutive calls.
    ///
    /// A trap inside the frame callback tears the session down: a module
    /// that has trapped is in an unknown state and must not keep running.
    pub fn tick(&mut self, timestamp_ms: f64) -> Result<()> {
        let Some(session) = &mut self.session else {
            return Ok(());
        };
        if session.stop_requested {
            session
                .instance
                .context_mut()
                .platform
                .clear(Color::TRANSPARENT);
            self.session = None;
            return Ok(());
        }
        let Some(previous) = session.previous.replace(timestamp_ms) else {
            return Ok(());
        };
        let delta_time = ((timestamp_ms - previous) / 1000.0) as f32;
        let result = session.instance.tick(delta_time, timestamp_ms / 1000.0);
        if result.is_err() {
            self.session = None;
        }
        result
    }

    /// Forward a window event to the input bridge. Events arriving while no
    /// session is active are dropped.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        let Some(session) = &mut self.session else {
            return;
        };
        let input = &mut session.instance.context_mut().input;
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => input.key_down(code),
                        ElementState::Released => input.key_up(code),
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => input.mouse_down(*button),
                ElementState::Released => input.mouse_up(*button),
            },
            WindowEvent::MouseWheel { delta, .. } => input.wheel_event(*delta),
            WindowEvent::CursorMoved { position, .. } => {
                input.cursor_moved(position.x as f32, position.y as f32);
            }
            _ => {}
        }
    }

    /// Host state of the active session, if any
    pub fn context(&self) -> Option<&HostContext<P>> {
        self.session.as_ref().map(|s| s.instance.context())
    }

    /// Mutable host state of the active session, if any
    pub fn context_mut(&mut self) -> Option<&mut HostContext<P>> {
        self.session.as_mut().map(|s| s.instance.context_mut())
    }
}
