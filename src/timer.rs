use std::time::Duration;
use stick_core::{Scheduler, Task};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Live `setTimeout` registration. Owns the JS closure so a cancelled timer
/// frees it; a fired one is freed when the handle is replaced or dropped.
pub struct TimeoutHandle {
    id: i32,
    _task: Closure<dyn FnMut()>,
}

/// `Scheduler` backed by the window's timer queue.
#[derive(Clone)]
pub struct WindowScheduler {
    window: web::Window,
}

impl WindowScheduler {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl Scheduler for WindowScheduler {
    type Handle = Option<TimeoutHandle>;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle {
        let closure = Closure::once(task);
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms,
            ) {
            Ok(id) => Some(TimeoutHandle { id, _task: closure }),
            Err(e) => {
                log::warn!("[timer] setTimeout failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&self, handle: Self::Handle) {
        if let Some(handle) = handle {
            self.window.clear_timeout_with_handle(handle.id);
        }
    }
}
