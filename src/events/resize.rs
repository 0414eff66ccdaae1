use crate::timer::WindowScheduler;
use std::rc::Rc;
use std::time::Duration;
use stick_core::{LayoutWatch, TrackedBox};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Re-read `region` once window resizes settle for `delay`.
///
/// Stopping (or dropping) the returned watch removes the listener.
pub fn wire_resize(
    window: &web::Window,
    region: Rc<TrackedBox>,
    delay: Duration,
) -> LayoutWatch<WindowScheduler> {
    let watch = LayoutWatch::new(region, delay, WindowScheduler::new(window.clone()));
    let notifier = watch.notifier();
    let closure = Closure::wrap(Box::new(move || notifier.notify()) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());

    let window = window.clone();
    watch.on_detach(move || {
        _ = window.remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        log::debug!("[layout] resize listener removed");
    });
    watch
}
