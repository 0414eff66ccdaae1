use crate::Shared;
use std::rc::Rc;
use stick_core::{Touch, TouchEvent, TouchList, TouchPhase};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const PHASES: [(&str, TouchPhase); 4] = [
    ("touchstart", TouchPhase::Start),
    ("touchmove", TouchPhase::Move),
    ("touchend", TouchPhase::End),
    ("touchcancel", TouchPhase::Cancel),
];

type TouchClosure = Closure<dyn FnMut(web::TouchEvent)>;

pub fn touch_list(list: &web::TouchList) -> TouchList {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Touch::new(t.identifier(), t.page_x() as f64, t.page_y() as f64))
        .collect()
}

pub fn to_core_event(phase: TouchPhase, ev: &web::TouchEvent) -> TouchEvent {
    let remaining = match phase {
        TouchPhase::End | TouchPhase::Cancel => touch_list(&ev.target_touches()),
        TouchPhase::Start | TouchPhase::Move => TouchList::new(),
    };
    TouchEvent {
        phase,
        changed: touch_list(&ev.changed_touches()),
        remaining,
    }
}

/// Touch listeners bound to one element; removed on `detach` or drop.
pub struct TouchListeners {
    target: web::EventTarget,
    closures: Vec<(&'static str, TouchClosure)>,
}

impl TouchListeners {
    pub fn detach(mut self) {
        self.remove_all();
    }

    fn remove_all(&mut self) {
        for (name, closure) in self.closures.drain(..) {
            _ = self
                .target
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for TouchListeners {
    fn drop(&mut self) {
        self.remove_all();
    }
}

pub fn wire_touch_handlers(element: &web::HtmlElement, shared: &Rc<Shared>) -> TouchListeners {
    let target: web::EventTarget = element.clone().unchecked_into();
    let mut closures = Vec::with_capacity(PHASES.len());

    for (name, phase) in PHASES {
        let shared = shared.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            // keep the page from scrolling or zooming under the stick
            ev.prevent_default();
            shared.deliver(&to_core_event(phase, &ev));
        }) as Box<dyn FnMut(_)>);
        _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closures.push((name, closure));
    }

    TouchListeners { target, closures }
}
