#![cfg(target_arch = "wasm32")]
use anyhow::Context;
use std::cell::RefCell;
use std::rc::Rc;
use stick_core::{
    deliver_while, Controller, LayoutWatch, SliceKey, StateSnapshot, StickConfig, StickError,
    TouchEvent, TrackedBox,
};
use timer::WindowScheduler;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod dom;
mod events;
mod timer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("stick-web starting");
    Ok(())
}

/// State reachable from the DOM listeners.
pub(crate) struct Shared {
    controller: RefCell<Controller<WindowScheduler>>,
    on_change: js_sys::Function,
}

impl Shared {
    /// Run one batch through the controller, then call back with the borrow
    /// released so the callback may feed input or reconfigure.
    pub(crate) fn deliver(&self, event: &TouchEvent) {
        let emissions = match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.dispatch(event),
            Err(_) => {
                log::warn!("[touch] controller busy; dropping {:?}", event.phase);
                return;
            }
        };
        deliver_while(
            emissions,
            || {
                self.controller
                    .try_borrow()
                    .map_or(false, |c| c.is_enabled())
            },
            |snapshot| self.emit(&snapshot),
        );
    }

    fn emit(&self, snapshot: &StateSnapshot) {
        #[allow(deprecated)]
        let value = match JsValue::from_serde(snapshot) {
            Ok(v) => v,
            Err(e) => {
                log::error!("[stick] snapshot encode failed: {}", e);
                return;
            }
        };
        if let Err(e) = self.on_change.call1(&JsValue::NULL, &value) {
            log::error!("[stick] onChange threw: {:?}", e);
        }
    }
}

/// Virtual analog stick bound to one element.
#[wasm_bindgen]
pub struct VirtualStick {
    element: web::HtmlElement,
    window: web::Window,
    shared: Rc<Shared>,
    touch: Option<events::TouchListeners>,
    layout: Option<LayoutWatch<WindowScheduler>>,
}

#[wasm_bindgen]
impl VirtualStick {
    /// `options` may be `undefined` or an object with any of `directionCount`,
    /// `startAngle`, `keys`, `throttle` (ms or `null`) and `resizeDebounce`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: web::HtmlElement,
        options: JsValue,
        on_change: js_sys::Function,
    ) -> Result<VirtualStick, JsValue> {
        build(element, &options, on_change).map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    pub fn enable(&mut self) {
        if self.touch.is_some() {
            return;
        }
        self.shared.controller.borrow_mut().enable();
        self.attach();
    }

    /// Remove every listener and cancel pending timers. Nothing is emitted
    /// after this returns.
    pub fn disable(&mut self) {
        if let Some(touch) = self.touch.take() {
            touch.detach();
        }
        if let Some(layout) = self.layout.take() {
            layout.stop();
        }
        self.shared.controller.borrow_mut().disable();
    }

    #[wasm_bindgen(getter, js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.shared.controller.borrow().is_enabled()
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.shared.controller.borrow().tracking().is_some()
    }

    #[wasm_bindgen(js_name = setDirectionCount)]
    pub fn set_direction_count(&self, count: usize) -> Result<(), JsValue> {
        let result = self.shared.controller.borrow_mut().set_direction_count(count);
        result.map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setStartAngle)]
    pub fn set_start_angle(&self, angle: f64) -> Result<(), JsValue> {
        let result = self.shared.controller.borrow_mut().set_start_angle(angle);
        result.map_err(to_js_error)
    }

    /// `keys` is an array of strings or numbers, one per slice.
    #[wasm_bindgen(js_name = setKeys)]
    pub fn set_keys(&self, keys: JsValue) -> Result<(), JsValue> {
        #[allow(deprecated)]
        let keys: Vec<SliceKey> = keys
            .into_serde()
            .map_err(|e| JsValue::from_str(&format!("invalid keys: {e}")))?;
        let result = self.shared.controller.borrow_mut().set_keys(keys);
        result.map_err(to_js_error)
    }

    /// `None` turns throttling off.
    #[wasm_bindgen(js_name = setThrottle)]
    pub fn set_throttle(&self, ms: Option<u32>) -> Result<(), JsValue> {
        let result = self
            .shared
            .controller
            .borrow_mut()
            .set_throttle(ms.map(u64::from));
        result.map_err(to_js_error)
    }

    /// Force the next touch to re-read the element's position.
    #[wasm_bindgen(js_name = refreshLayout)]
    pub fn refresh_layout(&self) {
        self.shared.controller.borrow().region().invalidate();
    }
}

impl VirtualStick {
    fn attach(&mut self) {
        let (region, delay) = {
            let controller = self.shared.controller.borrow();
            (
                controller.region().clone(),
                controller.config().resize_debounce_delay(),
            )
        };
        self.touch = Some(events::wire_touch_handlers(&self.element, &self.shared));
        self.layout = Some(events::wire_resize(&self.window, region, delay));
    }
}

fn to_js_error(e: StickError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_options(options: &JsValue) -> anyhow::Result<StickConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(StickConfig::default());
    }
    #[allow(deprecated)]
    let config: StickConfig = options.into_serde().context("invalid stick options")?;
    Ok(config)
}

fn build(
    element: web::HtmlElement,
    options: &JsValue,
    on_change: js_sys::Function,
) -> anyhow::Result<VirtualStick> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let config = parse_options(options)?;

    let target: web::Element = element.clone().into();
    let region = Rc::new(TrackedBox::new(dom::ElementRect(target)));
    let controller = Controller::new(config, region, WindowScheduler::new(window.clone()))?;

    let shared = Rc::new(Shared {
        controller: RefCell::new(controller),
        on_change,
    });
    let mut stick = VirtualStick {
        element,
        window,
        shared,
        touch: None,
        layout: None,
    };
    stick.attach();
    log::info!("[stick] attached to #{}", stick.element.id());
    Ok(stick)
}
