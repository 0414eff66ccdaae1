use stick_core::{RectBox, RectSource};
use web_sys as web;

/// Element's bounding rectangle in page space (client rect plus scroll).
pub fn element_page_rect(element: &web::Element) -> RectBox {
    let rect = element.get_bounding_client_rect();
    let (sx, sy) = web::window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0));
    RectBox::new(rect.left() + sx, rect.top() + sy, rect.width(), rect.height())
}

/// Reads the element's rectangle each time a tracked region asks.
pub struct ElementRect(pub web::Element);

impl RectSource for ElementRect {
    fn page_rect(&self) -> RectBox {
        element_page_rect(&self.0)
    }
}
