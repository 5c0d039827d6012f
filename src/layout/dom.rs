//! DOM measurement backend (browser only)
//!
//! Elements are located by their `data-segment-id` / `data-node-id`
//! attributes (names configurable). Rectangles come from
//! `getBoundingClientRect`, line heights from the computed style.

use web_sys::{Document, Element, Window};

use super::measure::{ElementMetrics, LayoutMeasurer, MeasureTarget};
use crate::navigation::{PageGeometry, Rect};

/// Attribute marking a structural node's header control
pub const HEADER_CONTROL_ATTRIBUTE: &str = "data-header-control";

fn attribute_selector(attribute: &str, value: &str) -> String {
    format!(
        "[{}=\"{}\"]",
        attribute,
        value.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

/// `.class` selector with CSS-special characters escaped
fn class_selector(class: &str) -> String {
    let mut selector = String::with_capacity(class.len() + 1);
    selector.push('.');
    for (i, c) in class.chars().enumerate() {
        if i == 0 && c.is_ascii_digit() {
            // identifiers cannot start with a digit; use its code point
            selector.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            selector.push(c);
        } else {
            selector.push('\\');
            selector.push(c);
        }
    }
    selector
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

#[derive(Clone, Debug)]
pub struct DomLayout {
    window: Window,
    document: Document,
    segment_attribute: String,
    node_attribute: String,
}

impl DomLayout {
    /// Bind to the global window; `None` outside a browser
    pub fn from_window(segment_attribute: &str, node_attribute: &str) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            segment_attribute: segment_attribute.to_string(),
            node_attribute: node_attribute.to_string(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn find(&self, attribute: &str, id: &str) -> Option<Element> {
        self.document
            .query_selector(&attribute_selector(attribute, id))
            .ok()
            .flatten()
    }

    fn line_height(&self, element: &Element) -> Option<f64> {
        let style = self.window.get_computed_style(element).ok().flatten()?;
        let value = style.get_property_value("line-height").ok()?;
        parse_px(&value)
    }
}

impl LayoutMeasurer for DomLayout {
    fn measure(&self, target: MeasureTarget<'_>, container_class: &str) -> Option<ElementMetrics> {
        let element = match target {
            MeasureTarget::Segment(id) => self.find(&self.segment_attribute, id),
            MeasureTarget::Node(id) => self.find(&self.node_attribute, id),
        }?;
        let container = element
            .closest(&class_selector(container_class))
            .ok()
            .flatten()?;
        let origin = container.get_bounding_client_rect().top();
        let rect = element.get_bounding_client_rect();

        let header = element
            .query_selector(&format!("[{}]", HEADER_CONTROL_ATTRIBUTE))
            .ok()
            .flatten()
            .map(|h| {
                let r = h.get_bounding_client_rect();
                (r.top() - origin, r.height())
            });

        // inline elements report the first line box through their first client rect
        let first_line_top = element
            .get_client_rects()
            .get(0)
            .map(|r| r.top())
            .unwrap_or_else(|| rect.top());

        Some(ElementMetrics {
            top: first_line_top - origin,
            height: rect.height(),
            line_height: self.line_height(&element),
            header,
        })
    }
}

impl PageGeometry for DomLayout {
    fn segment_rect(&self, segment_id: &str) -> Option<Rect> {
        let element = self.find(&self.segment_attribute, segment_id)?;
        let rect = element.get_bounding_client_rect();
        let (sx, sy) = self.scroll_offset();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()).translated(sx, sy))
    }

    fn scroll_offset(&self) -> (f64, f64) {
        (
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("24px"), Some(24.0));
        assert_eq!(parse_px(" 18.5px "), Some(18.5));
        assert_eq!(parse_px("normal"), None);
    }

    #[test]
    fn test_class_selector_escapes_special_characters() {
        assert_eq!(class_selector("outline-body"), ".outline-body");
        assert_eq!(class_selector("w-1/2"), ".w-1\\/2");
        assert_eq!(class_selector("md:col.wide"), ".md\\:col\\.wide");
        assert_eq!(class_selector("2col"), ".\\32 col");
    }

    #[test]
    fn test_attribute_selector_escapes_quotes() {
        assert_eq!(
            attribute_selector("data-segment-id", "a\"b"),
            "[data-segment-id=\"a\\\"b\"]"
        );
    }
}
