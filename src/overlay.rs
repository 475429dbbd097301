//! Metric decorations drawn on top of base-rendered elements.
//!
//! Shapes get a translucent fill on their first fillable primitive and a small
//! value label at their top-right corner. Connections get a glow path traced
//! behind the line and a label at the midpoint of their middle segment.

use crate::diagram::{DiagramElement, Point};
use crate::models::{Bounds, Mode, StatValue};
use crate::render::polyline_path;
use crate::style::{ColorScale, OverlayStyle, contrasting_text_color};
use crate::svg::{FILLABLE_TAGS, SvgNode};
use log::trace;

// Text baseline below the top edge of the label box.
const TEXT_BASELINE: f64 = 10.0;

/// Decorates elements for one set of bounds and one mode.
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    scale: ColorScale,
    mode: Mode,
    style: &'a OverlayStyle,
}

impl<'a> Overlay<'a> {
    pub fn new(bounds: Bounds, mode: Mode, style: &'a OverlayStyle) -> Self {
        Self {
            scale: ColorScale::for_style(bounds, style),
            mode,
            style,
        }
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn decorate_shape(&self, parent: &mut SvgNode, element: &DiagramElement, value: StatValue) {
        self.add_fill(parent, value);
        let label = value.label(self.mode);
        self.add_shape_label(parent, element, &label, value);
    }

    pub fn decorate_connection(
        &self,
        parent: &mut SvgNode,
        element: &DiagramElement,
        value: StatValue,
    ) {
        self.add_glow(parent, element, value);
        let label = value.label(self.mode);
        self.add_connection_label(parent, element, &label, value);
    }

    /// Recolor the first rect/ellipse/polygon/circle/path under `parent`.
    pub fn add_fill(&self, parent: &mut SvgNode, value: StatValue) {
        let fill = self.scale.color_for(value, self.style.fill_opacity);
        match parent.find_first_mut(&FILLABLE_TAGS) {
            Some(node) => node.set_fill_style(fill),
            None => trace!("no fillable primitive to color"),
        }
    }

    /// Label box centered on the element's top-right corner.
    pub fn add_shape_label(
        &self,
        parent: &mut SvgNode,
        element: &DiagramElement,
        label: &str,
        value: StatValue,
    ) {
        let width = self.style.label_width(label);
        let x = element.width() - width / 2.0;
        parent.append(self.label_group(x, self.style.label_offset_y, label, value));
    }

    /// Label centered on the connection's middle segment; empty labels are skipped.
    pub fn add_connection_label(
        &self,
        parent: &mut SvgNode,
        element: &DiagramElement,
        label: &str,
        value: StatValue,
    ) {
        if label.is_empty() {
            trace!("{}: empty label skipped", element.id);
            return;
        }
        let Some(mid) = label_anchor(element.waypoints()) else {
            trace!("{}: fewer than two waypoints, no label", element.id);
            return;
        };
        let width = self.style.label_width(label);
        parent.append(self.label_group(mid.x - width / 2.0, mid.y - 10.0, label, value));
    }

    /// Translucent thick stroke along the waypoints, placed behind everything else.
    pub fn add_glow(&self, parent: &mut SvgNode, element: &DiagramElement, value: StatValue) {
        let glow = SvgNode::new("path")
            .attr("d", polyline_path(element.waypoints()))
            .attr("stroke", self.scale.color_for(value, self.style.glow_opacity))
            .attr("stroke-width", self.scale.glow_thickness(value))
            .attr("fill", "none");
        parent.insert_first(glow);
    }

    fn label_group(&self, x: f64, y: f64, label: &str, value: StatValue) -> SvgNode {
        let fill = self.scale.color_for(value, 1.0);
        let text_color = self.style.text_color(contrasting_text_color(fill));

        let mut group = SvgNode::new("g");
        group.append(
            SvgNode::with_attrs(
                "rect",
                [
                    ("x", x),
                    ("y", y),
                    ("width", self.style.label_width(label)),
                    ("height", self.style.label_height),
                ],
            )
            .attr("stroke", &self.style.label_stroke)
            .attr("stroke-width", 1)
            .attr("fill", fill),
        );
        group.append(
            SvgNode::with_attrs(
                "text",
                [("x", x + self.style.label_padding / 2.0), ("y", y + TEXT_BASELINE)],
            )
            .attr("fill", text_color)
            .attr("font-size", &self.style.font_size)
            .with_text(label),
        );
        group
    }
}

/// Midpoint of the middle segment: `midpoints[len / 2]` over consecutive pairs.
pub fn label_anchor(waypoints: &[Point]) -> Option<Point> {
    let midpoints: Vec<Point> = waypoints.windows(2).map(|w| w[0].midpoint(w[1])).collect();
    midpoints.get(midpoints.len() / 2).copied()
}
