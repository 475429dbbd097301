//! Renderer capability shared by base renderers and overlays.

use crate::diagram::{DiagramElement, ElementKind, Point};
use crate::svg::SvgNode;

/// Priority of a plain base renderer. Higher priorities draw later.
pub const DEFAULT_PRIORITY: u32 = 1000;

/// Draw hooks invoked by the host for every element.
///
/// `parent` is the element's visual group; implementations append into it.
pub trait Renderer {
    fn priority(&self) -> u32 {
        DEFAULT_PRIORITY
    }

    fn can_render(&self, _element: &DiagramElement) -> bool {
        true
    }

    fn draw_shape(&self, parent: &mut SvgNode, element: &DiagramElement);

    fn draw_connection(&self, parent: &mut SvgNode, element: &DiagramElement);

    /// SVG path data outlining `shape`.
    fn shape_path(&self, shape: &DiagramElement) -> String;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn priority(&self) -> u32 {
        (**self).priority()
    }

    fn can_render(&self, element: &DiagramElement) -> bool {
        (**self).can_render(element)
    }

    fn draw_shape(&self, parent: &mut SvgNode, element: &DiagramElement) {
        (**self).draw_shape(parent, element)
    }

    fn draw_connection(&self, parent: &mut SvgNode, element: &DiagramElement) {
        (**self).draw_connection(parent, element)
    }

    fn shape_path(&self, shape: &DiagramElement) -> String {
        (**self).shape_path(shape)
    }
}

/// `M x,y L x,y ...` through the given points.
pub fn polyline_path(points: &[Point]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{cmd}{},{}", p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Base renderer drawing shapes as white boxes and connections as black lines.
///
/// Shapes are drawn in element-local coordinates; the caller positions the
/// element group.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn draw_shape(&self, parent: &mut SvgNode, element: &DiagramElement) {
        if let ElementKind::Shape { width, height, .. } = element.kind {
            let mut rect = SvgNode::with_attrs(
                "rect",
                [
                    ("x", 0.0),
                    ("y", 0.0),
                    ("rx", 10.0),
                    ("ry", 10.0),
                    ("width", width),
                    ("height", height),
                ],
            )
            .attr("stroke", "black")
            .attr("stroke-width", 2);
            rect.set_fill_style("white");
            parent.append(rect);
        }
    }

    fn draw_connection(&self, parent: &mut SvgNode, element: &DiagramElement) {
        parent.append(
            SvgNode::new("path")
                .attr("d", polyline_path(element.waypoints()))
                .attr("stroke", "black")
                .attr("stroke-width", 2)
                .attr("fill", "none"),
        );
    }

    fn shape_path(&self, shape: &DiagramElement) -> String {
        match shape.kind {
            ElementKind::Shape {
                x,
                y,
                width,
                height,
            } => format!("M{x},{y} h{width} v{height} h{} z", -width),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_through_waypoints() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.5)];
        assert_eq!(polyline_path(&pts), "M0,0 L10,0 L10,5.5");
        assert_eq!(polyline_path(&[]), "");
    }

    #[test]
    fn plain_shape_is_a_filled_rect() {
        let mut g = SvgNode::new("g");
        PlainRenderer.draw_shape(&mut g, &DiagramElement::shape("A", 0.0, 0.0, 100.0, 80.0));
        assert_eq!(g.children[0].tag, "rect");
        assert_eq!(g.children[0].get_attr("width"), Some("100"));
        assert_eq!(g.children[0].fill_style(), Some("white"));
        assert_eq!(
            PlainRenderer.shape_path(&DiagramElement::shape("A", 1.0, 2.0, 3.0, 4.0)),
            "M1,2 h3 v4 h-3 z"
        );
    }
}
