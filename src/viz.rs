//! Visualizer façade: owns the statistics, reacts to changes and decorates
//! every element the base renderer draws.
//!
//! The visualizer is itself a [`Renderer`] registered above the base
//! renderer's priority, so its decorations land after the base shape:
//!
//! ```
//! use perfviz::diagram::{DiagramElement, StaticCanvas};
//! use perfviz::events::RecordingEventBus;
//! use perfviz::models::{Mode, StatRecord, StatTable};
//! use perfviz::render::PlainRenderer;
//! use perfviz::viz::Visualizer;
//!
//! let canvas = StaticCanvas::new(
//!     DiagramElement::root("root").with_child(DiagramElement::shape("A", 0.0, 0.0, 100.0, 80.0)),
//! );
//! let mut viz = Visualizer::new(RecordingEventBus::default(), PlainRenderer, canvas);
//! let stats: StatTable = [("A", StatRecord::new().with(Mode::Count, 5))].into_iter().collect();
//! viz.set_stats(stats);
//! viz.set_mode(Mode::Count);
//! assert_eq!(viz.events().fired.len(), 2);
//! let svg = viz.render_all().to_svg_string();
//! assert!(svg.contains("rgba(0,255,0,0.5)"));
//! ```

use crate::diagram::{Canvas, DiagramElement, ElementKind};
use crate::events::{ELEMENTS_CHANGED, ElementsChanged, EventBus};
use crate::models::{Bounds, Mode, StatTable};
use crate::overlay::Overlay;
use crate::render::Renderer;
use crate::stats::StatsStore;
use crate::style::OverlayStyle;
use crate::svg::SvgNode;
use log::{debug, trace};

/// Draw priority of the overlay, above the default base renderer (1000).
pub const HIGH_PRIORITY: u32 = 1500;

// Room around the diagram for labels hanging over element edges.
const PAGE_MARGIN: f64 = 40.0;

pub struct Visualizer<E, R, C> {
    events: E,
    base: R,
    canvas: C,
    store: StatsStore,
    style: OverlayStyle,
}

impl<E, R, C> Visualizer<E, R, C>
where
    E: EventBus,
    R: Renderer,
    C: Canvas,
{
    /// Build from the three host capabilities. Starts in [`Mode::Count`] with no stats.
    pub fn new(events: E, base: R, canvas: C) -> Self {
        Self {
            events,
            base,
            canvas,
            store: StatsStore::new(Mode::default()),
            style: OverlayStyle::default(),
        }
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace all statistics, recompute bounds and request a full redraw.
    pub fn set_stats(&mut self, table: StatTable) {
        self.store.set_stats(table);
        self.request_redraw();
    }

    /// Switch the metric, recompute bounds and request a full redraw.
    pub fn set_mode(&mut self, mode: Mode) {
        self.store.set_mode(mode);
        self.request_redraw();
    }

    pub fn mode(&self) -> Mode {
        self.store.mode()
    }

    pub fn bounds(&self) -> Bounds {
        self.store.bounds()
    }

    pub fn store(&self) -> &StatsStore {
        &self.store
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Ids of every element below the root, parents before children.
    pub fn all_elements(&self) -> Vec<String> {
        self.canvas
            .root_element()
            .descendants()
            .into_iter()
            .map(|el| el.id.clone())
            .collect()
    }

    fn request_redraw(&mut self) {
        let elements = self.all_elements();
        debug!(
            "redraw requested: mode={} bounds=({}, {}) elements={}",
            self.store.mode(),
            self.store.bounds().min,
            self.store.bounds().max,
            elements.len()
        );
        self.events.fire(ELEMENTS_CHANGED, &ElementsChanged { elements });
    }

    fn overlay(&self) -> Overlay<'_> {
        Overlay::new(self.store.bounds(), self.store.mode(), &self.style)
    }

    /// Draw the whole tree through the intercepted hooks into one `<svg>` document.
    /// Each element gets its own group; shapes are translated to their origin.
    pub fn render_all(&self) -> SvgNode {
        let root = self.canvas.root_element();
        let elements = root.descendants();
        let (width, height) = extent(&elements);

        let mut svg = SvgNode::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", width + 2.0 * PAGE_MARGIN)
            .attr("height", height + 2.0 * PAGE_MARGIN)
            .attr(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    -PAGE_MARGIN,
                    -PAGE_MARGIN,
                    width + 2.0 * PAGE_MARGIN,
                    height + 2.0 * PAGE_MARGIN
                ),
            );

        for el in elements {
            if !self.can_render(el) {
                continue;
            }
            let mut group = SvgNode::new("g").attr("data-element-id", &el.id);
            match el.kind {
                ElementKind::Root => continue,
                ElementKind::Shape { x, y, .. } => {
                    group = group.attr("transform", format!("translate({x},{y})"));
                    self.draw_shape(&mut group, el);
                }
                ElementKind::Connection { .. } => self.draw_connection(&mut group, el),
            }
            svg.append(group);
        }
        svg
    }
}

fn extent(elements: &[&DiagramElement]) -> (f64, f64) {
    elements.iter().fold((0.0_f64, 0.0_f64), |(w, h), el| match &el.kind {
        ElementKind::Shape {
            x,
            y,
            width,
            height,
        } => (w.max(x + width), h.max(y + height)),
        ElementKind::Connection { waypoints } => waypoints
            .iter()
            .fold((w, h), |(w, h), p| (w.max(p.x), h.max(p.y))),
        ElementKind::Root => (w, h),
    })
}

impl<E, R, C> Renderer for Visualizer<E, R, C>
where
    E: EventBus,
    R: Renderer,
    C: Canvas,
{
    fn priority(&self) -> u32 {
        HIGH_PRIORITY
    }

    fn draw_shape(&self, parent: &mut SvgNode, element: &DiagramElement) {
        self.base.draw_shape(parent, element);
        match self.store.value(&element.id) {
            Some(&value) => self.overlay().decorate_shape(parent, element, value),
            None => trace!("{}: no {} value", element.id, self.store.mode()),
        }
    }

    fn draw_connection(&self, parent: &mut SvgNode, element: &DiagramElement) {
        self.base.draw_connection(parent, element);
        match self.store.value(&element.id) {
            Some(&value) => self.overlay().decorate_connection(parent, element, value),
            None => trace!("{}: no {} value", element.id, self.store.mode()),
        }
    }

    fn shape_path(&self, shape: &DiagramElement) -> String {
        self.base.shape_path(shape)
    }
}
