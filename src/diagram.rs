//! Owned diagram element tree and the canvas query surface.
//!
//! Hosts hand the visualizer a tree of shapes and connections. Geometry is
//! taken as given; nothing here lays anything out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// The invisible root of a diagram.
    Root,
    Shape {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        width: f64,
        height: f64,
    },
    Connection { waypoints: Vec<Point> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramElement {
    pub id: String,
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DiagramElement>,
}

impl DiagramElement {
    pub fn root(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Root,
            children: Vec::new(),
        }
    }

    pub fn shape(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Shape {
                x,
                y,
                width,
                height,
            },
            children: Vec::new(),
        }
    }

    pub fn connection(id: impl Into<String>, waypoints: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Connection { waypoints },
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: DiagramElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_connection(&self) -> bool {
        matches!(self.kind, ElementKind::Connection { .. })
    }

    /// Shape width, zero for anything else.
    pub fn width(&self) -> f64 {
        match self.kind {
            ElementKind::Shape { width, .. } => width,
            _ => 0.0,
        }
    }

    pub fn waypoints(&self) -> &[Point] {
        match &self.kind {
            ElementKind::Connection { waypoints } => waypoints,
            _ => &[],
        }
    }

    /// Every descendant, depth-first with parents before their children.
    /// The element itself is not included.
    pub fn descendants(&self) -> Vec<&DiagramElement> {
        let mut out = Vec::new();
        let mut stack: Vec<&DiagramElement> = self.children.iter().rev().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(el.children.iter().rev());
        }
        out
    }
}

/// Query surface of the host canvas.
pub trait Canvas {
    fn root_element(&self) -> &DiagramElement;
}

/// Canvas over an owned tree, e.g. one loaded from JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCanvas {
    root: DiagramElement,
}

impl StaticCanvas {
    pub fn new(root: DiagramElement) -> Self {
        Self { root }
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s).map(Self::new)
    }
}

impl Canvas for StaticCanvas {
    fn root_element(&self) -> &DiagramElement {
        &self.root
    }
}
