//! Minimal owned SVG node tree that renderers draw into.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Tags that can carry the fill color of a shape.
pub const FILLABLE_TAGS: [&str; 5] = ["rect", "ellipse", "polygon", "circle", "path"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgNode {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    /// Inline `style` declarations, serialized as `style="k: v; ..."`.
    pub style: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<SvgNode>,
}

impl SvgNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Create a node with attributes, like `svgCreate(tag, attrs)`.
    pub fn with_attrs<K, V>(tag: impl Into<String>, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        let mut node = Self::new(tag);
        for (k, v) in attrs {
            node.attrs.insert(k.into(), v.to_string());
        }
        node
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.insert(key.into(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn append(&mut self, child: SvgNode) {
        self.children.push(child);
    }

    /// Insert `child` before all existing children (drawn first, so behind them).
    pub fn insert_first(&mut self, child: SvgNode) {
        self.children.insert(0, child);
    }

    pub fn set_fill_style(&mut self, fill: impl ToString) {
        self.style.insert("fill".into(), fill.to_string());
    }

    pub fn fill_style(&self) -> Option<&str> {
        self.style.get("fill").map(String::as_str)
    }

    /// First descendant (document order, self excluded) whose tag is in `tags`.
    pub fn find_first_mut(&mut self, tags: &[&str]) -> Option<&mut SvgNode> {
        for child in self.children.iter_mut() {
            if tags.contains(&child.tag.as_str()) {
                return Some(child);
            }
            if let Some(found) = child.find_first_mut(tags) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_first(&self, tags: &[&str]) -> Option<&SvgNode> {
        for child in &self.children {
            if tags.contains(&child.tag.as_str()) {
                return Some(child);
            }
            if let Some(found) = child.find_first(tags) {
                return Some(found);
            }
        }
        None
    }

    /// Serialize as SVG/XML text.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, 0);
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.tag);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", k, escape(v));
        }
        if !self.style.is_empty() {
            let decls: Vec<String> = self.style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            let _ = write!(out, " style=\"{}\"", escape(&decls.join("; ")));
        }
        match (&self.text, self.children.is_empty()) {
            (None, true) => out.push_str("/>\n"),
            (Some(text), true) => {
                let _ = writeln!(out, ">{}</{}>", escape(text), self.tag);
            }
            (text, false) => {
                out.push_str(">\n");
                if let Some(text) = text {
                    let _ = writeln!(out, "{indent}  {}", escape(text));
                }
                for child in &self.children {
                    child.write_to(out, depth + 1);
                }
                let _ = writeln!(out, "{indent}</{}>", self.tag);
            }
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_fillable_depth_first() {
        let mut g = SvgNode::new("g");
        g.append(SvgNode::new("g").attr("id", "inner"));
        g.children[0].append(SvgNode::new("circle").attr("r", 3));
        g.append(SvgNode::new("rect"));

        let hit = g.find_first_mut(&FILLABLE_TAGS).unwrap();
        assert_eq!(hit.tag, "circle");
        hit.set_fill_style("red");
        assert_eq!(g.children[0].children[0].fill_style(), Some("red"));
        assert_eq!(g.children[1].fill_style(), None);
    }

    #[test]
    fn insert_first_places_behind() {
        let mut g = SvgNode::new("g");
        g.append(SvgNode::new("path"));
        g.insert_first(SvgNode::new("rect"));
        assert_eq!(g.children[0].tag, "rect");
    }

    #[test]
    fn serializes_attrs_style_and_text() {
        let mut t = SvgNode::with_attrs("text", [("x", 1), ("y", 2)]).with_text("a<b");
        t.set_fill_style("black");
        assert_eq!(
            t.to_svg_string(),
            "<text x=\"1\" y=\"2\" style=\"fill: black\">a&lt;b</text>\n"
        );
        assert_eq!(SvgNode::new("rect").to_svg_string(), "<rect/>\n");
    }
}
