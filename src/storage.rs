use crate::diagram::StaticCanvas;
use crate::models::StatTable;
use crate::style::OverlayStyle;
use crate::svg::SvgNode;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a statistics table (`{"<element id>": {"<mode>": value, ...}, ...}`).
pub fn load_stats<P: AsRef<Path>>(path: P) -> Result<StatTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading stats from {}", path.display()))?;
    StatTable::from_json_str(&text)
        .with_context(|| format!("parsing stats in {}", path.display()))
}

/// Load a diagram element tree from JSON.
pub fn load_diagram<P: AsRef<Path>>(path: P) -> Result<StaticCanvas> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading diagram from {}", path.display()))?;
    StaticCanvas::from_json_str(&text)
        .with_context(|| format!("parsing diagram in {}", path.display()))
}

/// Load overlay style overrides; missing keys keep their defaults.
pub fn load_style<P: AsRef<Path>>(path: P) -> Result<OverlayStyle> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading style from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing style in {}", path.display()))
}

/// Write a rendered document as an SVG file.
pub fn save_svg<P: AsRef<Path>>(doc: &SvgNode, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, doc.to_svg_string())
        .with_context(|| format!("writing svg to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mode, StatValue};
    use tempfile::tempdir;

    #[test]
    fn load_stats_and_report_bad_durations() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, r#"{"A": {"count": 3, "avg_minutes": "2h"}}"#).unwrap();
        fs::write(&bad, r#"{"A": {"avg_minutes": "2x"}}"#).unwrap();

        let table = load_stats(&good).unwrap();
        assert_eq!(table.value("A", Mode::AvgMinutes), Some(&StatValue::Duration(120)));

        let err = load_stats(&bad).unwrap_err();
        assert!(format!("{err:#}").contains("unrecognized duration unit"), "{err:#}");
    }

    #[test]
    fn save_svg_writes_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("x.svg");
        save_svg(&SvgNode::new("svg"), &out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "<svg/>\n");
    }
}
