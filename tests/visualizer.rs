use perfviz::diagram::{DiagramElement, Point, StaticCanvas};
use perfviz::events::{ELEMENTS_CHANGED, RecordingEventBus};
use perfviz::models::{Bounds, Mode, StatRecord, StatTable, StatValue};
use perfviz::render::{DEFAULT_PRIORITY, PlainRenderer, Renderer};
use perfviz::svg::SvgNode;
use perfviz::viz::{HIGH_PRIORITY, Visualizer};

fn canvas() -> StaticCanvas {
    StaticCanvas::new(
        DiagramElement::root("root")
            .with_child(
                DiagramElement::shape("Lane", 0.0, 0.0, 600.0, 200.0)
                    .with_child(DiagramElement::shape("A", 50.0, 50.0, 100.0, 80.0))
                    .with_child(DiagramElement::shape("B", 300.0, 50.0, 100.0, 80.0)),
            )
            .with_child(DiagramElement::connection(
                "F",
                vec![Point::new(150.0, 90.0), Point::new(300.0, 90.0)],
            )),
    )
}

fn stats() -> StatTable {
    [
        (
            "A",
            StatRecord::new()
                .with(Mode::Count, 5)
                .with(Mode::TimeMinutes, StatValue::Duration(1500)),
        ),
        ("B", StatRecord::new().with(Mode::Count, 15)),
        (
            "F",
            StatRecord::new()
                .with(Mode::Count, 10)
                .with(Mode::TimeMinutes, StatValue::Duration(60)),
        ),
    ]
    .into_iter()
    .collect()
}

fn visualizer() -> Visualizer<RecordingEventBus, PlainRenderer, StaticCanvas> {
    Visualizer::new(RecordingEventBus::default(), PlainRenderer, canvas())
}

fn shape(viz: &impl Renderer, id: &str) -> SvgNode {
    let el = DiagramElement::shape(id, 0.0, 0.0, 100.0, 80.0);
    let mut g = SvgNode::new("g");
    viz.draw_shape(&mut g, &el);
    g
}

#[test]
fn setters_broadcast_full_redraw_in_tree_order() {
    let mut viz = visualizer();
    viz.set_stats(stats());
    viz.set_mode(Mode::TimeMinutes);

    let fired = &viz.events().fired;
    assert_eq!(fired.len(), 2);
    for (name, payload) in fired {
        assert_eq!(name, ELEMENTS_CHANGED);
        assert_eq!(payload.elements, ["Lane", "A", "B", "F"]);
    }
}

#[test]
fn bounds_track_stats_and_mode() {
    let mut viz = visualizer();
    assert_eq!(viz.mode(), Mode::Count);
    viz.set_stats(stats());
    assert_eq!(viz.bounds(), Bounds::new(5.0, 15.0));
    viz.set_mode(Mode::TimeMinutes);
    assert_eq!(viz.bounds(), Bounds::new(60.0, 1500.0));
    viz.set_mode(Mode::AvgMinutes);
    assert_eq!(viz.bounds(), Bounds::new(0.0, 0.0));
}

#[test]
fn overlay_draws_above_base_renderer() {
    let viz = visualizer();
    assert!(viz.priority() > PlainRenderer.priority());
    assert_eq!(viz.priority(), HIGH_PRIORITY);
    assert_eq!(PlainRenderer.priority(), DEFAULT_PRIORITY);
}

#[test]
fn empty_stats_leave_shapes_undecorated() {
    let mut viz = visualizer();
    viz.set_stats(StatTable::new());

    let g = shape(&viz, "A");
    assert_eq!(g.children.len(), 1);
    assert_eq!(g.children[0].fill_style(), Some("white"));
}

#[test]
fn shapes_are_colored_by_ratio() {
    let mut viz = visualizer();
    viz.set_stats(stats());

    let low = shape(&viz, "A");
    let high = shape(&viz, "B");
    assert_eq!(low.children[0].fill_style(), Some("rgba(0,255,0,0.5)"));
    assert_eq!(high.children[0].fill_style(), Some("rgba(255,0,0,0.5)"));
    // green label gets dark text, red label gets light text
    assert_eq!(low.children[1].children[1].get_attr("fill"), Some("black"));
    assert_eq!(high.children[1].children[1].get_attr("fill"), Some("white"));
}

#[test]
fn records_without_the_mode_are_skipped() {
    let mut viz = visualizer();
    viz.set_stats(stats());
    viz.set_mode(Mode::TimeMinutes);

    let b = shape(&viz, "B");
    assert_eq!(b.children.len(), 1);

    let a = shape(&viz, "A");
    assert_eq!(a.children[1].children[1].text.as_deref(), Some("1d 1h"));
}

#[test]
fn connection_glow_and_label() {
    let mut viz = visualizer();
    viz.set_stats(stats());

    let flow = DiagramElement::connection("F", vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    let mut g = SvgNode::new("g");
    viz.draw_connection(&mut g, &flow);

    assert_eq!(g.children.len(), 3);
    let glow = &g.children[0];
    assert_eq!(glow.get_attr("stroke-width"), Some("25"));
    assert_eq!(glow.get_attr("fill"), Some("none"));
    let label = &g.children[2];
    assert_eq!(label.children[1].text.as_deref(), Some("10"));
    // "10" is 26 px wide, centered on (50, 0)
    assert_eq!(label.children[0].get_attr("x"), Some("37"));
}

#[test]
fn shape_path_is_delegated() {
    let viz = visualizer();
    let el = DiagramElement::shape("A", 0.0, 0.0, 10.0, 10.0);
    assert_eq!(viz.shape_path(&el), PlainRenderer.shape_path(&el));
}

#[test]
fn render_all_groups_every_element() {
    let mut viz = visualizer();
    viz.set_stats(stats());
    let doc = viz.render_all();

    assert_eq!(doc.tag, "svg");
    let ids: Vec<&str> = doc
        .children
        .iter()
        .filter_map(|g| g.get_attr("data-element-id"))
        .collect();
    assert_eq!(ids, ["Lane", "A", "B", "F"]);
    assert_eq!(doc.children[1].get_attr("transform"), Some("translate(50,50)"));

    let text = doc.to_svg_string();
    assert!(text.starts_with("<svg"));
    assert!(text.contains("rgba(255,0,0,0.5)"));
}
