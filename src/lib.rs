//! perfviz
//!
//! Overlay process performance statistics on a diagram rendering. Every shape
//! and connection with a value for the selected metric ("mode") is recolored
//! from green (lowest observed) to red (highest observed) and labeled.
//!
//! ### Features
//! - Statistics tables keyed by element id, values as numbers or durations (`"1d 2h 5m"`)
//! - Min/max bounds recomputed whenever stats or mode change
//! - Translucent fills on shapes, glow strokes on connections, contrast-aware labels
//! - Pluggable base renderer, canvas and event bus
//!
//! ### Example
//! ```no_run
//! use perfviz::{Mode, Visualizer};
//! use perfviz::events::LogEventBus;
//! use perfviz::render::PlainRenderer;
//!
//! let canvas = perfviz::storage::load_diagram("diagram.json")?;
//! let mut viz = Visualizer::new(LogEventBus, PlainRenderer, canvas);
//! viz.set_stats(perfviz::storage::load_stats("stats.json")?);
//! viz.set_mode(Mode::AvgMinutes);
//! perfviz::storage::save_svg(&viz.render_all(), "overlay.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod diagram;
pub mod events;
pub mod models;
pub mod overlay;
pub mod render;
pub mod stats;
pub mod storage;
pub mod style;
pub mod svg;
pub mod time;
pub mod viz;

pub use models::{Bounds, Mode, StatRecord, StatTable, StatValue};
pub use time::{DurationError, format_duration, parse_duration};
pub use viz::Visualizer;
