use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use perfviz::events::LogEventBus;
use perfviz::render::PlainRenderer;
use perfviz::stats::StatsStore;
use perfviz::{Mode, Visualizer, format_duration, parse_duration, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "perfviz",
    version,
    about = "Overlay performance statistics on process diagrams"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a diagram with metric fills, glows and labels to SVG.
    Render(RenderArgs),
    /// Print the min/max of a metric across all elements.
    Bounds(BoundsArgs),
    /// Convert between duration strings and minutes.
    #[command(subcommand)]
    Duration(DurationCmd),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Diagram element tree (JSON).
    #[arg(short, long)]
    diagram: PathBuf,
    /// Statistics table keyed by element id (JSON).
    #[arg(short, long)]
    stats: PathBuf,
    /// Metric to visualize: count, time_minutes or avg_minutes.
    #[arg(short, long, default_value = "count")]
    mode: Mode,
    /// Output SVG path.
    #[arg(short, long)]
    out: PathBuf,
    /// Optional JSON file overriding overlay style defaults.
    #[arg(long)]
    style: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BoundsArgs {
    /// Statistics table keyed by element id (JSON).
    #[arg(short, long)]
    stats: PathBuf,
    #[arg(short, long, default_value = "count")]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum DurationCmd {
    /// "2d 3h 15m" -> minutes
    Parse { text: String },
    /// minutes -> "2d 3h 15m"
    Format { minutes: u64 },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Bounds(args) => cmd_bounds(args),
        Command::Duration(DurationCmd::Parse { text }) => {
            println!("{}", parse_duration(&text)?);
            Ok(())
        }
        Command::Duration(DurationCmd::Format { minutes }) => {
            println!("{}", format_duration(minutes));
            Ok(())
        }
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let canvas = storage::load_diagram(&args.diagram)?;
    let table = storage::load_stats(&args.stats)?;
    let style = match args.style.as_ref() {
        Some(path) => storage::load_style(path)?,
        None => Default::default(),
    };

    let mut viz = Visualizer::new(LogEventBus, PlainRenderer, canvas).with_style(style);
    viz.set_stats(table);
    viz.set_mode(args.mode);

    storage::save_svg(&viz.render_all(), &args.out)?;
    let bounds = viz.bounds();
    eprintln!(
        "Wrote {} ({} min={} max={})",
        args.out.display(),
        args.mode,
        bounds.min,
        bounds.max
    );
    Ok(())
}

fn cmd_bounds(args: BoundsArgs) -> Result<()> {
    let mut store = StatsStore::new(args.mode);
    store.set_stats(storage::load_stats(&args.stats)?);
    let bounds = store.bounds();
    println!("{} min={} max={}", args.mode, bounds.min, bounds.max);
    Ok(())
}
