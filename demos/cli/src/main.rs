use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use folio_content::{builtin_portfolio, load_portfolio_str};
use folio_core::{
    ConfigOverrides, DrawKind, Timeline, TimelineConfig, ViewportState, WheelDelta,
    ZoomController,
};
use log::info;

#[derive(Parser, Debug)]
#[command(
    name = "folio-cli",
    about = "Print the timeline layout for a portfolio at a given zoom and scroll position."
)]
struct Args {
    /// Portfolio JSON document; the embedded data set is used when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON file with configuration overrides.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of zoom steps to apply before layout (positive zooms in).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    zoom_steps: i32,

    /// Horizontal scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Visible width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let portfolio = match &args.input {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read file {path:?}"))?;
            load_portfolio_str(&data).with_context(|| format!("Invalid portfolio in {path:?}"))?
        }
        None => builtin_portfolio().context("Embedded portfolio is invalid")?,
    };

    let config = match &args.config {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read file {path:?}"))?;
            let overrides: ConfigOverrides = serde_json::from_str(&data)
                .with_context(|| format!("Invalid config in {path:?}"))?;
            TimelineConfig::from(overrides)
        }
        None => TimelineConfig::default(),
    };

    let timeline = Timeline::new(portfolio.catalog.timeline_items(), config);
    let mut viewport = ViewportState::new(args.scroll, args.viewport_width);
    let mut zoom = ZoomController::new(timeline.config());

    for _ in 0..args.zoom_steps.unsigned_abs() {
        let dy = if args.zoom_steps > 0 { -1.0 } else { 1.0 };
        if zoom.on_wheel(WheelDelta::new(0.0, dy), &viewport).is_none() {
            break;
        }
    }

    let mut corrected = None;
    while zoom.has_pending_correction() {
        corrected = zoom.on_frame(viewport.viewport_width);
    }
    if let Some(offset) = corrected {
        info!("scroll corrected from {:.1} to {offset:.1}", viewport.scroll_offset);
        viewport.scroll_offset = offset;
    }

    let layout = timeline
        .layout(zoom.level(), &viewport)
        .context("Could not compute layout")?;

    println!(
        "Owner: {}\nProjects: {}\nZoom: {:.2}\nScroll: {:.1} / {:.1}",
        portfolio.site.owner,
        portfolio.catalog.len(),
        zoom.level().value(),
        viewport.scroll_offset,
        layout.total_width
    );
    match &layout.centered {
        Some(point) => println!("Centered: {point:?}"),
        None => println!("Centered: -"),
    }

    for ins in &layout.instructions {
        let marker = if ins.emphasized { "*" } else { " " };
        let description = match &ins.kind {
            DrawKind::Gridline { date, year_mark } => {
                format!("gridline {date}{}", if *year_mark { " (year)" } else { "" })
            }
            DrawKind::ItemMarker { id, date, side, .. } => format!("item {id} {date} {side:?}"),
            DrawKind::Label { text, role, .. } => format!("label {role:?} {text:?}"),
        };
        println!("{marker} {:>9.1}  {description}", ins.x);
    }

    Ok(())
}
