//! rowview - Entry Point

use clap::Parser;
use rowview::model::AppError;
use rowview::surface::HeadlessSurface;
use rowview::view_state::{ListView, RenderDelta, TextRenderer};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Replays scroll passes against a headless virtualized list
#[derive(Parser, Debug)]
#[command(name = "rowview")]
#[command(version)]
#[command(about = "Replay render passes of a virtualized list on a headless surface")]
pub struct Args {
    /// Number of rows to generate
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Pixel height of each row
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub row_height: Option<u32>,

    /// Initial viewport height in pixels
    #[arg(short, long)]
    pub viewport: Option<usize>,

    /// Pass to replay, in order: scroll=PX, viewport=PX or reveal=ROW
    #[arg(short, long = "step")]
    pub steps: Vec<Step>,

    /// Print one JSON object per pass
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// One replayed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "value")]
pub enum Step {
    /// Scroll to an absolute offset.
    Scroll(usize),
    /// Change the viewport height.
    Viewport(usize),
    /// Bring a row into view.
    Reveal(usize),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected OP=VALUE, got '{s}'"))?;
        let value: usize = value
            .trim()
            .parse()
            .map_err(|e| format!("invalid value in '{s}': {e}"))?;
        match op.trim() {
            "scroll" => Ok(Step::Scroll(value)),
            "viewport" => Ok(Step::Viewport(value)),
            "reveal" => Ok(Step::Reveal(value)),
            other => Err(format!("unknown step '{other}'")),
        }
    }
}

#[derive(Debug, Serialize)]
struct PassReport<'a> {
    pass: usize,
    step: Option<Step>,
    #[serde(flatten)]
    delta: &'a RenderDelta,
    pooled: usize,
}

type TextView = ListView<String, TextRenderer, HeadlessSurface>;

fn report(
    out: &mut impl Write,
    json: bool,
    pass: usize,
    step: Option<Step>,
    delta: &RenderDelta,
    pooled: usize,
) -> Result<(), AppError> {
    if json {
        let line = serde_json::to_string(&PassReport {
            pass,
            step,
            delta,
            pooled,
        })?;
        writeln!(out, "{line}")?;
    } else {
        writeln!(
            out,
            "pass {pass}: rows {}..{} inserted {:?} removed {:?} top {}px pooled {pooled}",
            delta.range.start, delta.range.end, delta.inserted, delta.removed, delta.container_top,
        )?;
    }
    Ok(())
}

fn apply(view: &mut TextView, step: Step) -> Result<RenderDelta, AppError> {
    let delta = match step {
        Step::Scroll(px) => view.set_scroll_top(px)?,
        Step::Viewport(px) => view.layout(px)?,
        Step::Reveal(row) => view.reveal(row)?,
    };
    Ok(delta)
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = rowview::config::load_config_with_precedence(args.config.clone())?;
        let merged = rowview::config::merge_config(config_file);
        let with_env = rowview::config::apply_env_overrides(merged);
        rowview::config::apply_cli_overrides(
            with_env,
            args.row_height.map(|h| h as usize),
            args.viewport,
            args.rows,
        )
    };

    rowview::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        steps = args.steps.len(),
        "Configuration loaded and resolved"
    );

    let mut view = TextView::new(
        HeadlessSurface::new(),
        TextRenderer::new(config.row_height),
        config.viewport_height,
    )?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let delta = view.splice(0, 0, (0..config.row_count).map(|i| format!("row {i}")))?;
    report(&mut out, args.json, 0, None, &delta, view.pooled_cells())?;

    for (i, step) in args.steps.iter().copied().enumerate() {
        let delta = apply(&mut view, step)?;
        report(&mut out, args.json, i + 1, Some(step), &delta, view.pooled_cells())?;
    }

    let disposed = view.dispose()?;
    info!(disposed, "View disposed");

    Ok(())
}
