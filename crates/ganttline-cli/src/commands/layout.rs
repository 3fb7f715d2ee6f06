use clap::Args;
use std::path::PathBuf;

use ganttline_core::{RenderModel, Viewport};

#[derive(Args)]
pub struct LayoutArgs {
    /// JSON file with an array of items (`-` for stdin)
    file: PathBuf,
    /// Zoom level (clamped to the configured bounds)
    #[arg(long)]
    zoom: Option<f64>,
    /// Container width in pixels
    #[arg(long, default_value_t = 0.0)]
    width: f64,
    /// Config file (defaults to the user config)
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn run(args: LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_ref())?;
    let items = super::read_items(&args.file)?;
    if items.is_empty() {
        return Err("no items to lay out".into());
    }

    let zoom = args.zoom.unwrap_or(config.zoom.initial);
    let viewport = Viewport::new(zoom, args.width, &config.zoom);
    let model = RenderModel::build(&items, &viewport, &config)?;
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
