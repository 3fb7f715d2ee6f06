use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use ganttline_core::{assign_lanes, GapFinder, ItemId, LaneMove, ValidationError};

#[derive(Args)]
pub struct LanesArgs {
    /// JSON file with an array of items (`-` for stdin)
    file: PathBuf,
    /// Print compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// JSON file with an array of items (`-` for stdin)
    file: PathBuf,
    /// Item to move
    #[arg(long)]
    id: u64,
    /// Target lane index
    #[arg(long)]
    lane: usize,
    /// Override the forward search bound in days
    #[arg(long)]
    max_shift: Option<u32>,
    /// Config file (defaults to the user config)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolution {
    id: ItemId,
    from_lane: usize,
    target_lane: usize,
    #[serde(flatten)]
    result: LaneMove,
}

pub fn run_lanes(args: LanesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let items = super::read_items(&args.file)?;
    let lanes = assign_lanes(&items);
    let json = if args.compact {
        serde_json::to_string(&lanes)?
    } else {
        serde_json::to_string_pretty(&lanes)?
    };
    println!("{json}");
    Ok(())
}

pub fn run_resolve(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_ref())?;
    let items = super::read_items(&args.file)?;
    let id = ItemId(args.id);

    let lanes = assign_lanes(&items);
    let item = items
        .iter()
        .find(|item| item.id == id)
        .ok_or(ValidationError::UnknownItem(id))?;
    let from_lane = lanes.lane_of(id).ok_or(ValidationError::UnknownItem(id))?;

    let finder = GapFinder::new()
        .with_max_shift(args.max_shift.unwrap_or(config.interaction.gap_search_days));
    let result = finder.resolve(item, lanes.lane(args.lane));

    let resolution = Resolution {
        id,
        from_lane,
        target_lane: args.lane,
        result,
    };
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}
