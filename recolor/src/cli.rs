use clap::{ArgAction, Parser};
use recolor_engine::{Color, Metric};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Color formats: #RRGGBB or 'R,G,B'.
Tolerance: 0.0 (only exact source) .. 1.0 (all pixels).

Examples:
  recolor input.png --source 0,0,0 --target 6,145,15
  recolor input.png --source '#000000' --target '#06910F' -t 0.30
  recolor input.png -s 0,0,0 --target 6,145,15 -t 0.2 -m channel
  recolor input.png -s '12,12,12' --target '#00FF00' -o out.png";

/// Convert pixels near a source color to a target color.
///
/// Similarity is determined by a selectable metric: 'euclidean' or 'channel'.
#[derive(Parser, Debug)]
#[command(name = "recolor", version, after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to input image
    pub input: PathBuf,

    /// Path to output image (default: <input>_converted.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Source color to replace near (default: 0,0,0)
    #[arg(short, long)]
    pub source: Option<Color>,

    /// Target color to apply (default: 6,145,15)
    #[arg(long)]
    pub target: Option<Color>,

    /// Similarity threshold as a fraction between 0 and 1 (default: 0.30).
    /// For metric=euclidean, it's normalized RGB distance. For metric=channel,
    /// it's per-channel absolute difference normalized by 255.
    #[arg(short, long, allow_negative_numbers = true)]
    pub tolerance: Option<f64>,

    /// Similarity metric: 'euclidean' (normalized RGB distance) or 'channel'
    /// (per-channel threshold). Default: euclidean.
    #[arg(short, long)]
    pub metric: Option<Metric>,

    /// Leave fully transparent pixels unchanged
    #[arg(long)]
    pub skip_transparent: bool,

    /// TOML profile with default recolor parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
