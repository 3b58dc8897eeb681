// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

use crate::anchors::Position;
use crate::visualizer::ColorLookup;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Annotate Options:
    --source, -s <SOURCE>          Image to annotate
    --detections, -d <FILE>        Detection file (x1 y1 x2 y2 conf cls [track] per line)
    --output, -o <DIR>             Output directory [default: runs/annotate[N]]
    --thickness <N>                Box line thickness [default: 2]
    --color-lookup <LOOKUP>        index, class or track [default: class]
    --text-position <POSITION>     Label anchor, e.g. top_left, bottom_center [default: top_left]
    --text-scale <SCALE>           Label text scale [default: 0.5]
    --border-radius <N>            Label background corner radius [default: 0]
    --labels <BOOL>                Draw labels [default: true]
    --font <FILE>                  TrueType font for labels
    --verbose <BOOL>               Show verbose output [default: true]

Examples:
    video-analyzer annotate --source frame.jpg --detections frame.txt
    video-analyzer annotate -s frame.jpg -d tracks.txt --color-lookup track
    video-analyzer annotate -s frame.jpg -d frame.txt --text-position bottom_center --border-radius 4
    video-analyzer annotate -s frame.jpg -d frame.txt --labels false -o out/"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw boxes and labels from a detection file onto an image
    Annotate(AnnotateArgs),
}

/// Arguments for the annotate command.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Image to annotate
    #[arg(short, long)]
    pub source: String,

    /// Detection file
    #[arg(short, long)]
    pub detections: String,

    /// Output directory (defaults to the next free runs/annotate directory)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Box line thickness
    #[arg(long, default_value_t = 2)]
    pub thickness: u32,

    /// Color lookup strategy (index, class, track)
    #[arg(long, default_value_t = ColorLookup::Class)]
    pub color_lookup: ColorLookup,

    /// Label anchor position
    #[arg(long, default_value_t = Position::TopLeft)]
    pub text_position: Position,

    /// Label text scale
    #[arg(long, default_value_t = 0.5)]
    pub text_scale: f32,

    /// Label background corner radius
    #[arg(long, default_value_t = 0)]
    pub border_radius: u32,

    /// Draw labels
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub labels: bool,

    /// TrueType font used for labels
    #[arg(long)]
    pub font: Option<String>,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}
