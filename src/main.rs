// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use video_analyzer::cli::annotate::run_annotate;
use video_analyzer::cli::args::{Cli, Commands};
use video_analyzer::cli::logging::set_verbose;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Annotate(args) => {
            set_verbose(args.verbose);
            run_annotate(args);
        }
    }
}
