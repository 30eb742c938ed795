use clap::Parser;
use killfeed_core::{FrameContext, TeamProfile};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::filter::EnvFilter;

mod runner;

#[derive(Parser, Debug)]
#[command(author, version, about = "Detect killfeed events in cropped killfeed rows")]
struct Args {
    #[clap(help = "Killfeed row images", required = true)]
    rows: Vec<PathBuf>,

    #[clap(
        long = "templates",
        short = 't',
        help = "Directory of hero icon templates",
        required = true
    )]
    template_dirs: Vec<PathBuf>,

    #[clap(long, short = 'c', help = "JSON analyzer configuration")]
    config: Option<PathBuf>,

    #[clap(long, default_value_t = 0.0, help = "Capture time of the frame, in seconds")]
    time: f64,

    #[clap(long, help = "First team as Name=R,G,B")]
    team1: Option<TeamProfile>,

    #[clap(long, help = "Second team as Name=R,G,B")]
    team2: Option<TeamProfile>,

    #[clap(long, help = "Print events as JSON lines")]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let defaults = FrameContext::default();
    let context = FrameContext::new(
        args.time,
        args.team1.clone().unwrap_or(defaults.team1),
        args.team2.clone().unwrap_or(defaults.team2),
    );

    match runner::analyze_files(&args.rows, &args.template_dirs, args.config.as_deref(), &context) {
        Ok(reports) => {
            for report in reports {
                println!("{}", report.render(args.json));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Detection failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
