use clap::Parser;
use std::io;
use std::path::PathBuf;
use thermosand::{App, SimConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Grid width in cells
    #[arg(long)]
    cols: Option<usize>,

    /// Seed for region placement and every simulation draw
    #[arg(long)]
    seed: Option<u64>,

    /// Start without waiting for the prompt
    #[arg(long, short = 'y')]
    yes: bool,

    /// Skip drawing the grid (headless run)
    #[arg(long)]
    no_render: bool,

    /// Pause after each frame, in milliseconds
    #[arg(long)]
    frame_delay_ms: Option<u64>,

    /// Configuration file (RON) to load instead of ./thermosand.ron
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    /// Command-line flags take priority over every configuration layer
    fn apply(&self, config: &mut SimConfig) {
        if let Some(frames) = self.frames {
            config.run.frames = frames;
        }
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if self.seed.is_some() {
            config.run.seed = self.seed;
        }
        if self.yes {
            config.run.prompt = false;
        }
        if self.no_render {
            config.run.render = false;
        }
        if let Some(delay) = self.frame_delay_ms {
            config.run.frame_delay_ms = delay;
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = SimConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    log::info!("Starting Thermosand");
    log::info!("Building grid...");
    let mut app = App::new(config)?;
    log::info!("Grid ready.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    app.run(&mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
