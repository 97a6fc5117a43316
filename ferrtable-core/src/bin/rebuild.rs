use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use snafu::ResultExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ferrtable_core::consts::*;
use ferrtable_core::error::ConfigSnafu;
use ferrtable_core::{RebuildConfigBuilder, TableEvidence, rebuild_batch};

#[derive(Parser)]
#[command(name = "rebuild")]
#[command(about = "Rebuild table markup from recorded model outputs")]
struct Args {
    #[arg(required = true, help = "Table evidence JSON files")]
    fixtures: Vec<PathBuf>,

    #[arg(
        long,
        default_value_t = ROW_TOLERANCE,
        help = "Maximum y difference for two text boxes to share a row"
    )]
    row_tolerance: f32,

    #[arg(long, help = "Write a cell assignment overlay per fixture into this directory")]
    draw: Option<PathBuf>,

    #[arg(long, help = "Also print the output token list")]
    tokens: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = RebuildConfigBuilder::default()
        .row_tolerance(args.row_tolerance)
        .build()
        .context(ConfigSnafu)?;

    let records = args
        .fixtures
        .iter()
        .map(TableEvidence::from_path)
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} fixtures", records.len());

    let results = rebuild_batch(&records, &config);

    for ((path, record), result) in args.fixtures.iter().zip(&records).zip(results) {
        match result {
            Ok(Some(table)) => {
                println!("{}", table.html);
                if args.tokens {
                    println!("{:?}", table.tokens);
                }
            }
            Ok(None) => println!("<no detections>"),
            Err(e) => {
                error!("Failed to rebuild {}: {}", path.display(), e);
                return Err(e.into());
            }
        }

        if let Some(dir) = &args.draw {
            std::fs::create_dir_all(dir)?;
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            let output = dir.join(format!("{stem}.png"));
            record.draw(&output, &config)?;
            info!("Overlay saved to {}", output.display());
        }
    }

    Ok(())
}
