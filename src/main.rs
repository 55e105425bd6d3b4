// Command-line front end: collects the two folders and a quality value,
// runs the batch and prints the summary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use metadata_remover::{
    BatchConfig, BatchReport, PngCompression, ProcessingRequest, ProgressType, remove_metadata,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Strip EXIF, profiles and comments from JPEG/PNG images in a folder")]
struct Args {
    /// Folder containing the images (not searched recursively)
    input_dir: PathBuf,

    /// Folder the cleaned copies are written to; created if missing
    output_dir: PathBuf,

    /// JPEG quality, 0 (smallest) to 100 (best). Ignored for PNG
    #[arg(short, long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(0..=100))]
    quality: u32,

    /// Number of files processed in parallel (default: one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// PNG compression effort
    #[arg(long, value_enum, default_value_t = CompressionArg::Default)]
    png_compression: CompressionArg,

    /// Print the full report as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    Fast,
    Default,
    Best,
}

impl From<CompressionArg> for PngCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Fast => PngCompression::Fast,
            CompressionArg::Default => PngCompression::Default,
            CompressionArg::Best => PngCompression::Best,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();
    debug!("Parsed arguments: {:?}", args);

    match run(args).await {
        Ok(report) if report.failure_count() > 0 => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> Result<BatchReport> {
    let request = ProcessingRequest::new(&args.input_dir, &args.output_dir, args.quality);
    let mut config = BatchConfig::default().with_png_compression(args.png_compression.into());
    if let Some(jobs) = args.jobs {
        config = config.with_workers(jobs);
    }

    let report = remove_metadata(&request, config, |progress| {
        if progress.progress_type == ProgressType::Progress {
            if let Some(path) = &progress.source_path {
                info!("[{}%] {}", progress.progress_percentage, path.display());
            }
        }
    })
    .await
    .with_context(|| format!("Cannot process folder {}", args.input_dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(report)
}

fn print_report(report: &BatchReport) {
    for failure in report.failures() {
        println!(
            "Failed to process file: {}: {}",
            failure.source_path.display(),
            failure.reason.as_deref().unwrap_or("unknown error")
        );
    }
    println!("{}", report.summary());
}
