use clap::Parser;
use eyre::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use trace_stitch::config::Config;
use trace_stitch::stitch::stitch;

#[derive(Parser)]
#[command(name = "trace-stitch")]
#[command(about = "join chrome trace fragments into one trace file")]
#[command(version)]
struct Args {
    #[arg(required = true, help = "fragment files, in output order")]
    inputs: Vec<PathBuf>,

    #[arg(
        short,
        long,
        default_value = "trace.json",
        help = "output file for the stitched trace"
    )]
    output: PathBuf,

    #[arg(short, long, help = "configuration file path (toml format)")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config path={}", path.display()))?,
        None => Config::default(),
    };

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create output path={}", args.output.display()))?;
    stitch(&args.inputs, &config.stitch, BufWriter::new(file))?;

    tracing::info!(
        output = %args.output.display(),
        fragments = args.inputs.len(),
        "trace stitched"
    );
    Ok(())
}
