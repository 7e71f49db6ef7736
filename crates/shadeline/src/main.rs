//! shadeline - classify a PDF's text blocks by background brightness
//!
//! Renders each page of a PDF, runs Tesseract to locate text blocks,
//! and labels every block `Prompt/Response` (dark background) or
//! `Commentary` (light background). Results land in a CSV file and are
//! echoed as a table on stdout.

use clap::Parser;
use shadeline_core::{process_pdf, PipelineOptions, DEFAULT_DPI};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shadeline")]
#[command(about = "Classify a PDF's text blocks by local background brightness")]
#[command(version)]
struct Cli {
    /// Path to the input PDF file
    pdf_path: PathBuf,

    /// Path for the output CSV file (defaults to the input path with a .csv extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixel padding sampled around each text block
    #[arg(short, long, default_value_t = 10)]
    padding: u32,

    /// Brightness threshold separating the two classes (0-255)
    #[arg(short, long, default_value_t = 180)]
    threshold: u8,

    /// Rasterization density in dots per inch
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: f32,
}

fn main() {
    // RUST_LOG overrides the default page-progress output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let opts = PipelineOptions {
        output: cli.output,
        padding: cli.padding,
        threshold: cli.threshold,
        dpi: cli.dpi,
    };

    match process_pdf(&cli.pdf_path, &opts) {
        Ok(path) => {
            println!("Successfully processed PDF. Results saved to: {}", path.display());
        }
        Err(e) => {
            eprintln!("Error processing PDF: {e}");
            std::process::exit(1);
        }
    }
}
