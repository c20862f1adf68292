//! Command line arguments backing the `wadocr` binary.
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wadocr",
    about = "OCR-based QC analysis module: extracts typed values from fixed image regions",
    version
)]
pub struct Args {
    /// Study directory holding the series image files
    #[arg(long, short = 'd')]
    pub data: PathBuf,

    /// Module configuration file (JSON with an "actions" mapping)
    #[arg(long, short = 'c')]
    pub config: PathBuf,

    /// Results file written once after all actions complete
    #[arg(long, short = 'r')]
    pub results: PathBuf,

    /// Directory receiving exported region images (object-typed regions)
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Tesseract language passed to the OCR engine
    #[arg(long, default_value = "eng")]
    pub language: String,
}
