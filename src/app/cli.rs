use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate utility CSS from class names used in source files"
)]
pub struct Cli {
    /// Path to the configuration file, relative to the project root
    #[arg(long, default_value = "classgen.toml")]
    pub config: PathBuf,

    /// Extra content patterns to scan (e.g., 'src/**/*.html')
    #[arg(long, num_args = 1..)]
    pub content: Option<Vec<String>>,

    /// Write the stylesheet to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Validate the configuration and exit without generating output
    #[arg(long)]
    pub check: bool,
}
