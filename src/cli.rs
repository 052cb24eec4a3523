use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "thumbforge")]
#[command(author, version, about = "Resize newly stored images into 100x100 JPEG thumbnails")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `lambda` so the binary can serve as a Lambda bootstrap
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the AWS Lambda runtime loop, resizing S3 notification batches
    Lambda,

    /// Process a notification batch from a JSON file once
    Run {
        /// S3 event notification JSON to process
        #[arg(short, long, required = true)]
        event: PathBuf,

        /// Read and write S3 instead of the local bucket directory
        #[arg(long)]
        s3: bool,
    },

    /// Validate configuration and print the effective settings
    Validate,

    /// Display version information
    Version,
}
