//! CLI entry point for cutting images into jigsaw puzzle pieces

use clap::Parser;
use jigsaw_cut::io::cli::{Cli, PuzzleProcessor};

#[tokio::main(flavor = "current_thread")]
async fn main() -> jigsaw_cut::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let processor = PuzzleProcessor::new(cli);
    processor.process().await.map(|_| ())
}
