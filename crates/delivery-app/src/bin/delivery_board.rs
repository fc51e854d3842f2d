use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    delivery_app::cli::run(delivery_app::cli::Args::parse())
}
