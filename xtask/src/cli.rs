use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Hero Atlas utilities - trunk must be installed")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Build the frontend and launch the server")]
    Launch {
        /// Hero records to load into an empty store
        #[arg(long)]
        seed_file: Option<String>,
    },
    #[command(about = "Package the launcher and frontend into HeroAtlas/")]
    Dist { target_triple: Option<String> },
}
