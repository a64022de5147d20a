// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

use crate::search::Cuisine;

#[derive(Parser, Debug)]
#[command(name = "recipe-finder")]
#[command(about = "Recipe Finder - search recipes from a remote recipe API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Search for recipes and print one page of results
    Search {
        /// Free-text search query
        query: Option<String>,

        /// Restrict results to a cuisine
        #[arg(long, value_enum)]
        cuisine: Option<Cuisine>,

        /// Maximum preparation time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// Results page to show
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Show the details of one recipe
    Show {
        /// Recipe ID
        id: String,
    },
}
