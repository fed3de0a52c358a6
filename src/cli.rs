use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Takes a list of movies, downloads info, and makes a report")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Movie cache file to use/create (overrides the config file)
    #[arg(short = 'j', long, global = true)]
    pub datafile: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch data for every movie in a list file and write a report
    Run {
        /// Movie list, one title or Letterboxd slug per line
        #[arg(required = true)]
        input: PathBuf,

        /// Report path (defaults to out_<input>.csv next to the input)
        output: Option<PathBuf>,

        /// Force re-download of all availability data
        #[arg(short = 'f', long = "justwatch")]
        force_availability: bool,

        /// Search IMDb by title (for hand-written lists that are not Letterboxd slugs)
        #[arg(short = 'w', long = "handwritten")]
        title_search: bool,
    },

    /// Delete a movie from the cache by its query string
    Delete {
        /// Query string (list line) to delete
        query: String,
    },

    /// Download the film slugs of a Letterboxd list
    FetchList {
        /// Letterboxd list URL
        url: String,

        /// Output file
        #[arg(default_value = "movie_list.txt")]
        output: PathBuf,

        /// Number of pages the list spans
        #[arg(short, long, default_value = "1")]
        npages: u32,
    },

    /// List every field name stored in the cache
    Fields,

    /// Display version information
    Version,
}
