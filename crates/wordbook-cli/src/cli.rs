use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "wordbook", version, about = "Command line client for the Wordbook dictionaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all available dictionaries
    List,

    /// Search the list of available dictionaries
    Search {
        /// The query to filter by; matches id, short and long name unless
        /// a field flag is given
        #[arg(allow_hyphen_values = true)]
        query: String,
        /// Filter the dictionaries by the language id
        #[arg(short, long)]
        id: bool,
        /// Filter the dictionaries by the short language name
        #[arg(short, long)]
        short: bool,
        /// Filter the dictionaries by the long language name
        #[arg(short, long)]
        long: bool,
    },

    /// Get suggestions from the available dictionaries
    Suggestions {
        /// The word or phrase to get suggestions for
        word: String,
        /// Dictionary to use, by id, short or long name
        #[arg(short, long)]
        dictionary: Option<String>,
        /// Load the definitions along with each word
        #[arg(short = 'D', long)]
        definition: bool,
    },

    /// Show the info text of a dictionary
    Info {
        /// Dictionary to show, by id, short or long name
        dictionary: String,
        /// Show the alphabet instead of the info text
        #[arg(short, long)]
        alphabet: bool,
    },
}
