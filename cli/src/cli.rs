use crate::config::BackendKind;
use clap::{Parser, Subcommand};
use notekeep_core::ViewKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notekeep", version)]
#[command(about = "Create, tag, search, pin, archive and trash short notes")]
pub struct Cli {
    /// Config file (defaults to <config dir>/notekeep/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Override the storage backend from the config file
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a note
    New {
        /// Title; left empty the note is called "Untitled"
        #[arg(default_value = "")]
        title: String,

        #[arg(long, short, default_value = "")]
        content: String,

        /// Tags (comma-separated or repeated)
        #[arg(long, short)]
        tags: Vec<String>,
    },

    /// Change a note's title, content or tags
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short)]
        content: Option<String>,

        /// Replace all tags (comma-separated; empty string clears them)
        #[arg(long, short)]
        tags: Option<String>,
    },

    /// Pin or unpin a note
    Pin { id: String },

    /// Archive or unarchive a note
    Archive { id: String },

    /// Move a note to the trash
    Trash { id: String },

    /// Take a note back out of the trash
    Restore { id: String },

    /// Delete a note for good
    Delete { id: String },

    /// List every tag in use
    Tags,

    /// List the notes in a view
    List {
        /// active, archived or trashed
        #[arg(long, short, default_value = "active")]
        view: ViewKind,

        /// Case-insensitive text to look for in titles and content
        #[arg(long, short, default_value = "")]
        search: String,

        /// Only notes carrying exactly this tag
        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Print one note
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Number of notes in each view
    Stats,
}
