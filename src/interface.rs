use camino::Utf8PathBuf;
use clap::Parser;
use clap::Subcommand;

use kettle::ObjectKind;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create an empty repository
    Init {
        /// Where to create the repository
        #[arg(value_name = "directory", default_value = ".")]
        path: Utf8PathBuf,
    },

    /// Print the contents of an object of the given type
    CatFile {
        #[arg(value_name = "type")]
        kind: ObjectKind,

        #[arg(value_name = "object")]
        object: String,
    },

    /// Compute the id of a file's contents, optionally storing it
    HashObject {
        #[arg(short = 't', value_name = "type", default_value = "blob")]
        kind: ObjectKind,

        /// Actually write the object into the database
        #[arg(short)]
        write: bool,

        /// Read the object from this file
        #[arg(env = "KETTLE_HASH_PATH")]
        path: Utf8PathBuf,
    },
}

#[derive(Debug, Parser)]
#[command(version)]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level, regardless of `RUST_LOG`
    #[arg(short, long)]
    pub verbose: bool,

    /// The path to be used.
    #[arg(short, env = "KETTLE_PATH")]
    pub path: Option<Utf8PathBuf>,
}
