pub mod pack;
pub mod unpack;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "obs-pack",
    about = "OBS scene collection (un)packer",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Directory to write the archive or unpacked folder into
    #[arg(
        short = 'o',
        long = "output-dir",
        env = "OBS_PACK_OUTPUT_DIR",
        global = true
    )]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a scene collection and every asset it references into one zip file
    Pack {
        /// Scene collection JSON file
        scenes: PathBuf,
    },
    /// Unpack a packed zip into a folder, making asset paths absolute again
    Unpack {
        /// Zip file produced by `pack`
        archive: PathBuf,
    },
}
