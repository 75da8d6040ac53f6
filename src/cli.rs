use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huffpack", about = "Static Huffman file compressor", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all log output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode every file of a directory
    Encode {
        /// Directory whose files are encoded
        #[arg(long, env = "HUFFPACK_INPUT", default_value = "./input")]
        input: PathBuf,

        /// Directory receiving the -map.bin and -data.bin stores
        #[arg(long, env = "HUFFPACK_OUTPUT", default_value = "./output")]
        output: PathBuf,

        /// Worker threads (0 = one per core)
        #[arg(long, short = 'j', env = "HUFFPACK_JOBS", default_value_t = 0)]
        jobs: usize,
    },

    /// Decode one unit back to a file
    Decode {
        /// Unit base path, without the -map.bin / -data.bin suffix
        unit: PathBuf,

        /// Directory receiving the decoded file
        #[arg(long, env = "HUFFPACK_OUTPUT", default_value = "./output")]
        output: PathBuf,
    },
}
