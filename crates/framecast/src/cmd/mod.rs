use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod listen;
pub mod send;
pub mod stream;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a single frame.
    Send(SendArgs),
    /// Stream frames at a fixed rate.
    Stream(StreamArgs),
    /// Listen and receive inbound frame streams.
    Listen(ListenArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Stream(args) => stream::run(args, format),
        Command::Listen(args) => listen::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Address to connect to (host:port).
    pub addr: String,
    /// Read payload from file.
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,
    /// Raw string payload.
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,
    /// Stream id sent as a one-time preamble before the frame.
    #[arg(long, value_name = "UUID")]
    pub id: Option<String>,
    /// Write timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Address to connect to (host:port).
    pub addr: String,
    /// File supplying the payload.
    #[arg(long)]
    pub file: PathBuf,
    /// Target frame rate.
    #[arg(long, default_value = "30")]
    pub fps: f64,
    /// Stop after sending N frames. Default: stream until Ctrl-C.
    #[arg(long)]
    pub count: Option<u64>,
    /// Stream id sent as a one-time preamble before the first frame.
    #[arg(long, value_name = "UUID")]
    pub id: Option<String>,
    /// Re-read the file for every frame instead of caching it once.
    #[arg(long)]
    pub reload: bool,
    /// Write timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Address to bind (host:port).
    pub addr: String,
    /// Require senders to identify with a stream-id preamble.
    #[arg(long)]
    pub expect_id: bool,
    /// Exit after receiving N frames in total.
    #[arg(long)]
    pub count: Option<u64>,
    /// Save each payload under this directory.
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,
    /// Maximum accepted payload size in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_frame_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
