use std::fs;

use framecast_codec::FrameConfig;
use framecast_stream::{
    connect_with_config, CancelToken, ConnectConfig, FilePayload, Pacer, PayloadSource,
    StaticPayload, StreamStats,
};
use serde::Serialize;

use crate::cmd::send::{parse_duration, parse_stream_id};
use crate::cmd::StreamArgs;
use crate::exit::{stream_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};
use crate::output::OutputFormat;

/// Caps an inner source at N payloads.
struct Limited<S> {
    inner: S,
    remaining: Option<u64>,
}

impl<S: PayloadSource> PayloadSource for Limited<S> {
    fn next_payload(&mut self) -> std::io::Result<Option<bytes::Bytes>> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return Ok(None);
            }
            *remaining -= 1;
        }
        self.inner.next_payload()
    }
}

enum Source {
    Cached(Limited<StaticPayload>),
    Reloading(Limited<FilePayload>),
}

impl PayloadSource for Source {
    fn next_payload(&mut self) -> std::io::Result<Option<bytes::Bytes>> {
        match self {
            Source::Cached(s) => s.next_payload(),
            Source::Reloading(s) => s.next_payload(),
        }
    }
}

#[derive(Serialize)]
struct StreamOutput {
    addr: String,
    frames_sent: u64,
    bytes_sent: u64,
}

pub fn run(args: StreamArgs, format: OutputFormat) -> CliResult<i32> {
    let mut pacer = Pacer::from_fps(args.fps)
        .ok_or_else(|| CliError::new(USAGE, format!("invalid frame rate: {}", args.fps)))?;
    let timeout = parse_duration(&args.timeout)?;

    let config = ConnectConfig {
        stream_id: parse_stream_id(args.id.as_deref())?,
        frame: FrameConfig {
            write_timeout: Some(timeout),
            ..FrameConfig::default()
        },
        ..ConnectConfig::default()
    };

    let mut source = if args.reload {
        Source::Reloading(Limited {
            inner: FilePayload::new(&args.file),
            remaining: args.count,
        })
    } else {
        let payload = fs::read(&args.file).map_err(|err| {
            crate::exit::io_error(&format!("failed reading {}", args.file.display()), err)
        })?;
        Source::Cached(Limited {
            inner: StaticPayload::new(payload),
            remaining: args.count,
        })
    };

    let cancel = CancelToken::new();
    install_ctrlc_handler(cancel.clone())?;

    let mut sender = connect_with_config(&args.addr, &config)
        .map_err(|err| stream_error("connect failed", err))?;

    tracing::info!(addr = %args.addr, fps = args.fps, "streaming");

    let stats = sender
        .run(&mut source, &mut pacer, &cancel)
        .map_err(|err| stream_error("stream failed", err))?;

    print_stats(&args.addr, stats, format);
    Ok(SUCCESS)
}

fn print_stats(addr: &str, stats: StreamStats, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = StreamOutput {
                addr: addr.to_string(),
                frames_sent: stats.frames_sent,
                bytes_sent: stats.bytes_sent,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        _ => {
            println!(
                "sent {} frames ({} bytes) to {}",
                stats.frames_sent, stats.bytes_sent, addr
            );
        }
    }
}

fn install_ctrlc_handler(cancel: CancelToken) -> CliResult<()> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
