use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use framecast_codec::Frame;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    seq: u64,
    payload_size: usize,
    payload_kind: &'a str,
    stream_id: Option<&'a str>,
    peer: &'a str,
    timestamp: String,
}

pub fn print_frame(seq: u64, frame: &Frame, stream_id: Option<&str>, peer: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                seq,
                payload_size: frame.len(),
                payload_kind: payload_kind(frame.payload.as_ref()),
                stream_id,
                peer,
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SEQ", "SIZE", "KIND", "STREAM", "PEER"])
                .add_row(vec![
                    seq.to_string(),
                    frame.len().to_string(),
                    payload_kind(frame.payload.as_ref()).to_string(),
                    stream_id.unwrap_or("-").to_string(),
                    peer.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "seq={} size={} kind={} stream={} peer={}",
                seq,
                frame.len(),
                payload_kind(frame.payload.as_ref()),
                stream_id.unwrap_or("-"),
                peer
            );
        }
        OutputFormat::Raw => {
            print_raw(frame.payload.as_ref());
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Rough payload classification for summaries. JPEG is the common case on
/// this wire; everything else is text or opaque binary.
pub fn payload_kind(payload: &[u8]) -> &'static str {
    if payload.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "jpeg";
    }
    if payload.is_empty() || std::str::from_utf8(payload).is_ok() {
        return "text";
    }
    "binary"
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
