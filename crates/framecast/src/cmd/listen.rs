use std::path::{Path, PathBuf};

use framecast_codec::{Frame, FrameConfig};
use framecast_stream::{CancelToken, ListenerConfig, StreamError, StreamListener};

use crate::cmd::ListenArgs;
use crate::exit::{stream_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{payload_kind, print_frame, OutputFormat};

pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let mut frame_config = FrameConfig::default();
    if let Some(max) = args.max_frame_size {
        frame_config.max_payload_size = max;
    }

    let listener = StreamListener::bind(&args.addr)
        .map_err(|err| stream_error("bind failed", err))?
        .with_config(ListenerConfig {
            expect_preamble: args.expect_id,
            frame: frame_config,
        });

    if let Some(dir) = &args.save_dir {
        std::fs::create_dir_all(dir)
            .map_err(|err| crate::exit::io_error("failed creating save dir", err))?;
    }

    let running = CancelToken::new();
    install_ctrlc_handler(running.clone())?;

    let mut seq = 0u64;

    while !running.is_cancelled() {
        let mut inbound = match listener.accept() {
            Ok(inbound) => inbound,
            Err(StreamError::InvalidPreamble(reason)) => {
                tracing::warn!(%reason, "sender rejected");
                continue;
            }
            Err(err) => return Err(stream_error("accept failed", err)),
        };

        let stream_id = inbound.stream_id.map(|id| id.to_string());
        let peer = inbound.peer_addr.to_string();
        tracing::info!(%peer, stream_id = stream_id.as_deref().unwrap_or("-"), "session started");

        let session = inbound.receiver.run(&running, |frame| {
            seq += 1;
            print_frame(seq, &frame, stream_id.as_deref(), &peer, format);

            if let Some(dir) = &args.save_dir {
                if let Err(err) = save_payload(dir, seq, &frame) {
                    tracing::warn!(error = %err, seq, "failed saving payload");
                }
            }

            if let Some(count) = args.count {
                if seq >= count {
                    running.cancel();
                }
            }
        });

        match session {
            Ok(stats) => {
                tracing::info!(
                    %peer,
                    frames = stats.frames_received,
                    bytes = stats.bytes_received,
                    "session ended"
                );
            }
            // A bad sender ends its own session; the listener keeps serving.
            Err(err) => {
                tracing::warn!(%peer, error = %err, "session failed");
            }
        }
    }

    Ok(SUCCESS)
}

fn save_payload(dir: &Path, seq: u64, frame: &Frame) -> std::io::Result<PathBuf> {
    let ext = if payload_kind(frame.payload.as_ref()) == "jpeg" {
        "jpg"
    } else {
        "bin"
    };
    let path = dir.join(format!("frame-{seq:06}.{ext}"));
    std::fs::write(&path, frame.payload.as_ref())?;
    Ok(path)
}

fn install_ctrlc_handler(cancel: CancelToken) -> CliResult<()> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn save_payload_names_jpeg_files() {
        let dir = std::env::temp_dir().join(format!(
            "framecast-save-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let jpeg = Frame::new(Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0]));
        let path = save_payload(&dir, 1, &jpeg).unwrap();
        assert!(path.to_string_lossy().ends_with("frame-000001.jpg"));

        let blob = Frame::new(Bytes::from_static(&[0x00, 0x01]));
        let path = save_payload(&dir, 2, &blob).unwrap();
        assert!(path.to_string_lossy().ends_with("frame-000002.bin"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
