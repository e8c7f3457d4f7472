use std::fs;
use std::time::Duration;

use framecast_codec::FrameConfig;
use framecast_stream::{connect_with_config, ConnectConfig, StreamId};

use crate::cmd::SendArgs;
use crate::exit::{stream_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::OutputFormat;

pub fn run(args: SendArgs, _format: OutputFormat) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let config = ConnectConfig {
        stream_id: parse_stream_id(args.id.as_deref())?,
        frame: FrameConfig {
            write_timeout: Some(timeout),
            ..FrameConfig::default()
        },
        ..ConnectConfig::default()
    };

    let mut sender = connect_with_config(&args.addr, &config)
        .map_err(|err| stream_error("connect failed", err))?;

    let payload = resolve_payload(&args)?;
    sender
        .send_frame(&payload)
        .map_err(|err| stream_error("send failed", err))?;

    tracing::info!(addr = %args.addr, size = payload.len(), "frame sent");

    Ok(SUCCESS)
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path).map_err(|err| {
            crate::exit::io_error(&format!("failed reading {}", path.display()), err)
        });
    }
    Ok(Vec::new())
}

pub(crate) fn parse_stream_id(input: Option<&str>) -> CliResult<Option<StreamId>> {
    match input {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|err| CliError::new(USAGE, format!("--id is not a valid stream id: {err}"))),
    }
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn parse_stream_id_accepts_canonical_uuid() {
        let id = parse_stream_id(Some("550e8400-e29b-41d4-a716-446655440000"))
            .unwrap()
            .unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn parse_stream_id_rejects_garbage() {
        let err = parse_stream_id(Some("nope")).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn parse_stream_id_absent_is_none() {
        assert!(parse_stream_id(None).unwrap().is_none());
    }
}
