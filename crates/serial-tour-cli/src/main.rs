//! Command line tour of the sample values in every format.
//!
//! Usage:
//!
//! ```bash
//! serial-tour show --sample line
//! serial-tour compare
//! serial-tour verify --format compressed
//! serial-tour encode --sample point --format framed --out point.sert
//! serial-tour decode --sample point point.sert
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use serial_tour::codec::{encode_binary, to_json_value};
use serial_tour::limits::{DEFAULT_COMPRESSION_LEVEL, MAX_PAYLOAD_SIZE};
use serial_tour::{
    CodecOptions, Format, IntEncoding, Sample, SampleKind, catalog, format_fingerprint,
    verify_catalog,
};

#[derive(Parser)]
#[command(version, about = "Binary and JSON serialization round-trips")]
struct Cli {
    /// Use varint integers in binary payloads.
    #[arg(long, global = true)]
    varint: bool,

    /// zstd level for the compressed format.
    #[arg(long, global = true, default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    level: i32,

    /// Largest payload accepted, in bytes.
    #[arg(long, global = true, default_value_t = MAX_PAYLOAD_SIZE)]
    max_size: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print samples with their binary bytes and JSON text.
    Show {
        #[arg(long)]
        sample: Option<SampleKind>,
    },
    /// Print a table of encoded sizes.
    Compare,
    /// Round-trip every sample and report failures.
    Verify {
        /// Only check this format.
        #[arg(long)]
        format: Option<Format>,
    },
    /// Encode one sample to a file or stdout.
    Encode {
        #[arg(long)]
        sample: SampleKind,
        #[arg(long, default_value_t = Format::Binary)]
        format: Format,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode a file as one sample's type.
    Decode {
        #[arg(long)]
        sample: SampleKind,
        /// Defaults to the framed format detected from the file, else binary.
        #[arg(long)]
        format: Option<Format>,
        path: PathBuf,
    },
}

impl Cli {
    fn options(&self) -> CodecOptions {
        let int_encoding = if self.varint {
            IntEncoding::Varint
        } else {
            IntEncoding::Fixed
        };
        CodecOptions::new()
            .int_encoding(int_encoding)
            .compression_level(self.level)
            .max_size(self.max_size)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_tracing();

    let options = cli.options();
    tracing::debug!(?options, "codec options");

    match cli.command {
        Command::Show { sample } => show(sample, &options)?,
        Command::Compare => compare(&options)?,
        Command::Verify { format } => {
            if !verify(format, &options) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Encode {
            sample,
            format,
            out,
        } => encode_sample(sample, format, out, &options)?,
        Command::Decode {
            sample,
            format,
            path,
        } => decode_sample(sample, format, &path, &options)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn setup_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("SERIAL_TOUR_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// =============================================================================
// COMMANDS
// =============================================================================

fn show(only: Option<SampleKind>, options: &CodecOptions) -> Result<()> {
    let samples: Vec<Sample> = match only {
        Some(kind) => vec![kind.sample()],
        None => catalog(),
    };

    for sample in &samples {
        let kind = sample.kind();
        println!("=== {} ===", kind);
        println!("value:  {:?}", sample);

        let binary = sample.encode(Format::Binary, options)?;
        println!("binary: {:?} ({} bytes)", binary, binary.len());

        let json = sample.encode(Format::Json, options)?;
        println!("json:   {}", String::from_utf8_lossy(&json));

        let decoded = Sample::decode(kind, &binary, Format::Binary, options)?;
        println!("back:   {:?}", decoded);
        println!();
    }

    // The wrapper enum is serializable too, which tags each value with its kind.
    let tagged = to_json_value(&samples)?;
    println!("=== tagged ===");
    println!("{}", serde_json::to_string_pretty(&tagged)?);
    println!(
        "binary of tagged catalog: {} bytes",
        encode_binary(&samples, options)?.len()
    );

    Ok(())
}

fn compare(options: &CodecOptions) -> Result<()> {
    print!("{:<10}", "sample");
    for format in Format::ALL {
        print!(" {:>12}", format.name());
    }
    println!();

    let mut totals = vec![0usize; Format::ALL.len()];
    for sample in catalog() {
        print!("{:<10}", sample.kind().name());
        for (i, format) in Format::ALL.into_iter().enumerate() {
            let len = sample.encode(format, options)?.len();
            totals[i] += len;
            print!(" {:>12}", format_size(len));
        }
        println!();
    }

    print!("{:<10}", "total");
    for total in totals {
        print!(" {:>12}", format_size(total));
    }
    println!();

    Ok(())
}

fn verify(only: Option<Format>, options: &CodecOptions) -> bool {
    let formats: Vec<Format> = match only {
        Some(format) => vec![format],
        None => Format::ALL.to_vec(),
    };

    let mut failures = 0;
    for format in formats {
        for entry in verify_catalog(format, options) {
            match entry.result {
                Ok(report) => println!(
                    "ok    {:<8} {:<12} {:>5} B  {}",
                    entry.kind.name(),
                    format.name(),
                    report.encoded_len,
                    format_fingerprint(&report.fingerprint)
                ),
                Err(e) => {
                    failures += 1;
                    println!("FAIL  {:<8} {:<12} {}", entry.kind.name(), format.name(), e);
                }
            }
        }
    }

    if failures > 0 {
        tracing::error!(failures, "round-trip verification failed");
        false
    } else {
        true
    }
}

fn encode_sample(
    kind: SampleKind,
    format: Format,
    out: Option<PathBuf>,
    options: &CodecOptions,
) -> Result<()> {
    let bytes = kind
        .sample()
        .encode(format, options)
        .with_context(|| format!("Failed to encode {} as {}", kind, format))?;

    match out {
        Some(path) => {
            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), len = bytes.len(), "wrote sample");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            if format.is_text() {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }

    Ok(())
}

fn decode_sample(
    kind: SampleKind,
    format: Option<Format>,
    path: &Path,
    options: &CodecOptions,
) -> Result<()> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let format = format
        .or_else(|| Format::detect(&bytes))
        .unwrap_or(Format::Binary);
    tracing::info!(%format, len = bytes.len(), "decoding file");

    let sample = Sample::decode(kind, &bytes, format, options)
        .with_context(|| format!("Failed to decode {} as {} {}", path.display(), format, kind))?;

    println!("{:?}", sample);
    if sample == kind.sample() {
        println!("matches the {} sample", kind);
    }

    Ok(())
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "serial-tour",
            "--varint",
            "encode",
            "--sample",
            "line",
            "--format",
            "compressed",
        ])
        .unwrap();
        assert!(cli.varint);
        assert_eq!(cli.options().int_encoding, IntEncoding::Varint);
        match cli.command {
            Command::Encode { sample, format, out } => {
                assert_eq!(sample, SampleKind::Line);
                assert_eq!(format, Format::Compressed);
                assert!(out.is_none());
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_sample() {
        assert!(Cli::try_parse_from(["serial-tour", "show", "--sample", "polygon"]).is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["serial-tour", "compare"]).unwrap();
        assert_eq!(cli.options(), CodecOptions::default());
    }

    #[test]
    fn test_encode_then_decode_file() {
        let path = std::env::temp_dir().join(format!("serial-tour-{}.sertz", std::process::id()));
        let options = CodecOptions::default();
        encode_sample(SampleKind::Line, Format::Compressed, Some(path.clone()), &options).unwrap();
        decode_sample(SampleKind::Line, None, &path, &options).unwrap();
        assert!(decode_sample(SampleKind::Integer, Some(Format::Json), &path, &options).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_verify_all_formats() {
        assert!(verify(None, &CodecOptions::default()));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(1_500), "1.5 KB");
        assert_eq!(format_size(2_000_000), "2.0 MB");
    }
}
