//! Prints the header of a framed file written by `serial-tour encode`.

use std::fs;

use serial_tour::codec::{Reader, decompress};
use serial_tour::limits::FLAG_VARINT;
use serial_tour::{CodecOptions, Format, format_fingerprint};
use serial_tour::roundtrip::fingerprint;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample.sertz".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());
    println!("Fingerprint: {}", format_fingerprint(&fingerprint(&data)));

    let frame = match Format::detect(&data) {
        Some(Format::Compressed) => {
            let frame = decompress(&data, &CodecOptions::default()).expect("Failed to decompress");
            println!(
                "Compressed: {} -> {} bytes ({:.1}%)",
                data.len(),
                frame.len(),
                data.len() as f64 * 100.0 / frame.len() as f64
            );
            frame
        }
        Some(_) => data,
        None => {
            println!("Not a framed file (bare binary or JSON carry no header)");
            return;
        }
    };

    let mut reader = Reader::new(&frame);
    let magic = reader.read_bytes(4, "magic").expect("Failed to read magic");
    let version = reader.read_byte("version").expect("Failed to read version");
    let flags = reader.read_byte("flags").expect("Failed to read flags");

    println!("\n=== Frame ===");
    println!("Magic: {}", String::from_utf8_lossy(magic));
    println!("Version: {}", version);
    println!(
        "Integers: {}",
        if flags & FLAG_VARINT != 0 { "varint" } else { "fixed" }
    );
    println!("Payload: {} bytes", reader.remaining().len());

    let preview: Vec<String> = reader
        .remaining()
        .iter()
        .take(32)
        .map(|b| format!("{:02x}", b))
        .collect();
    println!("  {}", preview.join(" "));
}
