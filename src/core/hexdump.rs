//! Bounded hex dump of a file's leading bytes.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexOptions {
    pub row_width: usize,
    pub max_bytes: usize,
}

impl Default for HexOptions {
    fn default() -> Self {
        HexOptions {
            row_width: 16,
            max_bytes: 4096,
        }
    }
}

/// One printed line: `0x00000010  48 65 6c ...  Hel...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexRow {
    pub offset: usize,
    pub hex: String,
    pub ascii: String,
}

impl HexRow {
    pub fn offset_label(&self) -> String {
        format!("0x{:08x}", self.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDump {
    pub rows: Vec<HexRow>,
    pub total_size: u64,
    /// The file holds more bytes than were dumped.
    pub truncated: bool,
}

/// Reads at most `options.max_bytes` from `path` and formats them into rows.
pub fn hex_dump(path: &Path, options: HexOptions) -> io::Result<HexDump> {
    let file = File::open(path)?;
    let total_size = file.metadata()?.len();

    let mut data = Vec::with_capacity(options.max_bytes.min(total_size as usize));
    file.take(options.max_bytes as u64).read_to_end(&mut data)?;

    Ok(HexDump {
        rows: format_rows(&data, options.row_width),
        truncated: total_size > data.len() as u64,
        total_size,
    })
}

/// Formats `data` into rows of `row_width` bytes. The hex column is padded so
/// the ASCII column always lines up.
pub fn format_rows(data: &[u8], row_width: usize) -> Vec<HexRow> {
    let row_width = row_width.max(1);
    let hex_width = row_width * 3 - 1;

    data.chunks(row_width)
        .enumerate()
        .map(|(i, chunk)| {
            let hex = chunk
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ");
            let ascii = chunk
                .iter()
                .map(|&b| if (32..127).contains(&b) { b as char } else { '.' })
                .collect();
            HexRow {
                offset: i * row_width,
                hex: format!("{:<width$}", hex, width = hex_width),
                ascii,
            }
        })
        .collect()
}
