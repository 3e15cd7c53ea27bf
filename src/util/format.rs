//! Formatting and parsing of sizes and offsets.

use crate::error::{Error, Result};

/// Format byte count as human-readable string.
///
/// # Examples
/// ```
/// use rangescope::util::format::format_bytes;
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Parse an offset written in decimal or with a `0x` prefix.
///
/// Underscores are accepted as digit separators.
pub fn parse_offset(text: &str) -> Result<u64> {
    let trimmed = text.trim().replace('_', "");
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    };
    parsed.map_err(|source| Error::InvalidOffset {
        value: text.to_string(),
        source,
    })
}

/// Format a hex dump of `data`, addressing lines from `start_offset`.
///
/// Format: `XXXXXXXX  XX XX XX XX XX XX XX XX  XX XX XX XX XX XX XX XX  |................|`
pub fn hex_dump(data: &[u8], start_offset: u64) -> String {
    use std::fmt::Write;

    const BYTES_PER_LINE: usize = 16;

    let mut output = String::with_capacity(data.len() * 4);

    for (line, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        let _ = write!(
            output,
            "{:08X}  ",
            start_offset + (line * BYTES_PER_LINE) as u64
        );

        for (idx, &byte) in chunk.iter().enumerate() {
            let _ = write!(output, "{byte:02X} ");
            if idx == 7 {
                output.push(' ');
            }
        }

        // Pad short last line
        let remaining = BYTES_PER_LINE - chunk.len();
        if remaining > 0 {
            output.push_str(&"   ".repeat(remaining));
            if chunk.len() <= 8 {
                output.push(' ');
            }
        }

        output.push_str(" |");
        for &byte in chunk {
            if (32..=126).contains(&byte) {
                output.push(byte as char);
            } else {
                output.push('.');
            }
        }
        output.push_str("|\n");
    }

    output
}
