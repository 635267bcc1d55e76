//! BMP header inspection.
//!
//! The `image` crate expands every paletted BMP to RGB. A palette whose
//! entries are all gray carries a single channel of information, so the
//! decoder collapses such images back to one component to keep grayscale
//! BMPs grayscale across a decode/encode round-trip.

const FILE_HEADER_LEN: usize = 14;
const CORE_HEADER_LEN: u32 = 12;
const INFO_HEADER_LEN: u32 = 40;

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let b = bytes.get(at..at + 2)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Palette location inside a BMP file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaletteInfo {
    offset: usize,
    entry_size: usize,
    count: usize,
}

fn palette_info(bytes: &[u8]) -> Option<PaletteInfo> {
    if !bytes.starts_with(b"BM") {
        return None;
    }
    let header_size = read_u32(bytes, FILE_HEADER_LEN)?;

    let (bpp, colors_used, entry_size) = match header_size {
        CORE_HEADER_LEN => (read_u16(bytes, FILE_HEADER_LEN + 10)?, 0, 3),
        size if size >= INFO_HEADER_LEN => (
            read_u16(bytes, FILE_HEADER_LEN + 14)?,
            read_u32(bytes, FILE_HEADER_LEN + 32)?,
            4,
        ),
        _ => return None,
    };

    if !matches!(bpp, 1 | 4 | 8) {
        return None;
    }

    let max_entries = 1usize << bpp;
    let count = match colors_used {
        0 => max_entries,
        n => (n as usize).min(max_entries),
    };

    Some(PaletteInfo {
        offset: FILE_HEADER_LEN + header_size as usize,
        entry_size,
        count,
    })
}

/// Returns true for indexed BMPs whose palette only contains gray entries.
///
/// Non-indexed files, unreadable headers and truncated palettes all return
/// false and decode as color.
pub(crate) fn has_grayscale_palette(bytes: &[u8]) -> bool {
    let Some(info) = palette_info(bytes) else {
        return false;
    };
    let Some(palette) = bytes.get(info.offset..info.offset + info.count * info.entry_size) else {
        return false;
    };

    // Entries are stored blue, green, red (+ reserved)
    palette
        .chunks_exact(info.entry_size)
        .all(|entry| entry[0] == entry[1] && entry[1] == entry[2])
}
