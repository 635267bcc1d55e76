//! Format identification from magic bytes and file extensions.
//!
//! Sniffing only looks at a 4-byte prefix. [`sniff_reader`] peeks that
//! prefix and restores the stream position, so the caller can read the
//! whole stream from the start afterwards.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::types::ImageError;

/// Number of bytes inspected when sniffing.
pub const SNIFF_LEN: usize = 4;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Bmp,
    Jpeg,
    Png,
}

impl Format {
    /// All supported formats, in sniffing order.
    pub const ALL: [Format; 3] = [Format::Bmp, Format::Jpeg, Format::Png];

    /// Leading signature bytes.
    pub fn magic(self) -> &'static [u8] {
        match self {
            Format::Bmp => b"BM",
            Format::Jpeg => &[0xFF, 0xD8, 0xFF],
            Format::Png => &[0x89, b'P', b'N', b'G'],
        }
    }

    /// Lowercase file extensions mapping to this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Bmp => &["bmp"],
            Format::Jpeg => &["jpg", "jpeg"],
            Format::Png => &["png"],
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Bmp => "image/bmp",
            Format::Jpeg => "image/jpeg",
            Format::Png => "image/png",
        }
    }

    /// Classify a byte prefix.
    ///
    /// Returns `None` when fewer than [`SNIFF_LEN`] bytes are given or no
    /// signature matches.
    pub fn sniff(prefix: &[u8]) -> Option<Format> {
        if prefix.len() < SNIFF_LEN {
            return None;
        }
        let found = Format::ALL
            .into_iter()
            .find(|format| prefix.starts_with(format.magic()));
        trace!("sniffed {:02X?} as {:?}", &prefix[..SNIFF_LEN], found);
        found
    }

    /// Look up a format by file extension, ignoring case and a leading dot.
    pub fn from_extension(ext: &str) -> Option<Format> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }

    /// Infer the format from the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            Format::Bmp => image::ImageFormat::Bmp,
            Format::Jpeg => image::ImageFormat::Jpeg,
            Format::Png => image::ImageFormat::Png,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extensions()[0])
    }
}

impl FromStr for Format {
    type Err = ImageError;

    /// Parse a format name such as `"png"` or `"JPEG"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s).ok_or_else(|| ImageError::UnsupportedOutputFormat(s.to_string()))
    }
}

/// Peek the first bytes of `source` and classify them without consuming them.
///
/// The stream position is restored on every path, including read errors.
pub fn sniff_reader<R: Read + Seek>(source: &mut R) -> io::Result<Option<Format>> {
    let start = source.stream_position()?;

    let mut prefix = [0u8; SNIFF_LEN];
    let mut filled = 0;
    let read_result = loop {
        match source.read(&mut prefix[filled..]) {
            Ok(0) => break Ok(()),
            Ok(n) => {
                filled += n;
                if filled == SNIFF_LEN {
                    break Ok(());
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => break Err(e),
        }
    };

    source.seek(SeekFrom::Start(start))?;
    read_result?;

    Ok(Format::sniff(&prefix[..filled]))
}
