use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use nutrisave_core::Catalog;

use crate::errors::GenerationError;

const INDENT: &[u8] = b"    ";

/// Write the catalog as pretty JSON, replacing any existing file.
///
/// Non-ASCII characters are written as-is. Returns the number of bytes
/// written.
pub fn write_catalog_json(path: &Path, catalog: &Catalog) -> Result<u64, GenerationError> {
    write_json_pretty(path, catalog)
}

/// Read a catalog file written by [`write_catalog_json`].
pub fn read_catalog_json(path: &Path) -> Result<Catalog, GenerationError> {
    let reader = BufReader::new(File::open(path)?);
    let catalog = serde_json::from_reader(reader)?;
    Ok(catalog)
}

/// Serialize any value with four-space indentation into `path`.
pub fn write_json_pretty<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<u64, GenerationError> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    let mut writer = CountingWriter::new(BufWriter::new(file));
    write_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(writer.bytes_written())
}

/// Serialize with four-space indentation into any writer.
pub fn write_pretty<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
) -> Result<(), GenerationError> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
