/**
reading and writing FASTQ files
**/

use fastq::Parser;
use flate2::read::MultiGzDecoder;
use flate2::{Compression, GzBuilder};
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{Result, TopqError};
use crate::quality::PhredEncoding;
use crate::record::ReadRecord;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn guess_compression(file: &str) -> bool {
    let path = Path::new(file);
    path.extension().map_or(false, |ext| ext == "gz")
}

fn input_error(err: io::Error) -> TopqError {
    if err.kind() == ErrorKind::InvalidData {
        TopqError::MalformedInput(err.to_string())
    } else {
        TopqError::Io(err)
    }
}

fn load_source(input: &str) -> io::Result<Vec<u8>> {
    let mut raw = Vec::new();
    // Treat "-" as stdin
    if input == "-" {
        io::stdin().lock().read_to_end(&mut raw)?;
    } else {
        File::open(input)?.read_to_end(&mut raw)?;
    }
    if raw.starts_with(&GZIP_MAGIC) {
        let mut text = Vec::new();
        MultiGzDecoder::new(&raw[..]).read_to_end(&mut text)?;
        return Ok(text);
    }
    Ok(raw)
}

/// Reads every record of `input` into memory; `-` reads stdin.
///
/// Gzip input is detected from its magic bytes. An empty source yields no
/// records and a missing newline after the last record is tolerated. The
/// source is fully consumed and closed before this returns.
pub fn read_records(input: &str, encoding: PhredEncoding) -> Result<Vec<ReadRecord>> {
    let mut data = load_source(input).map_err(input_error)?;
    if data.is_empty() {
        debug!("'{}' is empty", input);
        return Ok(Vec::new());
    }
    if data.last() != Some(&b'\n') {
        data.push(b'\n');
    }

    let mut records = Vec::new();
    let mut failure = None;
    Parser::new(&data[..])
        .each(|rec| match ReadRecord::from_ref(&rec, encoding) {
            Ok(record) => {
                records.push(record);
                true
            }
            Err(e) => {
                failure = Some(e);
                false
            }
        })
        .map_err(input_error)?;

    if let Some(err) = failure {
        return Err(err);
    }
    debug!("Parsed {} records from '{}'", records.len(), input);
    Ok(records)
}

fn write_all<W: Write>(records: &[ReadRecord], writer: &mut W) -> io::Result<()> {
    for record in records {
        record.write(writer)?;
    }
    Ok(())
}

// an existing symlink is followed so the rename replaces its target
fn destination(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Writes `records` in order to `output`; `-` writes stdout.
///
/// File output goes to a temporary file beside the destination and is
/// renamed over it once complete, so a failed run leaves no partial file.
/// A `.gz` extension selects gzip compression.
pub fn write_records(records: &[ReadRecord], output: &str) -> Result<()> {
    if output == "-" {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_all(records, &mut writer)?;
        writer.flush()?;
        return Ok(());
    }

    let path = destination(Path::new(output));
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    if guess_compression(output) {
        let inner_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(output);
        let mut gz = GzBuilder::new()
            .filename(inner_name)
            .write(BufWriter::new(tmp.as_file_mut()), Compression::default());
        write_all(records, &mut gz)?;
        gz.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_all(records, &mut writer)?;
        writer.flush()?;
    }
    // NamedTempFile is created 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))?;
    }
    tmp.persist(&path).map_err(|e| e.error)?;
    debug!("Wrote {} records to '{}'", records.len(), output);
    Ok(())
}
