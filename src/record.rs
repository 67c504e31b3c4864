/**
a parsed read together with its decoded quality scores
**/

use fastq::{OwnedRecord, Record, RefRecord};
use std::io::Write;

use crate::error::{Result, TopqError};
use crate::quality::{average_quality, decode_phred, PhredEncoding};

/// One read as handed over by the FASTQ parser.
///
/// The raw record is kept untouched so it is written back byte for byte;
/// `phred` is `None` when the quality line is empty.
pub struct ReadRecord {
    record: OwnedRecord,
    phred: Option<Vec<u8>>,
}

impl ReadRecord {
    pub fn new(head: &[u8], seq: &[u8], qual: &[u8], encoding: PhredEncoding) -> Result<Self> {
        let record = OwnedRecord {
            head: head.to_vec(),
            seq: seq.to_vec(),
            sep: None,
            qual: qual.to_vec(),
        };
        Self::from_owned(record, encoding)
    }

    pub fn from_ref(record: &RefRecord, encoding: PhredEncoding) -> Result<Self> {
        Self::from_owned(RefRecord::to_owned_record(record), encoding)
    }

    fn from_owned(record: OwnedRecord, encoding: PhredEncoding) -> Result<Self> {
        let phred = if record.qual().is_empty() {
            None
        } else {
            let scores = decode_phred(record.qual(), encoding).map_err(|e| {
                TopqError::MalformedInput(format!(
                    "record '{}': {}",
                    String::from_utf8_lossy(head_id(record.head())),
                    e
                ))
            })?;
            Some(scores)
        };
        Ok(ReadRecord { record, phred })
    }

    /// Header up to the first whitespace.
    pub fn id(&self) -> String {
        String::from_utf8_lossy(head_id(self.record.head())).into_owned()
    }

    pub fn head(&self) -> &[u8] {
        self.record.head()
    }

    pub fn seq(&self) -> &[u8] {
        self.record.seq()
    }

    pub fn phred(&self) -> Option<&[u8]> {
        self.phred.as_deref()
    }

    pub fn has_quality(&self) -> bool {
        self.phred.is_some()
    }

    /// Mean Phred score, 0 for a read without quality data.
    pub fn average_quality(&self) -> f64 {
        self.phred.as_deref().map_or(0.0, average_quality)
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        self.record.write(writer)
    }
}

fn head_id(head: &[u8]) -> &[u8] {
    head.split(|b| b.is_ascii_whitespace()).next().unwrap_or(head)
}
