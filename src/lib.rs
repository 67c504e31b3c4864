//! Rank FASTQ reads by mean Phred quality and keep the best `N`.
//!
//! The selection itself ([`select::select_top`]) is a pure function of the
//! records and `N`; reading and writing live in [`fastq_io`] and the command
//! line entry point in [`topreads`].

pub mod error;
pub mod fastq_io;
pub mod quality;
pub mod record;
pub mod select;
pub mod topreads;

pub use error::{Result, TopqError};
pub use quality::{average_quality, PhredEncoding};
pub use record::ReadRecord;
pub use select::{select_top, select_top_summarized, SelectionSummary};
pub use topreads::Params;
