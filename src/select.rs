/**
ranking of reads by mean quality
**/

use log::warn;
use std::fmt;

use crate::record::ReadRecord;

/// Tallies of one selection, logged at the end of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSummary {
    pub records_read: usize,
    pub missing_quality: usize,
    pub records_selected: usize,
    pub best_score: Option<f64>,
    pub worst_score: Option<f64>,
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Total number of reads processed: {}, {} of these had no quality scores, {} selected",
            self.records_read, self.missing_quality, self.records_selected
        )?;
        if let (Some(best), Some(worst)) = (self.best_score, self.worst_score) {
            write!(f, " (mean quality {:.2} to {:.2})", best, worst)?;
        }
        Ok(())
    }
}

/// Returns the `top_n` reads with the highest mean quality, best first.
///
/// Reads with equal scores keep their input order. A read without quality
/// data scores 0 and is reported through `warn!`.
pub fn select_top(records: Vec<ReadRecord>, top_n: usize) -> Vec<ReadRecord> {
    select_top_summarized(records, top_n).0
}

pub fn select_top_summarized(
    records: Vec<ReadRecord>,
    top_n: usize,
) -> (Vec<ReadRecord>, SelectionSummary) {
    let mut summary = SelectionSummary {
        records_read: records.len(),
        ..Default::default()
    };

    let mut scored: Vec<(f64, ReadRecord)> = records
        .into_iter()
        .map(|record| {
            if !record.has_quality() {
                warn!("No quality scores found for record {}", record.id());
                summary.missing_quality += 1;
            }
            (record.average_quality(), record)
        })
        .collect();

    // sort_by is stable; ties stay in input order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    // top_n == 0 leaves nothing
    scored.truncate(top_n);

    summary.records_selected = scored.len();
    summary.best_score = scored.first().map(|(score, _)| *score);
    summary.worst_score = scored.last().map(|(score, _)| *score);

    let selected = scored.into_iter().map(|(_, record)| record).collect();
    (selected, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::PhredEncoding;

    // one read whose every base has quality `q`
    fn read(id: &str, q: u8, len: usize) -> ReadRecord {
        let seq = vec![b'A'; len];
        let qual = vec![q + 33; len];
        ReadRecord::new(id.as_bytes(), &seq, &qual, PhredEncoding::Sanger).unwrap()
    }

    fn bare(id: &str) -> ReadRecord {
        ReadRecord::new(id.as_bytes(), b"", b"", PhredEncoding::Sanger).unwrap()
    }

    fn ids(records: &[ReadRecord]) -> Vec<String> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_top_two_of_three() {
        let records = vec![read("a", 30, 4), read("b", 10, 4), read("c", 20, 4)];
        let top = select_top(records, 2);
        assert_eq!(ids(&top), vec!["a", "c"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![read("A", 25, 3), read("B", 25, 7)];
        assert_eq!(ids(&select_top(records, 2)), vec!["A", "B"]);

        let records = vec![
            read("x1", 20, 2),
            read("hi", 40, 2),
            read("x2", 20, 5),
            read("x3", 20, 1),
        ];
        assert_eq!(ids(&select_top(records, 4)), vec!["hi", "x1", "x2", "x3"]);
    }

    #[test]
    fn test_top_n_larger_than_input() {
        let records = vec![read("a", 5, 2), read("b", 15, 2), read("c", 10, 2)];
        let top = select_top(records, 50);
        assert_eq!(ids(&top), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_top_n_zero() {
        let records = vec![read("a", 5, 2), read("b", 15, 2)];
        assert!(select_top(records, 0).is_empty());
        assert!(select_top(Vec::new(), 3).is_empty());
    }

    #[test]
    fn test_missing_quality_ranks_last() {
        let records = vec![bare("none"), read("low", 1, 3), read("high", 35, 3)];
        let (top, summary) = select_top_summarized(records, 3);
        assert_eq!(ids(&top), vec!["high", "low", "none"]);
        assert_eq!(summary.missing_quality, 1);
    }

    #[test]
    fn test_all_zero_keeps_input_order() {
        let records = vec![bare("n1"), read("z", 0, 4), bare("n2")];
        assert_eq!(ids(&select_top(records, 3)), vec!["n1", "z", "n2"]);
    }

    #[test]
    fn test_selected_never_worse_than_rejected() {
        let quals = [12u8, 40, 3, 27, 27, 9, 33, 18, 0, 40];
        let records: Vec<ReadRecord> = quals
            .iter()
            .enumerate()
            .map(|(i, &q)| read(&format!("r{}", i), q, 1 + i % 4))
            .collect();
        let top = select_top(records, 4);
        assert_eq!(top.len(), 4);
        let cutoff = top.last().unwrap().average_quality();
        let selected = ids(&top);
        for (i, &q) in quals.iter().enumerate() {
            if !selected.contains(&format!("r{}", i)) {
                assert!(q as f64 <= cutoff);
            }
        }
        assert_eq!(selected, vec!["r1", "r9", "r6", "r3"]);
    }

    #[test]
    fn test_output_length() {
        for n in 0..6 {
            let records = vec![read("a", 1, 1), read("b", 2, 1), read("c", 3, 1)];
            assert_eq!(select_top(records, n).len(), n.min(3));
        }
    }

    #[test]
    fn test_summary() {
        let records = vec![read("a", 30, 4), bare("b"), read("c", 20, 4)];
        let (_, summary) = select_top_summarized(records, 2);
        assert_eq!(
            summary,
            SelectionSummary {
                records_read: 3,
                missing_quality: 1,
                records_selected: 2,
                best_score: Some(30.0),
                worst_score: Some(20.0),
            }
        );
        let display = summary.to_string();
        assert!(display.contains("processed: 3"));
        assert!(display.contains("30.00 to 20.00"));
    }
}
