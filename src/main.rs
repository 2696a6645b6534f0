mod scanner;
mod tracker;

use crate::scanner::{ScanError, Scanner};
use crate::tracker::{OrderTracker, TrackerError};
use displaydoc::Display;
use std::io::{self, BufWriter, Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
enum DriverError {
    #[error("I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed input: {0}")]
    Scan(#[from] ScanError),

    #[error("Invalid test case: {0}")]
    Tracker(#[from] TrackerError),
}

/// One answer line in the 1-based convention of the batch protocol.
#[derive(Clone, Copy, Debug, Display)]
enum Answer {
    /// {0} {1}
    Span(usize, usize),
    /// -1 -1
    Sorted,
}

impl From<Option<(usize, usize)>> for Answer {
    fn from(span: Option<(usize, usize)>) -> Self {
        match span {
            Some((lo, hi)) => Self::Span(lo + 1, hi + 1),
            None => Self::Sorted,
        }
    }
}

// Protocol indices are 1-based; reject 0 before subtraction wraps it around.
fn to_zero_based(index: usize, len: usize) -> Result<usize, TrackerError> {
    match index.checked_sub(1) {
        Some(zero_based) if zero_based < len => Ok(zero_based),
        _ => Err(TrackerError::IndexOutOfBounds { index, len }),
    }
}

/// Runs the batch protocol: any number of test cases, each an array followed by a stream of point
/// updates, answering the violation span after the build and after every update.
fn run(input: impl Read, output: impl Write) -> Result<(), DriverError> {
    let mut scan = Scanner::from_reader(input)?;
    let mut out = BufWriter::new(output);

    while let Some(len) = scan.try_next_usize()? {
        let values = (0..len)
            .map(|_| scan.next_i64())
            .collect::<Result<Vec<_>, _>>()?;
        let mut tracker = OrderTracker::new(&values)?;
        writeln!(out, "{}", Answer::from(tracker.violation_span()))?;

        let updates = scan.next_usize()?;
        for _ in 0..updates {
            let index = scan.next_usize()?;
            let value = scan.next_i64()?;
            tracker.update(to_zero_based(index, tracker.len())?, value)?;
            writeln!(out, "{}", Answer::from(tracker.violation_span()))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    if let Err(e) = run(io::stdin().lock(), io::stdout().lock()) {
        eprintln!("sortspan: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(input: &str) -> String {
        let mut out = Vec::new();
        run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn sorted_array_answers_sentinel() {
        assert_eq!(batch("3\n1 2 3\n0\n"), "-1 -1\n");
    }

    #[test]
    fn updates_are_answered_one_per_line() {
        // [1, 3, 2, 4] heals after the first update and breaks wide open after the second.
        assert_eq!(batch("4\n1 3 2 4\n2\n3 3\n4 0\n"), "2 3\n-1 -1\n1 4\n");
    }

    #[test]
    fn reversed_array_spans_everything() {
        assert_eq!(batch("5\n5 4 3 2 1\n0\n"), "1 5\n");
    }

    #[test]
    fn multiple_test_cases_rebuild_from_scratch() {
        assert_eq!(
            batch("3\n1 2 3\n0\n4\n1 3 2 4\n1\n4 0\n1\n9\n0\n"),
            "-1 -1\n2 3\n1 4\n-1 -1\n"
        );
    }

    #[test]
    fn out_of_range_update_is_an_error() {
        assert!(matches!(
            run("3\n1 2 3\n1\n0 5\n".as_bytes(), &mut Vec::new()),
            Err(DriverError::Tracker(TrackerError::IndexOutOfBounds { .. }))
        ));
        assert!(matches!(
            run("3\n1 2 3\n1\n4 5\n".as_bytes(), &mut Vec::new()),
            Err(DriverError::Tracker(TrackerError::IndexOutOfBounds { .. }))
        ));
    }

    #[test]
    fn truncated_input_is_an_error() {
        assert!(matches!(
            run("4\n1 2\n".as_bytes(), &mut Vec::new()),
            Err(DriverError::Scan(ScanError::UnexpectedEof))
        ));
    }
}
