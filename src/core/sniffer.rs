use crate::utils::error::{PriceError, Result};
use std::collections::HashMap;

/// Delimiters tried, in tie-break order.
pub const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

pub const DEFAULT_SAMPLE_BYTES: usize = 1024;
pub const MIN_SAMPLE_BYTES: usize = 64;
pub const MAX_SAMPLE_BYTES: usize = 1_048_576;

/// Share of sample lines that must agree on the field count.
const MIN_CONSISTENCY: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    delimiter: char,
    per_line: usize,
    consistency: f64,
}

/// Infers the field delimiter of a delimited text sample.
///
/// Every candidate is counted per line outside double quotes. A candidate is
/// accepted when its most common per-line count is shared by 90% of the lines;
/// among accepted ones the most consistent, then the most frequent, then the
/// earliest in [`CANDIDATE_DELIMITERS`] wins.
#[derive(Debug, Clone)]
pub struct DialectSniffer {
    sample_bytes: usize,
}

impl DialectSniffer {
    pub fn new(sample_bytes: usize) -> Self {
        Self { sample_bytes }
    }

    pub fn sample_bytes(&self) -> usize {
        self.sample_bytes
    }

    /// Sniffs the leading `sample_bytes` of a file's contents.
    pub fn sniff_bytes(&self, file: &str, data: &[u8]) -> Result<char> {
        let truncated = data.len() > self.sample_bytes;
        let sample = &data[..data.len().min(self.sample_bytes)];
        let text = String::from_utf8_lossy(sample);
        self.sniff(file, &text, truncated)
    }

    /// `truncated` marks a sample cut out of a longer file; its last line is
    /// then ignored because it is probably incomplete.
    pub fn sniff(&self, file: &str, sample: &str, truncated: bool) -> Result<char> {
        let mut lines: Vec<&str> = sample.lines().filter(|l| !l.trim().is_empty()).collect();
        if truncated && lines.len() > 1 {
            lines.pop();
        }

        if lines.is_empty() {
            return Err(PriceError::DialectDetectionError {
                file: file.to_string(),
                reason: "sample contains no data".to_string(),
            });
        }

        let best = CANDIDATE_DELIMITERS
            .iter()
            .filter_map(|&delimiter| score(&lines, delimiter))
            .filter(|c| c.per_line > 0 && c.consistency >= MIN_CONSISTENCY)
            .fold(None::<Candidate>, |best, c| match best {
                Some(b)
                    if b.consistency > c.consistency
                        || (b.consistency == c.consistency && b.per_line >= c.per_line) =>
                {
                    Some(b)
                }
                _ => Some(c),
            });

        match best {
            Some(candidate) => {
                tracing::debug!(
                    "Sniffed delimiter {:?} for {} ({} per line, {:.0}% consistent)",
                    candidate.delimiter,
                    file,
                    candidate.per_line,
                    candidate.consistency * 100.0
                );
                Ok(candidate.delimiter)
            }
            None => Err(PriceError::DialectDetectionError {
                file: file.to_string(),
                reason: "no delimiter splits the sample consistently".to_string(),
            }),
        }
    }
}

impl Default for DialectSniffer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_BYTES)
    }
}

fn score(lines: &[&str], delimiter: char) -> Option<Candidate> {
    let counts: Vec<usize> = lines
        .iter()
        .map(|line| count_unquoted(line, delimiter))
        .collect();

    let mut frequency: HashMap<usize, usize> = HashMap::new();
    for &count in &counts {
        *frequency.entry(count).or_insert(0) += 1;
    }

    // highest frequency, larger count on ties
    let (per_line, hits) = frequency
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))?;

    Some(Candidate {
        delimiter,
        per_line,
        consistency: hits as f64 / counts.len() as f64,
    })
}

fn count_unquoted(line: &str, delimiter: char) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
