use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: `{token}` is not a pixel value")]
    InvalidPixel { line: usize, token: String },
    #[error("line {line}: `{token}` is not a class label")]
    InvalidLabel { line: usize, token: String },
    #[error("sample {block} has no label row")]
    MissingLabel { block: usize },
    #[error("label {label} is outside 0..{classes}")]
    LabelOutOfRange { label: usize, classes: usize },
}

/// One labelled pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub grid: Vec<Vec<u8>>,
    pub label: usize,
}

/// Parses a digit corpus.
///
/// Format:
/// - A sample is a block of rows of whitespace-separated integers.
/// - Exactly one row per block has `row_width + 1` values; its first value
///   is the label and the remaining `row_width` are pixels.
/// - A blank line closes the block. The line right after a blank line is a
///   separator and is skipped.
/// - A final block with no trailing blank line is kept.
pub fn parse_corpus<R: BufRead>(reader: R, row_width: usize) -> Result<Vec<Sample>, CorpusError> {
    let mut samples = Vec::new();
    let mut grid: Vec<Vec<u8>> = Vec::new();
    let mut label = None;
    let mut skip_next = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;

        if skip_next {
            skip_next = false;
            continue;
        }
        if line.trim().is_empty() {
            close_block(&mut samples, &mut grid, &mut label)?;
            skip_next = true;
            continue;
        }

        let all: Vec<&str> = line.split_whitespace().collect();
        let mut tokens = all.as_slice();
        if tokens.len() == row_width + 1 {
            let token = tokens[0];
            let value = token.parse().map_err(|_| CorpusError::InvalidLabel {
                line: line_no,
                token: token.to_string(),
            })?;
            label = Some(value);
            tokens = &tokens[1..];
        }

        let row = tokens
            .iter()
            .map(|token| parse_pixel(token, line_no))
            .collect::<Result<Vec<u8>, _>>()?;
        grid.push(row);
    }
    close_block(&mut samples, &mut grid, &mut label)?;

    Ok(samples)
}

/// Opens and parses a corpus file.
pub fn load_corpus<P: AsRef<Path>>(path: P, row_width: usize) -> Result<Vec<Sample>, CorpusError> {
    let file = File::open(path.as_ref())?;
    let samples = parse_corpus(BufReader::new(file), row_width)?;
    info!("loaded {} samples from {}", samples.len(), path.as_ref().display());
    Ok(samples)
}

/// One-hot target vector of length `classes`.
pub fn one_hot(label: usize, classes: usize) -> Result<Vec<f64>, CorpusError> {
    if label >= classes {
        return Err(CorpusError::LabelOutOfRange { label, classes });
    }
    let mut target = vec![0.0; classes];
    target[label] = 1.0;
    Ok(target)
}

fn parse_pixel(token: &str, line: usize) -> Result<u8, CorpusError> {
    token.parse().map_err(|_| CorpusError::InvalidPixel { line, token: token.to_string() })
}

/// Blank lines between blocks produce empty blocks, which are dropped.
fn close_block(
    samples: &mut Vec<Sample>,
    grid: &mut Vec<Vec<u8>>,
    label: &mut Option<usize>,
) -> Result<(), CorpusError> {
    if grid.is_empty() {
        *label = None;
        return Ok(());
    }
    let label = label.take().ok_or(CorpusError::MissingLabel { block: samples.len() })?;
    samples.push(Sample { grid: std::mem::take(grid), label });
    Ok(())
}
