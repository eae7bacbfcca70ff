//! Text chunking for converted documents.
//!
//! Splits extracted text into retrieval-sized chunks. Three strategies:
//! fixed-size windows (`token`), sentence-preserving packing (`sentence`)
//! and structure-aware recursive splitting (`recursive`). Sizes and
//! offsets are measured in characters, so multi-byte text never splits
//! mid-character.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, ValidationError};

/// Chunking strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Fixed-size character windows with configurable overlap.
    Token,
    /// Pack whole sentences up to the chunk size.
    Sentence,
    /// Split on structure (paragraphs, then lines, then words), merging
    /// adjacent pieces back up to the chunk size.
    Recursive,
}

impl ChunkStrategy {
    pub fn all() -> [ChunkStrategy; 3] {
        [
            ChunkStrategy::Token,
            ChunkStrategy::Sentence,
            ChunkStrategy::Recursive,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStrategy::Token => "token",
            ChunkStrategy::Sentence => "sentence",
            ChunkStrategy::Recursive => "recursive",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ChunkStrategy::Token => "Fixed-size chunks with configurable overlap",
            ChunkStrategy::Sentence => "Chunks that preserve sentence boundaries",
            ChunkStrategy::Recursive => "Structure-aware chunks for long documents",
        }
    }
}

impl std::str::FromStr for ChunkStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "token" => Ok(ChunkStrategy::Token),
            "sentence" => Ok(ChunkStrategy::Sentence),
            "recursive" => Ok(ChunkStrategy::Recursive),
            other => Err(format!("unsupported chunker: {other}")),
        }
    }
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chunking parameters, in characters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkParams {
    /// Maximum characters per chunk.
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks. Applies to the
    /// `token` strategy; `sentence` and `recursive` chunks are disjoint.
    pub chunk_overlap: usize,
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            chunk_size: 2048,
            chunk_overlap: 0,
        }
    }
}

impl ChunkParams {
    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ValidationError::InvalidChunkSize { requested: 0 }.into());
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ValidationError::ChunkOverlapTooLarge {
                overlap: self.chunk_overlap,
                size: self.chunk_size,
            }
            .into());
        }
        Ok(())
    }
}

/// One chunk of the input text. Offsets are character indexes into the
/// original text; `text` is the verbatim slice between them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
    pub start_index: usize,
    pub end_index: usize,
    pub char_count: usize,
}

/// Result of one chunking operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkingReport {
    pub strategy: ChunkStrategy,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub total_chunks: usize,
    /// Length of the input, in characters.
    pub original_length: usize,
    pub chunks: Vec<Chunk>,
}

/// Chunk `text` with the given strategy.
///
/// Raises only for bad parameters; any text, including empty input,
/// chunks successfully.
pub fn chunk_text(
    strategy: ChunkStrategy,
    params: ChunkParams,
    text: &str,
) -> Result<ChunkingReport> {
    params.validate()?;

    let splitter = Splitter::new(text);
    let ranges = if splitter.char_len() == 0 {
        Vec::new()
    } else {
        match strategy {
            ChunkStrategy::Token => splitter.windows(0, splitter.char_len(), &params),
            ChunkStrategy::Sentence => splitter.sentences(&params),
            ChunkStrategy::Recursive => splitter.recursive(&params),
        }
    };

    let chunks = ranges
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| Chunk {
            index,
            text: splitter.slice(start, end).to_string(),
            start_index: start,
            end_index: end,
            char_count: end - start,
        })
        .collect::<Vec<_>>();

    Ok(ChunkingReport {
        strategy,
        chunk_size: params.chunk_size,
        chunk_overlap: params.chunk_overlap,
        total_chunks: chunks.len(),
        original_length: splitter.char_len(),
        chunks,
    })
}

/// Char-indexed view over the input text. All ranges below are
/// `(start_char, end_char)` pairs.
struct Splitter<'a> {
    text: &'a str,
    /// Byte offset of each character, used to slice on char boundaries.
    char_starts: Vec<usize>,
}

const SENTENCE_DELIMITERS: [char; 4] = ['.', '!', '?', '\n'];

impl<'a> Splitter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            char_starts: text.char_indices().map(|(b, _)| b).collect(),
        }
    }

    fn char_len(&self) -> usize {
        self.char_starts.len()
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        let from = self.char_starts[start];
        let to = self
            .char_starts
            .get(end)
            .copied()
            .unwrap_or(self.text.len());
        &self.text[from..to]
    }

    /// Fixed-size windows over `[start, end)`, stepping by
    /// `chunk_size - chunk_overlap`.
    fn windows(&self, start: usize, end: usize, params: &ChunkParams) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut at = start;
        loop {
            let to = (at + params.chunk_size).min(end);
            ranges.push((at, to));
            if to == end {
                break;
            }
            at = to - params.chunk_overlap;
        }
        ranges
    }

    /// Sentence ranges covering the whole text. A sentence ends after a
    /// run of delimiter characters, so the ranges concatenate back to the
    /// original.
    fn sentence_ranges(&self) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut start = 0;
        let mut in_delimiter_run = false;
        for (i, c) in self.text.chars().enumerate() {
            let is_delimiter = SENTENCE_DELIMITERS.contains(&c);
            if in_delimiter_run && !is_delimiter {
                ranges.push((start, i));
                start = i;
            }
            in_delimiter_run = is_delimiter;
        }
        if start < self.char_len() {
            ranges.push((start, self.char_len()));
        }
        ranges
    }

    /// Pack whole sentences greedily up to the chunk size. A single
    /// sentence longer than the chunk size is hard-split into windows.
    fn sentences(&self, params: &ChunkParams) -> Vec<(usize, usize)> {
        let no_overlap = ChunkParams {
            chunk_overlap: 0,
            ..*params
        };
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for (start, end) in self.sentence_ranges() {
            if end - start > params.chunk_size {
                ranges.extend(self.windows(start, end, &no_overlap));
                continue;
            }
            match ranges.last_mut() {
                Some((packed_start, packed_end))
                    if *packed_end == start && end - *packed_start <= params.chunk_size =>
                {
                    *packed_end = end;
                }
                _ => ranges.push((start, end)),
            }
        }
        ranges
    }

    /// Split `[start, end)` on the separator hierarchy until every piece
    /// fits, then merge adjacent pieces back up to the chunk size.
    fn recursive(&self, params: &ChunkParams) -> Vec<(usize, usize)> {
        let pieces = self.split_structural(0, self.char_len(), &["\n\n", "\n", " "], params);

        let mut merged: Vec<(usize, usize)> = Vec::new();
        for (start, end) in pieces {
            match merged.last_mut() {
                Some(last) if end - last.0 <= params.chunk_size => last.1 = end,
                _ => merged.push((start, end)),
            }
        }
        merged
    }

    fn split_structural(
        &self,
        start: usize,
        end: usize,
        separators: &[&str],
        params: &ChunkParams,
    ) -> Vec<(usize, usize)> {
        if end - start <= params.chunk_size {
            return vec![(start, end)];
        }
        let Some((separator, rest)) = separators.split_first() else {
            // No structure left to split on.
            return self.windows(start, end, &ChunkParams {
                chunk_overlap: 0,
                ..*params
            });
        };

        let slice = self.slice(start, end);
        let separator_chars = separator.chars().count();
        let mut boundaries = Vec::new();
        let mut char_at = start;
        let mut prev_byte = 0;
        for (byte_idx, _) in slice.match_indices(separator) {
            char_at += slice[prev_byte..byte_idx].chars().count() + separator_chars;
            prev_byte = byte_idx + separator.len();
            // The separator stays attached to the piece before it.
            boundaries.push(char_at);
        }

        if boundaries.is_empty() {
            return self.split_structural(start, end, rest, params);
        }

        let mut pieces = Vec::new();
        let mut piece_start = start;
        for boundary in boundaries.into_iter().chain(std::iter::once(end)) {
            if boundary == piece_start {
                continue;
            }
            if boundary - piece_start <= params.chunk_size {
                pieces.push((piece_start, boundary));
            } else {
                pieces.extend(self.split_structural(piece_start, boundary, rest, params));
            }
            piece_start = boundary;
        }
        pieces
    }
}
