//! Paragraph-boundary chunker used when building a corpus index.
//!
//! Service manuals are mostly short paragraphs and torque tables, so chunks
//! are assembled from whole paragraphs (`\n\n`-separated) until the next one
//! would exceed the size limit. A paragraph that is larger than the limit on
//! its own is hard-split at the last newline or space before the limit.
//!
//! Sizes are measured in approximate tokens at 4 characters per token.
//!
//! ```rust
//! use mechanic_ai_core::chunk::chunk_text;
//!
//! let chunks = chunk_text("manual/brakes.txt", "Caliper bolts\n\nGuide pins", 700);
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].source, "manual/brakes.txt");
//! ```

use sha2::{Digest, Sha256};

use crate::models::Chunk;

const CHARS_PER_TOKEN: usize = 4;

/// Split `text` into chunks of at most `max_tokens` (approximate).
///
/// Indices are contiguous from 0. Chunk IDs are derived from `source` and
/// the index, so rebuilding an index from unchanged files yields the same
/// IDs. Text with no content produces no chunks.
pub fn chunk_text(source: &str, text: &str, max_tokens: usize) -> Vec<Chunk> {
    let max_chars = max_tokens.max(1) * CHARS_PER_TOKEN;
    let mut pieces: Vec<String> = Vec::new();
    let mut buf = String::new();

    for para in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let joined_len = if buf.is_empty() {
            para.len()
        } else {
            buf.len() + 2 + para.len()
        };

        if joined_len > max_chars && !buf.is_empty() {
            pieces.push(std::mem::take(&mut buf));
        }

        if para.len() > max_chars {
            pieces.extend(hard_split(para, max_chars));
            continue;
        }

        if !buf.is_empty() {
            buf.push_str("\n\n");
        }
        buf.push_str(para);
    }

    if !buf.is_empty() {
        pieces.push(buf);
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| make_chunk(source, i as i64, piece))
        .collect()
}

/// Split one oversized paragraph, preferring newline then space boundaries.
fn hard_split(para: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = para;

    while !rest.is_empty() {
        let mut cut = floor_char_boundary(rest, max_chars);
        if cut < rest.len() {
            if let Some(pos) = rest[..cut].rfind('\n').or_else(|| rest[..cut].rfind(' ')) {
                if pos > 0 {
                    cut = pos + 1;
                }
            }
        }
        if cut == 0 {
            // A single character wider than the limit.
            cut = rest
                .char_indices()
                .nth(1)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
        }

        let piece = rest[..cut].trim();
        if !piece.is_empty() {
            out.push(piece.to_string());
        }
        rest = &rest[cut..];
    }

    out
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn make_chunk(source: &str, index: i64, text: String) -> Chunk {
    let id = format!(
        "{:x}",
        Sha256::digest(format!("{}#{}", source, index).as_bytes())
    );

    Chunk {
        id: id[..32].to_string(),
        source: source.to_string(),
        chunk_index: index,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = chunk_text("a.txt", "Wheel nut torque: 140 Nm", 700);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].text, "Wheel nut torque: 140 Nm");
    }

    #[test]
    fn test_blank_text_has_no_chunks() {
        assert!(chunk_text("a.txt", "", 700).is_empty());
        assert!(chunk_text("a.txt", "\n\n  \n\n", 700).is_empty());
    }

    #[test]
    fn test_paragraphs_merge_under_limit() {
        let text = "Front suspension.\n\nRear suspension.\n\nSteering.";
        let chunks = chunk_text("a.txt", text, 700);
        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0].text,
            "Front suspension.\n\nRear suspension.\n\nSteering."
        );
    }

    #[test]
    fn test_paragraphs_split_over_limit() {
        let text = "This is paragraph one.\n\nThis is paragraph two.\n\nThis is paragraph three.";
        let chunks = chunk_text("a.txt", text, 5);
        assert!(chunks.len() > 1);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.chunk_index, i as i64);
            assert!(c.text.len() <= 20, "chunk too long: {:?}", c.text);
        }
    }

    #[test]
    fn test_oversized_paragraph_hard_split_on_spaces() {
        let text = "aaaa bbbb cccc dddd eeee";
        let chunks = chunk_text("a.txt", text, 2);
        let joined: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(joined, vec!["aaaa", "bbbb", "cccc", "dddd", "eeee"]);
    }

    #[test]
    fn test_multibyte_utf8_chars() {
        let text = "┌──────────────────┐\n│ Hello world      │\n└──────────────────┘";
        let chunks = chunk_text("a.txt", text, 3);
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| !c.text.is_empty()));
    }

    #[test]
    fn test_ids_stable_per_source_and_index() {
        let text = "Alpha\n\nBeta\n\nGamma\n\nDelta";
        let c1 = chunk_text("a.txt", text, 2);
        let c2 = chunk_text("a.txt", text, 2);
        let other = chunk_text("b.txt", text, 2);
        assert_eq!(c1, c2);
        assert_ne!(c1[0].id, other[0].id);
        assert_eq!(c1[0].text, other[0].text);
        assert_eq!(c1[0].id.len(), 32);
    }
}
