// ============================================================
// Layer 4 — Text Chunker
// ============================================================
// Splits extracted text into fixed-length, non-overlapping
// character chunks.
//
// Why chunk at all?
//   The QA model has a fixed maximum input length, and extracted
//   documents can be arbitrarily long. Bounding each chunk keeps
//   every inference call within the model's window.
//
// Why split at raw character offsets?
//   A boundary may fall mid-word, which can cut the answer span
//   across two chunks. That is a known accuracy limitation,
//   accepted in exchange for a trivially predictable bound on
//   input size. Do not "fix" this silently — the contract below
//   is load-bearing for the callers and the tests.
//
// Contract for split(text):
//   - chunks concatenated in order reproduce the input exactly
//   - every chunk except the last has exactly max_len chars
//   - the last chunk has between 0 and max_len chars
//   - the result is never empty: split("") == [""]
//
// Offsets are counted in chars, not bytes, so a boundary never
// lands inside a multi-byte UTF-8 code point.

pub const DEFAULT_MAX_CHUNK_LEN: usize = 3000;

pub struct Chunker {
    /// Maximum number of characters per chunk
    max_len: usize,
}

impl Chunker {
    /// Create a new Chunker.
    ///
    /// # Panics
    /// Panics if max_len is 0 — every chunk would be empty and
    /// splitting would never terminate.
    pub fn new(max_len: usize) -> Self {
        assert!(max_len > 0, "max_len must be greater than 0");
        Self { max_len }
    }

    /// Split text into chunks of at most `max_len` characters.
    ///
    /// Repeatedly peels off a max_len-char prefix while the remaining
    /// text is strictly longer than max_len, then emits the remainder
    /// as the final chunk. Text exactly max_len chars long therefore
    /// comes back as a single chunk, and only empty input produces an
    /// empty final chunk.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut rest   = text;

        loop {
            // The char at index max_len exists iff rest is strictly
            // longer than max_len chars; its byte offset is exactly
            // where the prefix ends.
            match rest.char_indices().nth(self.max_len) {
                Some((byte_at, _)) => {
                    let (head, tail) = rest.split_at(byte_at);
                    chunks.push(head.to_string());
                    rest = tail;
                }
                None => {
                    chunks.push(rest.to_string());
                    break;
                }
            }
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_LEN)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_text_splits_at_exact_offsets() {
        let c      = Chunker::new(3000);
        let text   = "A".repeat(3500);
        let chunks = c.split(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "A".repeat(3000));
        assert_eq!(chunks[1], "A".repeat(500));
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let c    = Chunker::new(7);
        let text = "the quick brown fox jumps over the lazy dog";
        assert_eq!(c.split(text).concat(), text);
    }

    #[test]
    fn test_all_but_last_chunk_are_full_length() {
        let c      = Chunker::new(10);
        let text   = "x".repeat(95);
        let chunks = c.split(&text);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 10);
        }
        assert!(chunks.last().unwrap().chars().count() <= 10);
    }

    #[test]
    fn test_empty_input_gives_one_empty_chunk() {
        let c = Chunker::new(3000);
        assert_eq!(c.split(""), vec![String::new()]);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_empty_chunk() {
        // 6000 chars at max_len 3000: the remainder after one peel is
        // exactly 3000 chars, which is not *longer* than the limit, so
        // it becomes the final chunk as-is.
        let c      = Chunker::new(3000);
        let chunks = c.split(&"B".repeat(6000));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].len(), 3000);
    }

    #[test]
    fn test_exact_length_is_a_single_chunk() {
        let c      = Chunker::new(5);
        let chunks = c.split("abcde");
        assert_eq!(chunks, vec!["abcde".to_string()]);
    }

    #[test]
    fn test_splits_on_char_boundaries_not_bytes() {
        // 'é' is 2 bytes; counting bytes would panic or shear a code point.
        let c      = Chunker::new(2);
        let chunks = c.split("ééééé");
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }

    #[test]
    fn test_resplitting_is_idempotent() {
        let c      = Chunker::new(4);
        let text   = "abcdefghijklmno";
        let first  = c.split(text);
        let second = c.split(&first.concat());
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic]
    fn test_zero_max_len_panics() {
        let _ = Chunker::new(0);
    }
}
