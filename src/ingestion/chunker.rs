//! Text chunking with configurable size and overlap

/// Splits report text into overlapping character windows sized for
/// embedding.
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. The overlap is clamped below the chunk size
    /// so every window advances.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        }
    }

    /// Split text into chunks, trimming each window and skipping empty ones
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let step = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            let trimmed = window.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }
            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunker = TextChunker::new(400, 20);
        let chunks = chunker.split("quarterly results improved");

        assert_eq!(chunks, vec!["quarterly results improved".to_string()]);
    }

    #[test]
    fn test_windows_overlap() {
        let chunker = TextChunker::new(10, 4);
        let chunks = chunker.split("abcdefghijklmnop");

        assert_eq!(chunks[0], "abcdefghij");
        // Next window starts 6 characters in, repeating the last 4
        assert_eq!(chunks[1], "ghijklmnop");
    }

    #[test]
    fn test_whitespace_only_windows_are_skipped() {
        let chunker = TextChunker::new(5, 0);
        let chunks = chunker.split("abcde     fghij");

        assert_eq!(chunks, vec!["abcde".to_string(), "fghij".to_string()]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(400, 20);
        assert!(chunker.split("").is_empty());
    }
}
