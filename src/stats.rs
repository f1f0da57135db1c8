// Statistics shown next to a generated post

use std::time::Duration;

/// Average reading speed used for the read-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Whitespace-delimited, non-empty tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Every character, whitespace included.
pub fn count_characters(text: &str) -> usize {
    text.chars().count()
}

/// Minutes to read `words`, rounded up.
pub const fn read_time_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub words: usize,
    pub characters: usize,
    pub read_time: usize,
    pub generation_secs: f64,
}

impl Stats {
    pub fn compute(content: &str, elapsed: Duration) -> Self {
        let words = count_words(content);
        Self {
            words,
            characters: count_characters(content),
            read_time: read_time_minutes(words),
            generation_secs: elapsed.as_secs_f64(),
        }
    }

    pub fn generation_time_display(&self) -> String {
        format!("{:.1}", self.generation_secs)
    }
}
