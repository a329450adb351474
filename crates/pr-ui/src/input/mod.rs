//! Input handling

/// Longest index the gate accepts, in digits
const MAX_DIGITS: usize = 9;

/// Digit-only editor for the starting index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexInput {
    buffer: String,
}

impl IndexInput {
    /// Create an empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input pre-filled with a value
    pub fn with_value(value: usize) -> Self {
        Self {
            buffer: value.to_string(),
        }
    }

    /// Append a character; returns false if it was rejected
    pub fn push(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.buffer.len() >= MAX_DIGITS {
            return false;
        }
        if self.buffer == "0" {
            self.buffer.clear();
        }
        self.buffer.push(c);
        true
    }

    /// Remove the last character
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Clear the input
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Current text
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Parsed value, `None` while empty
    pub fn value(&self) -> Option<usize> {
        self.buffer.parse().ok()
    }
}
