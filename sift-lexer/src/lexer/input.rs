/// Input of the tokenizer together with the offset of the first byte not yet
/// turned into a token.
#[derive(Debug, Clone, Default)]
pub(super) struct Input {
    source: String,
    offset: usize,
}

/// Slice of the input taken by [`Input::consume`].
pub(super) struct Consumed {
    pub(super) lexeme: String,
    pub(super) pos: (usize, usize),
}

impl Input {
    pub(super) fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            offset: 0,
        }
    }

    pub(super) fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the part of the input that is yet to be consumed.
    pub(super) fn rest(&self) -> &str {
        &self.source[self.offset..]
    }

    pub(super) fn is_exhausted(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Takes the next `len` bytes off the input. The end position points one
    /// byte beyond the end of the lexeme.
    pub(super) fn consume(&mut self, len: usize) -> Consumed {
        let start = self.offset;
        self.offset += len;

        Consumed {
            lexeme: self.source[start..self.offset].to_string(),
            pos: (start, self.offset),
        }
    }
}
