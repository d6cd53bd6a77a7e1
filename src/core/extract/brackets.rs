//! Bracket matching for role lists.
//!
//! Lists are closed by their matching `]`, not by the first `]` that follows.
//! Brackets inside string literals are ignored.

/// Resumable scan state, so a list can be followed across lines.
#[derive(Debug, Clone, Default)]
pub struct BracketScan {
    depth: usize,
    quote: Option<char>,
    escaped: bool,
}

impl BracketScan {
    /// Feed `text` and return the byte offset of the `]` that closes the list,
    /// if it is in `text`. The first `[` fed opens the list.
    pub fn feed(&mut self, text: &str) -> Option<usize> {
        for (i, c) in text.char_indices() {
            if let Some(quote) = self.quote {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == quote {
                    self.quote = None;
                }
                continue;
            }
            match c {
                '\'' | '"' | '`' => self.quote = Some(c),
                '[' => self.depth += 1,
                ']' if self.depth > 0 => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Offset of the `]` matching the `[` at the start of `text`.
pub fn matching_close(text: &str) -> Option<usize> {
    BracketScan::default().feed(text)
}
