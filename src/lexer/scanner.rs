//! Pull-based character reader with a single slot of pushback.

/// Reads characters one at a time from any `char` iterator.
///
/// `unget` hands back the last character returned by `get`; at most one
/// character can be pushed back at a time. End of input is never pushed
/// back, so `get` keeps returning `None` once the source is drained.
pub struct Scanner<'a> {
    source: Box<dyn Iterator<Item = char> + 'a>,
    pushback: Option<char>,
    last: Option<char>,
    line: u32,
}

impl<'a> Scanner<'a> {
    pub fn new<I>(source: I) -> Self
    where
        I: Iterator<Item = char> + 'a,
    {
        Scanner {
            source: Box::new(source),
            pushback: None,
            last: None,
            line: 1,
        }
    }

    pub fn get(&mut self) -> Option<char> {
        let next = match self.pushback.take() {
            Some(c) => Some(c),
            None => self.source.next(),
        };

        if next == Some('\n') {
            self.line += 1;
        }

        self.last = next;
        next
    }

    /// Pushes the last character read back into the stream, returning it.
    /// Returns `None` when there is nothing to push back.
    pub fn unget(&mut self) -> Option<char> {
        let c = self.last.take()?;

        if c == '\n' {
            self.line -= 1;
        }

        self.pushback = Some(c);
        Some(c)
    }

    /// Looks at the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        let next = self.get();
        self.unget();
        next
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}
