//! Token reader for whitespace-delimited record lines.
//!
//! Tokens are separated by whitespace. A token that starts with `"` runs to
//! the matching unescaped `"` and may contain whitespace; inside it `\"`
//! stands for a quote and `\\` for a backslash.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("Unterminated quoted string starting at byte {0}")]
    UnterminatedQuote(usize),
}

/// Wrap `value` in double quotes, escaping embedded quotes and backslashes
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Iterator over the tokens of one line
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    /// Unconsumed input with surrounding whitespace removed
    pub fn remainder(&self) -> &'a str {
        self.line[self.pos..].trim()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remainder().is_empty()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.line[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn read_quoted(&mut self) -> Result<String, TextError> {
        let start = self.pos;
        let mut value = String::new();
        let mut chars = self.line[start + 1..].char_indices();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                '"' => {
                    self.pos = start + 1 + offset + 1;
                    return Ok(value);
                }
                other => value.push(other),
            }
        }

        self.pos = self.line.len();
        Err(TextError::UnterminatedQuote(start))
    }

    fn read_bare(&mut self) -> String {
        let rest = &self.line[self.pos..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<String, TextError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        if self.pos >= self.line.len() {
            return None;
        }
        if self.line[self.pos..].starts_with('"') {
            Some(self.read_quoted())
        } else {
            Some(Ok(self.read_bare()))
        }
    }
}
