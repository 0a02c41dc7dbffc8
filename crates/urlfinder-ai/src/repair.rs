//! Syntactic repair of malformed JSON emitted by language models.
//!
//! The repair pass is a single left-to-right scan that rewrites the text into
//! something `serde_json` accepts. It only fixes syntax; it never adds values
//! that were not in the input, apart from `null` for a key left dangling at the
//! end of a truncated object.
//!
//! Handled defects:
//!
//! - prose or Markdown fences around the JSON value (everything before the first
//!   `{`/`[` is dropped, and the scan stops at the matching closer or at a closing
//!   fence, whichever comes first)
//! - missing commas between object entries or array items
//! - single-quoted strings
//! - bare (unquoted) object keys and bare string values
//! - unescaped double quotes and raw control characters inside strings
//! - invalid backslash escapes
//! - trailing commas before `}` / `]`
//! - Python literals `True`, `False`, `None`
//! - unterminated strings and unbalanced brackets

/// Repair `input` into parseable JSON text.
///
/// Returns `None` when the input contains no JSON object or array at all.
/// A `Some` result is not guaranteed to parse; the caller re-parses it.
pub fn repair_json(input: &str) -> Option<String> {
    let start = input.find(['{', '['])?;
    let chars: Vec<char> = input[start..].chars().collect();
    Some(Repairer::new(&chars).run())
}

struct Repairer<'a> {
    chars: &'a [char],
    pos: usize,
    out: String,
    /// Closers still owed, innermost last.
    stack: Vec<char>,
    /// Inside an object, at a position where a key is expected.
    expect_key: bool,
}

impl<'a> Repairer<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            pos: 0,
            out: String::with_capacity(chars.len() + 8),
            stack: Vec::new(),
            expect_key: false,
        }
    }

    fn run(mut self) -> String {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            match c {
                '{' => {
                    self.stack.push('}');
                    self.expect_key = true;
                    self.out.push(c);
                    self.pos += 1;
                }
                '[' => {
                    self.stack.push(']');
                    self.expect_key = false;
                    self.out.push(c);
                    self.pos += 1;
                }
                '}' | ']' => {
                    self.pos += 1;
                    if self.close(c) && self.stack.is_empty() {
                        // Anything after the top-level value is prose.
                        break;
                    }
                }
                '"' | '\'' => {
                    self.separate();
                    self.pos += 1;
                    self.string(c);
                }
                '`' if self.at_fence() => break,
                ',' => {
                    self.expect_key = self.in_object();
                    self.out.push(c);
                    self.pos += 1;
                }
                ':' => {
                    self.expect_key = false;
                    self.out.push(c);
                    self.pos += 1;
                }
                c if c.is_whitespace() => {
                    self.out.push(c);
                    self.pos += 1;
                }
                _ => {
                    self.separate();
                    self.bare_token();
                }
            }
        }

        self.settle_dangling();
        while let Some(closer) = self.stack.pop() {
            self.out.push(closer);
        }
        self.out
    }

    fn in_object(&self) -> bool {
        self.stack.last() == Some(&'}')
    }

    /// Emit `closer`, first closing any inner containers it skips over.
    /// Closers with no matching opener are dropped. Returns whether anything closed.
    fn close(&mut self, closer: char) -> bool {
        if !self.stack.contains(&closer) {
            return false;
        }
        self.settle_dangling();
        while let Some(open) = self.stack.pop() {
            self.out.push(open);
            if open == closer {
                break;
            }
        }
        self.expect_key = false;
        true
    }

    /// Drop a trailing comma; give a key left without a value an explicit `null`.
    fn settle_dangling(&mut self) {
        let trimmed = self.out.trim_end().len();
        self.out.truncate(trimmed);
        if self.out.ends_with(',') {
            self.out.pop();
        } else if self.out.ends_with(':') {
            self.out.push_str("null");
        }
    }

    fn peek_significant(&self, from: usize) -> Option<char> {
        self.chars[from..].iter().copied().find(|c| !c.is_whitespace())
    }

    /// Whether the whitespace run starting at `from` crosses a line break.
    fn line_break_follows(&self, from: usize) -> bool {
        self.chars[from..]
            .iter()
            .take_while(|c| c.is_whitespace())
            .any(|&c| c == '\n')
    }

    fn at_fence(&self) -> bool {
        self.chars[self.pos..].starts_with(&['`', '`', '`'])
    }

    /// Insert the comma a model left out when a new entry starts right after a
    /// complete value in the same container.
    fn separate(&mut self) {
        let after_value = if self.in_object() {
            !self.expect_key
        } else {
            self.stack.last() == Some(&']')
        };
        let value_end = matches!(
            self.out.trim_end().chars().next_back(),
            Some(c) if c == '"' || c == '}' || c == ']' || c.is_ascii_alphanumeric()
        );
        if after_value && value_end {
            self.out.push(',');
            self.expect_key = self.in_object();
        }
    }

    /// Copy a string opened with `quote`, normalising it to a double-quoted JSON string.
    fn string(&mut self, quote: char) {
        self.out.push('"');
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            self.pos += 1;
            match c {
                '\\' => self.escape(),
                c if c == quote => {
                    // A quote ends the string if JSON structure or a line break follows it.
                    match self.peek_significant(self.pos) {
                        None | Some(':' | ',' | '}' | ']') => {
                            self.out.push('"');
                            return;
                        }
                        Some(_) if self.line_break_follows(self.pos) => {
                            self.out.push('"');
                            return;
                        }
                        Some(_) if quote == '"' => self.out.push_str("\\\""),
                        Some(_) => self.out.push(c),
                    }
                }
                '"' => self.out.push_str("\\\""),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if (c as u32) < 0x20 => self.out.push_str(&format!("\\u{:04x}", c as u32)),
                c => self.out.push(c),
            }
        }
        // Unterminated at end of input.
        self.out.push('"');
    }

    fn escape(&mut self) {
        match self.chars.get(self.pos).copied() {
            Some('\'') => {
                self.out.push('\'');
                self.pos += 1;
            }
            Some(next @ ('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't')) => {
                self.out.push('\\');
                self.out.push(next);
                self.pos += 1;
            }
            Some('u') if self.is_unicode_escape() => {
                self.out.push('\\');
            }
            _ => self.out.push_str("\\\\"),
        }
    }

    fn is_unicode_escape(&self) -> bool {
        let digits = &self.chars[(self.pos + 1).min(self.chars.len())..];
        digits.len() >= 4 && digits[..4].iter().all(char::is_ascii_hexdigit)
    }

    /// An unquoted key, literal, number, or string value.
    fn bare_token(&mut self) {
        if self.in_object() && self.expect_key {
            let end = self.scan_until(|c| c == ':' || c == '}' || c == ',');
            let key: String = self.chars[self.pos..end].iter().collect();
            self.pos = end;
            push_quoted(&mut self.out, key.trim());
            return;
        }

        let end = self.scan_until(|c| matches!(c, ',' | '}' | ']' | '\n'));
        let raw: String = self.chars[self.pos..end].iter().collect();
        self.pos = end;
        let token = raw.trim_end();
        match token {
            "true" | "True" => self.out.push_str("true"),
            "false" | "False" => self.out.push_str("false"),
            "null" | "None" => self.out.push_str("null"),
            t if serde_json::from_str::<serde_json::Number>(t).is_ok() => self.out.push_str(t),
            t => push_quoted(&mut self.out, t),
        }
    }

    fn scan_until(&self, stop: impl Fn(char) -> bool) -> usize {
        self.chars[self.pos..]
            .iter()
            .position(|&c| stop(c))
            .map_or(self.chars.len(), |offset| self.pos + offset)
    }
}

fn push_quoted(out: &mut String, s: &str) {
    // serde_json's string serialisation is exact JSON escaping.
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => {
            out.push('"');
            out.push('"');
        }
    }
}
