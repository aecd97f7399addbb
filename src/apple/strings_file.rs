//! Minimal parser for Apple `.strings` localization tables.
//!
//! The format is a sequence of `"key" = "value";` pairs with `//` and
//! `/* */` comments:
//!
//! ```text
//! /* Greeting shown on launch */
//! "key A" = "Key A";
//! "Key format" = "Prova %.2f %@";
//! ```
//!
//! Parsing recovers per entry: a malformed pair is recorded with its line
//! number and the scanner resynchronizes at the next `;`, so one broken
//! line never discards the rest of the table.

/// One unparseable entry, with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    pub line: usize,
    pub reason: String,
}

/// Result of parsing one `.strings` file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedStrings {
    /// Key/value pairs in file order. Duplicate keys are kept; callers
    /// deciding precedence see every occurrence.
    pub entries: Vec<(String, String)>,
    pub malformed: Vec<Malformed>,
}

/// Parse `.strings` file content.
pub fn parse(content: &str) -> ParsedStrings {
    let mut result = ParsedStrings::default();
    let mut scanner = Scanner::new(content);

    loop {
        scanner.skip_trivia();
        if scanner.at_end() {
            break;
        }

        let line = scanner.line;
        match scanner.parse_pair() {
            Ok(pair) => result.entries.push(pair),
            Err(reason) => {
                result.malformed.push(Malformed { line, reason });
                scanner.resync();
            }
        }
    }

    result
}

struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    /// Skip whitespace and both comment forms.
    fn skip_trivia(&mut self) {
        loop {
            while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
                self.bump();
            }
            if self.chars.peek() != Some(&'/') {
                return;
            }
            // Look ahead one character without a second peekable.
            let mut probe = self.chars.clone();
            probe.next();
            match probe.peek() {
                Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('*') => {
                    self.bump();
                    self.bump();
                    let mut prev = '\0';
                    while let Some(c) = self.bump() {
                        if prev == '*' && c == '/' {
                            break;
                        }
                        prev = c;
                    }
                }
                _ => return,
            }
        }
    }

    /// Parse one `"key" = "value";` pair, positioned at its opening quote.
    fn parse_pair(&mut self) -> Result<(String, String), String> {
        let key = self.parse_quoted("key")?;
        self.skip_trivia();
        match self.bump() {
            Some('=') => {}
            other => return Err(format!("expected '=' after key, found {other:?}")),
        }
        self.skip_trivia();
        let value = self.parse_quoted("value")?;
        self.skip_trivia();
        match self.bump() {
            Some(';') => Ok((key, value)),
            other => Err(format!("expected ';' after value, found {other:?}")),
        }
    }

    fn parse_quoted(&mut self, what: &str) -> Result<String, String> {
        match self.bump() {
            Some('"') => {}
            other => return Err(format!("expected quoted {what}, found {other:?}")),
        }
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(c @ ('"' | '\\')) => out.push(c),
                    // Unknown escape: keep both characters verbatim.
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => return Err(format!("unterminated {what} string")),
                },
                Some(c) => out.push(c),
                None => return Err(format!("unterminated {what} string")),
            }
        }
    }

    /// After a malformed entry, skip to just past the next `;`.
    fn resync(&mut self) {
        while let Some(c) = self.bump() {
            if c == ';' {
                break;
            }
        }
    }
}
