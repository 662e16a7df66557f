use crate::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    Int(i128),
    Str(String),
    Pipe,
    Dot,
    Comma,
    Colon,
    ColonColon,
    Semi,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Amp,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("`{name}`"),
            Self::Int(value) => format!("`{value}`"),
            Self::Str(value) => format!("{value:?}"),
            Self::Eof => String::from("end of path"),
            other => format!("`{}`", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Pipe => "|",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::ColonColon => "::",
            Self::Semi => ";",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Bang => "!",
            Self::Amp => "&",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::Ident(_) | Self::Int(_) | Self::Str(_) | Self::Eof => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Integer suffixes with the largest literal each accepts. Signed limits are
/// the magnitude of `MIN` so that `-128i8` lexes.
const INT_SUFFIXES: &[(&str, u128)] = &[
    ("u8", u8::MAX as u128),
    ("u16", u16::MAX as u128),
    ("u32", u32::MAX as u128),
    ("u64", u64::MAX as u128),
    ("u128", u128::MAX),
    ("usize", usize::MAX as u128),
    ("i8", i8::MIN.unsigned_abs() as u128),
    ("i16", i16::MIN.unsigned_abs() as u128),
    ("i32", i32::MIN.unsigned_abs() as u128),
    ("i64", i64::MIN.unsigned_abs() as u128),
    ("i128", i128::MAX as u128),
    ("isize", isize::MIN.unsigned_abs() as u128),
];

/// Splits a path into tokens, ending with [`TokenKind::Eof`].
pub(crate) fn tokenize(path: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        path,
        bytes: path.as_bytes(),
        pos: 0,
    };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'p> {
    path: &'p str,
    bytes: &'p [u8],
    pos: usize,
}

impl<'p> Lexer<'p> {
    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            offset,
            path: self.path.to_owned(),
            message: message.into(),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }

        let offset = self.pos;
        let Some(byte) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                offset,
            });
        };

        let kind = match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.ident(),
            b'0'..=b'9' => self.int()?,
            b'"' => self.string()?,
            _ => self.punct()?,
        };
        Ok(Token { kind, offset })
    }

    fn take_while(&mut self, f: impl Fn(u8) -> bool) -> &'p str {
        let path = self.path;
        let start = self.pos;
        while self.peek().is_some_and(&f) {
            self.pos += 1;
        }
        &path[start..self.pos]
    }

    fn ident(&mut self) -> TokenKind {
        let ident = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        TokenKind::Ident(ident.to_owned())
    }

    fn int(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        let digits: String = self
            .take_while(|b| b.is_ascii_digit() || b == b'_')
            .chars()
            .filter(|c| *c != '_')
            .collect();

        let suffix_start = self.pos;
        let suffix = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let limit = if suffix.is_empty() {
            i128::MAX as u128
        } else {
            match INT_SUFFIXES.iter().find(|(name, _)| *name == suffix) {
                Some(&(_, limit)) => limit,
                None => {
                    let message = format!("invalid suffix `{suffix}` for integer literal");
                    return Err(self.error(suffix_start, message));
                }
            }
        };

        let value = digits
            .parse::<i128>()
            .map_err(|_| self.error(start, "integer literal is too large"))?;
        if value as u128 > limit {
            let message = format!("integer literal is out of range for `{suffix}`");
            return Err(self.error(start, message));
        }
        Ok(TokenKind::Int(value))
    }

    fn string(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let rest = &self.path[self.pos..];
            let Some(c) = rest.chars().next() else {
                return Err(self.error(start, "unterminated string literal"));
            };
            self.pos += c.len_utf8();
            match c {
                '"' => return Ok(TokenKind::Str(value)),
                '\\' => {
                    let escaped = match self.peek() {
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(b'n') => '\n',
                        Some(b't') => '\t',
                        Some(b'r') => '\r',
                        Some(b'0') => '\0',
                        _ => return Err(self.error(self.pos - 1, "unknown character escape")),
                    };
                    self.pos += 1;
                    value.push(escaped);
                }
                c => value.push(c),
            }
        }
    }

    fn punct(&mut self) -> Result<TokenKind, ParseError> {
        let offset = self.pos;
        let next = self.peek_at(1);
        let (kind, len) = match (self.bytes[offset], next) {
            (b'|', Some(b'|')) => (TokenKind::OrOr, 2),
            (b'&', Some(b'&')) => (TokenKind::AndAnd, 2),
            (b'=', Some(b'=')) => (TokenKind::EqEq, 2),
            (b'!', Some(b'=')) => (TokenKind::NotEq, 2),
            (b'<', Some(b'=')) => (TokenKind::Le, 2),
            (b'>', Some(b'=')) => (TokenKind::Ge, 2),
            (b':', Some(b':')) => (TokenKind::ColonColon, 2),
            (b'|', _) => (TokenKind::Pipe, 1),
            (b'&', _) => (TokenKind::Amp, 1),
            (b'!', _) => (TokenKind::Bang, 1),
            (b'<', _) => (TokenKind::Lt, 1),
            (b'>', _) => (TokenKind::Gt, 1),
            (b':', _) => (TokenKind::Colon, 1),
            (b';', _) => (TokenKind::Semi, 1),
            (b'.', _) => (TokenKind::Dot, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'[', _) => (TokenKind::LBracket, 1),
            (b']', _) => (TokenKind::RBracket, 1),
            (b'(', _) => (TokenKind::LParen, 1),
            (b')', _) => (TokenKind::RParen, 1),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            _ => {
                let c = self.path[offset..].chars().next().unwrap_or('?');
                return Err(self.error(offset, format!("unexpected character `{c}`")));
            }
        };
        self.pos += len;
        Ok(kind)
    }
}

// -----------------------------------------------------------------------------
// Tests
