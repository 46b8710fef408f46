use crate::roll::is_face_label;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Core,
    DropHighest,
    DropLowest,
    DropConstraint,
    Reroll,
    Explode,
    Unique,
    Replace,
    Cap,
    Plus,
    Minus,
}


/// A recognized term and where it starts in the whitespace-free input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}


/// Splits notation into recognized terms.
///
/// Whitespace is removed up front. The core term is only recognized at the
/// very start; every other position is tried against each modifier
/// sub-grammar.
#[derive(Debug)]
pub(crate) struct Lexer {
    input: Vec<char>,
    pub position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().filter(|c| !c.is_whitespace()).collect(),
            position: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Matches `<digits>?[dD](<digits> | '{' <faces> '}')` at the start of the input.
    pub fn read_core(&mut self) -> Option<Token> {
        if self.position != 0 {
            return None;
        }

        let marker = self.digits(0);
        if !matches!(self.char_at(marker), Some('d' | 'D')) {
            return None;
        }

        let sides_end = self.digits(marker + 1);
        let end = if sides_end > marker + 1 {
            sides_end
        } else {
            self.braced(marker + 1, is_face_label)?
        };

        Some(self.token(TokenKind::Core, end))
    }

    /// Matches one modifier term at the current position. Leaves the
    /// position untouched when nothing matches.
    pub fn next_token(&mut self) -> Option<Token> {
        let start = self.position;
        let ch = self.char_at(start)?;

        let (kind, end) = match ch {
            'h' | 'H' => (TokenKind::DropHighest, self.digits(start + 1)),
            'l' | 'L' => (TokenKind::DropLowest, self.digits(start + 1)),
            'd' | 'D' => (TokenKind::DropConstraint, self.braced(start + 1, is_condition_char)?),
            'r' | 'R' => {
                let body_end = self.braced(start + 1, is_condition_char)?;
                (TokenKind::Reroll, self.digits(body_end))
            },
            '!' => (TokenKind::Explode, start + 1),
            'u' | 'U' => {
                let end = self.braced(start + 1, is_value_char).unwrap_or(start + 1);
                (TokenKind::Unique, end)
            },
            'v' | 'V' => (TokenKind::Replace, self.braced(start + 1, is_replace_char)?),
            'c' | 'C' => (TokenKind::Cap, self.braced(start + 1, is_condition_char)?),
            '+' | '-' => {
                let end = self.digits(start + 1);
                if end == start + 1 {
                    return None;
                }

                let kind = if ch == '+' { TokenKind::Plus } else { TokenKind::Minus };
                (kind, end)
            },
            _ => return None
        };

        Some(self.token(kind, end))
    }

    /// Steps over one unrecognized character and returns it.
    pub fn skip(&mut self) -> Option<char> {
        let ch = self.char_at(self.position)?;
        self.position += 1;
        Some(ch)
    }

    fn token(&mut self, kind: TokenKind, end: usize) -> Token {
        let token = Token {
            kind,
            text: self.input[self.position..end].iter().collect(),
            position: self.position,
        };

        self.position = end;
        token
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.input.get(index).copied()
    }

    /// Index just past the run of ASCII digits starting at `from`.
    fn digits(&self, from: usize) -> usize {
        let mut end = from;
        while self.char_at(end).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
        }

        end
    }

    /// Index just past a `{...}` block starting at `from` whose body is one
    /// or more characters accepted by `allowed`.
    fn braced(&self, from: usize, allowed: fn(char) -> bool) -> Option<usize> {
        if self.char_at(from) != Some('{') {
            return None;
        }

        let mut end = from + 1;
        while self.char_at(end).is_some_and(|c| c != '}' && allowed(c)) {
            end += 1;
        }

        match self.char_at(end) {
            Some('}') if end > from + 1 => Some(end + 1),
            _ => None
        }
    }
}

fn is_value_char(c: char) -> bool {
    c.is_ascii_digit() || c == ','
}

fn is_condition_char(c: char) -> bool {
    is_value_char(c) || c == '<' || c == '>'
}

fn is_replace_char(c: char) -> bool {
    is_condition_char(c) || c == '='
}


/// The outcome of scanning a whole input.
#[derive(Debug, Default)]
pub(crate) struct Scan {
    pub tokens: Vec<Token>,
    /// Every character no sub-grammar accepted, in order.
    pub residue: String,
    /// Position of the first residue character.
    pub residue_at: Option<usize>,
    pub empty: bool,
}

impl Scan {
    pub fn has_core(&self) -> bool {
        self.tokens.first().is_some_and(|token| token.kind == TokenKind::Core)
    }

    /// Notation is valid when it starts with a core term and nothing is left over.
    pub fn is_complete(&self) -> bool {
        self.has_core() && self.residue.is_empty()
    }
}

/// Strips every recognized term from `input`, collecting what is left over.
///
/// Without a core term at the start nothing is recognized and the whole
/// input is residue.
pub(crate) fn scan(input: &str) -> Scan {
    let mut lexer = Lexer::new(input);
    let mut scan = Scan { empty: lexer.is_empty(), ..Default::default() };

    match lexer.read_core() {
        Some(core) => scan.tokens.push(core),
        None => {
            if !lexer.is_empty() {
                scan.residue_at = Some(0);
            }
            scan.residue = lexer.input.iter().collect();
            return scan;
        }
    }

    while !lexer.at_end() {
        if let Some(token) = lexer.next_token() {
            scan.tokens.push(token);
            continue;
        }

        scan.residue_at.get_or_insert(lexer.position);
        if let Some(ch) = lexer.skip() {
            scan.residue.push(ch);
        }
    }

    scan
}
