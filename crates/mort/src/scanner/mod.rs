// The scanner has a 'pull' structure: rather than reading the whole input and turning it into
// tokens up front, the stream is tokenised lazily, one token per call, as the consumer asks.

use std::{borrow::Cow, fmt::Display, io, rc::Rc};

use log::{debug, error, trace};
use mort_nfa::{simulate, ByteStream};
use thiserror::Error;

mod definitions;
mod lexemes;
pub mod lexeme_sets;


pub use definitions::{DefinitionTable, TokenDefinition};
pub use lexemes::{LexemeIterator, LexemeSet};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot match byte `{}` at offset `{offset}`", .byte.escape_ascii())]
    Unmatched { byte: u8, offset: u64 },
    #[error("token requested after the scan finished")]
    Finished,
    #[error("failed to read input")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T> {
    kind: T,
    lexeme: Vec<u8>,
    source: Rc<str>,
    line: u32,
    column: Option<u64>,
}

impl<T: LexemeSet> Token<T> {
    // line tracking is not implemented, every token reports line 0
    fn matched(kind: T, lexeme: Vec<u8>, source: Rc<str>, end: u64) -> Self {
        Self {
            kind,
            lexeme,
            source,
            line: 0,
            column: Some(end),
        }
    }

    fn eof(source: Rc<str>) -> Self {
        Self {
            kind: T::eof(),
            lexeme: Vec::new(),
            source,
            line: 0,
            column: None,
        }
    }

    pub fn kind(&self) -> T {
        self.kind
    }

    pub fn lexeme(&self) -> &[u8] {
        &self.lexeme
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.lexeme)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Stream offset just past the token; `None` for the end-of-stream token.
    pub fn column(&self) -> Option<u64> {
        self.column
    }

    pub fn is_eof(&self) -> bool {
        self.kind == T::eof()
    }
}

impl<T: LexemeSet> Display for Token<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{}:{}", self.line, column, self.kind.to_name())?,
            None => write!(f, "{}:-1:{}", self.line, self.kind.to_name())?,
        }
        if self.kind.has_variable_content() {
            write!(f, ":{}", self.text())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    // end-of-stream token handed out
    Done,
    // unmatched byte or stream failure, no further tokens
    Failed,
}

/// One tokenisation pass over a seekable byte stream.
///
/// Definitions are tried in table order at the current offset and the first one that consumes
/// input wins. Yields the end-of-stream token exactly once; an unmatched byte ends the pass.
pub struct Scanner<'t, R, T> {
    stream: R,
    table: &'t DefinitionTable<T>,
    source: Rc<str>,
    state: ScanState,
}

impl<'t, R: ByteStream, T: LexemeSet> Scanner<'t, R, T> {
    pub fn new(stream: R, table: &'t DefinitionTable<T>, source: &str) -> Self {
        Self {
            stream,
            table,
            source: Rc::from(source),
            state: ScanState::Scanning,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_finished(&self) -> bool {
        self.state != ScanState::Scanning
    }

    pub fn next_token(&mut self) -> Result<Token<T>, ScanError> {
        if self.is_finished() {
            return Err(ScanError::Finished);
        }

        let result = self.scan();
        match &result {
            Ok(token) if token.is_eof() => self.state = ScanState::Done,
            Ok(_) => {}
            Err(_) => self.state = ScanState::Failed,
        }
        result
    }

    // skips whitespace and newlines
    pub fn next_significant_token(&mut self) -> Result<Token<T>, ScanError> {
        loop {
            let token = self.next_token()?;
            if !token.kind().is_blank() {
                return Ok(token);
            }
        }
    }

    /// Iterator over the tokens that are not whitespace or newlines.
    pub fn significant(self) -> impl Iterator<Item = Result<Token<T>, ScanError>> {
        self.filter(|result| !matches!(result, Ok(token) if token.kind().is_blank()))
    }

    pub fn into_inner(self) -> R {
        self.stream
    }

    fn scan(&mut self) -> Result<Token<T>, ScanError> {
        if self.stream.at_end()? {
            return Ok(Token::eof(self.source.clone()));
        }

        let table = self.table;
        let start = self.stream.offset()?;
        for definition in table.iter() {
            let kind = definition.kind();
            trace!("trying {} at {}", kind.to_name(), start);

            let result = simulate(definition.pattern(), &mut self.stream)?;
            if let Some(len) = result.consumed() {
                let end = self.stream.offset()?;
                let mut lexeme = vec![0; len];
                self.stream.seek_to(start)?;
                self.stream.read_exact(&mut lexeme)?;

                debug!(
                    "matched \"{}\" at [{}:{}) to {}",
                    lexeme.escape_ascii(),
                    start,
                    end,
                    kind.to_name()
                );
                return Ok(Token::matched(kind, lexeme, self.source.clone(), end));
            }
            // a rejected attempt leaves the stream back at `start`
        }

        match self.stream.read_byte()? {
            Some(byte) => {
                error!(
                    "{}: cannot match '{}' at {} to any token",
                    self.source,
                    byte.escape_ascii(),
                    start
                );
                Err(ScanError::Unmatched {
                    byte,
                    offset: start,
                })
            }
            None => Ok(Token::eof(self.source.clone())),
        }
    }
}

impl<R: ByteStream, T: LexemeSet> Iterator for Scanner<'_, R, T> {
    type Item = Result<Token<T>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }
        Some(self.next_token())
    }
}
