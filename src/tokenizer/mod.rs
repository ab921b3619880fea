//! Turns raw Jack source into a token stream the compilation engine walks.
//!
//! Comments are stripped line by line before any lexing happens; a block
//! comment left open on one line carries over as a mode bit until a later
//! line closes it. What survives is cut into tokens: any of the 19
//! punctuation characters stands alone regardless of adjacency, a `"`
//! opens a string literal that must close on the same line, and every other
//! run of characters is a word classified as keyword, integer literal or
//! identifier.
//!
//! The whole file is tokenized up front into an indexable list. The engine
//! then moves a cursor over it with `advance`, and `step_back` gives the
//! parser its one token of lookahead: advance, inspect, step back, decide.

mod token;

pub(crate) use token::*;

use crate::error::tokenizer::{TokenError, TokenErrorType};

/// The 19 punctuation characters of the language.
const SYMBOLS: &str = "{}()[].,;+-*/&|<>=~";
/// The binary operator subset of [`SYMBOLS`].
const OPERATORS: &str = "+-*/&|<>=";

/// A tokenizer for Jack source code
pub(crate) struct Tokenizer {
	/// Every token of the file, materialized at construction
	tokens:           Vec<Token>,
	/// One past the index of the current token
	cursor:           usize,
	/// Whether an unclosed `/* ... */` is being carried across lines
	in_block_comment: bool,
}

impl Tokenizer {
	pub fn new(source: &str) -> Self {
		let mut tokenizer = Self { tokens: Vec::new(), cursor: 0, in_block_comment: false };
		for (index, raw) in source.lines().enumerate() {
			let line = tokenizer.strip_comments(raw);
			let line = line.trim();
			if !line.is_empty() {
				tokenizer.lex_line(line, index + 1);
			}
		}
		tokenizer
	}

	/// Removes comment text from one line, carrying the block-comment state
	/// across calls. An unterminated block comment swallows the rest of the
	/// file; an unterminated `"` drops the rest of its line.
	fn strip_comments(&mut self, raw: &str) -> String {
		let mut line = raw.to_owned();

		if self.in_block_comment {
			match line.find("*/") {
				Some(end) => {
					line.replace_range(..end + 2, "");
					self.in_block_comment = false;
				}
				None => return String::new(),
			}
		}

		if let Some(start) = line.find("//") {
			line.truncate(start);
		}

		while let Some(start) = line.find("/*") {
			match line[start + 2..].find("*/") {
				Some(offset) => line.replace_range(start..start + 2 + offset + 2, ""),
				None => {
					line.truncate(start);
					self.in_block_comment = true;
					break;
				}
			}
		}

		line
	}

	/// Cuts one comment-free line into tokens.
	fn lex_line(&mut self, line: &str, number: usize) {
		let mut word = String::new();
		let mut chars = line.char_indices().peekable();
		while let Some((index, c)) = chars.next() {
			if c.is_whitespace() {
				self.flush_word(&mut word, number);
			} else if SYMBOLS.contains(c) {
				self.flush_word(&mut word, number);
				self.tokens.push(Token::new(TokenKind::Symbol(c), number));
			} else if c == '"' {
				self.flush_word(&mut word, number);
				let rest = &line[index + 1..];
				match rest.find('"') {
					Some(length) => {
						self.tokens.push(Token::new(TokenKind::StringLiteral(rest[..length].to_owned()), number));
						let closing = index + 1 + length;
						while chars.next_if(|&(i, _)| i <= closing).is_some() {}
					}
					// unterminated literal: the rest of the line is dropped
					None => break,
				}
			} else {
				word.push(c);
			}
		}
		self.flush_word(&mut word, number);
	}

	fn flush_word(&mut self, word: &mut String, number: usize) {
		if !word.is_empty() {
			self.tokens.push(Token::new(TokenKind::word(word), number));
			word.clear();
		}
	}
}

impl Tokenizer {
	/// True while the cursor has not consumed every token.
	pub fn has_more(&self) -> bool { self.cursor < self.tokens.len() }

	/// Makes the next token current. Does nothing at the end of the stream.
	pub fn advance(&mut self) {
		if self.has_more() {
			self.cursor += 1;
		}
	}

	/// Moves the cursor back one token; the previously current token becomes
	/// current again and the next [`advance`](Self::advance) re-reads what it
	/// replaced. This is the parser's one-token lookahead.
	pub fn step_back(&mut self) { self.cursor = self.cursor.saturating_sub(1); }

	/// The token most recently made current by [`advance`](Self::advance).
	pub fn current(&self) -> Result<&Token, TokenError> {
		match self.cursor {
			0 => Err(TokenError::new(0, TokenErrorType::OutOfTokens)),
			cursor => Ok(&self.tokens[cursor - 1]),
		}
	}

	/// Line of the current token, for error reporting.
	pub fn line(&self) -> usize { self.current().map(|token| token.line).unwrap_or(0) }

	/// True when the current token is a binary operator symbol.
	pub fn is_operator(&self) -> bool {
		matches!(self.current(), Ok(Token { kind: TokenKind::Symbol(c), .. }) if OPERATORS.contains(*c))
	}

	pub fn keyword(&self) -> Result<Keyword, TokenError> {
		match self.current()? {
			Token { kind: TokenKind::Keyword(keyword), .. } => Ok(*keyword),
			token => Err(Self::wrong_kind("a keyword", token)),
		}
	}

	pub fn symbol(&self) -> Result<char, TokenError> {
		match self.current()? {
			Token { kind: TokenKind::Symbol(c), .. } => Ok(*c),
			token => Err(Self::wrong_kind("a symbol", token)),
		}
	}

	pub fn identifier(&self) -> Result<String, TokenError> {
		match self.current()? {
			Token { kind: TokenKind::Identifier(name), .. } => Ok(name.clone()),
			token => Err(Self::wrong_kind("an identifier", token)),
		}
	}

	#[allow(dead_code)]
	pub fn int_value(&self) -> Result<u16, TokenError> {
		match self.current()? {
			Token { kind: TokenKind::IntLiteral(value), .. } => Ok(*value),
			token => Err(Self::wrong_kind("an integer literal", token)),
		}
	}

	#[allow(dead_code)]
	pub fn string_value(&self) -> Result<String, TokenError> {
		match self.current()? {
			Token { kind: TokenKind::StringLiteral(text), .. } => Ok(text.clone()),
			token => Err(Self::wrong_kind("a string literal", token)),
		}
	}

	fn wrong_kind(requested: &'static str, token: &Token) -> TokenError {
		TokenError::new(
			token.line,
			TokenErrorType::WrongTokenKind { requested, actual: token.kind.to_string() },
		)
	}
}
