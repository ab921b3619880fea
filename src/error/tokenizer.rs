/// A token-level failure with line number and type.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct TokenError {
	/// The line number where the error occurred.
	line:   usize,
	/// The type of token error.
	r#type: TokenErrorType,
}

impl TokenError {
	pub(crate) fn new(line: usize, r#type: TokenErrorType) -> Self { Self { line, r#type } }
}

/// Types of token errors.
#[derive(Debug)]
pub enum TokenErrorType {
	/// A value accessor was called on a token of another kind.
	WrongTokenKind { requested: &'static str, actual: String },
	/// The current token was read before the first advance or past the end.
	OutOfTokens,
}

impl std::fmt::Display for TokenErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use TokenErrorType::*;
		match self {
			WrongTokenKind { requested, actual } => {
				write!(f, "Expected {requested}, got '{actual}'")
			}
			OutOfTokens => write!(f, "No current token"),
		}
	}
}
