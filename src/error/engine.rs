/// A specific parsing error with line number and type.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct ParseError {
	/// The line number where the error occurred.
	line:   usize,
	/// The type of parsing error.
	r#type: ParseErrorType,
}

impl ParseError {
	pub(crate) fn new(line: usize, r#type: ParseErrorType) -> Self { Self { line, r#type } }
}

/// Types of parsing errors.
#[derive(Debug)]
pub enum ParseErrorType {
	/// A grammar rule required a specific terminal.
	UnexpectedToken { expected: String, actual: String },
	/// Error for missing class name after 'class'.
	ExpectClassName,
	/// Error for missing subroutine name in subroutine declaration.
	ExpectSubroutineName,
	/// Error for missing variable name in a declaration or let statement.
	ExpectVariableName,
	/// Error for a missing type in a declaration.
	ExpectType,
	/// Error for a name that no scope declares.
	UndefinedVariable(String),
	/// Parsing completed but the tokenizer still has tokens.
	StrayInput,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			UnexpectedToken { expected, actual } => {
				write!(f, "Expected {expected}, got '{actual}'")
			}
			ExpectClassName => write!(f, "Expect class name after 'class'."),
			ExpectSubroutineName => write!(f, "Expect subroutine name."),
			ExpectVariableName => write!(f, "Expect variable name in declaration."),
			ExpectType => write!(f, "Expect 'int', 'char', 'boolean' or a class name."),
			UndefinedVariable(name) => write!(f, "Undefined variable '{name}'."),
			StrayInput => write!(f, "Unexpected tokens after the closing '}}' of the class."),
		}
	}
}
