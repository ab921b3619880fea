pub mod engine;
pub mod tokenizer;

use engine::ParseError;
use tokenizer::TokenError;

/// JackError is the top-level error type for the Jack compiler.
#[derive(thiserror::Error, Debug)]
pub enum JackError {
	/// Internal compiler error, should never happen
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// The source file could not be read
	#[error("Failed to read source: {0}")]
	UnreadableInput(#[source] std::io::Error),
	/// The VM output could not be written
	#[error("Failed to write VM code: {0}")]
	UnwritableOutput(#[source] std::io::Error),
	/// Summary error for a directory run with failing files
	#[error("{0} source files failed to compile")]
	FailedFiles(usize),
	#[error(transparent)]
	TokenError(#[from] TokenError),
	#[error(transparent)]
	ParseError(#[from] ParseError),
}
