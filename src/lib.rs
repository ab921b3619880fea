//! # How Jack source text becomes VM code
//!
//! User's source code: `let average = (min + max) / 2;`
//!
//! ## Tokenizing
//!
//! Also known as `lexing` or `lexical analysis`, takes in the characters and
//! converts them into tokens. Comments are stripped first, then single
//! characters `(`, `,`, `;`, numbers `123`, string literals `"hi!"`,
//! keywords `let` and identifiers `average` all become tokens. The tokens
//! above are `["let", "average", "=", "(", "min", "+", "max", ")", "/",
//! "2", ";"]`.
//!
//! ## Single-pass compilation
//!
//! This compiler interleaves parsing, analysis, and code generation without
//! ever allocating a syntax tree or an IR. Tokens are consumed once, left to
//! right; every grammar rule is a procedure that eats its terminals and
//! emits VM instructions on the way through. There is no intermediate data
//! structure to revisit and no previously parsed code is ever reconsidered.
//!
//! The one piece of global knowledge a single pass needs is where each
//! declared name lives. That is the symbol table: two nested scopes (class
//! and subroutine), each name mapped to a storage kind and a running index
//! within that kind. The code generator turns the kind into a VM memory
//! segment and the index into the offset inside it.
//!
//! ## The target machine
//!
//! The output is text for a stack-based virtual machine. Instructions move
//! words between memory segments and the stack (`push constant 2`,
//! `pop local 0`), combine the top of the stack (`add`, `not`, `lt`), or
//! transfer control (`label`, `goto`, `if-goto`, `call`, `function`,
//! `return`). Expressions therefore compile directly to postfix order, which
//! is exactly the order a left-to-right walk of the source produces.

pub mod cli;
mod compiler;
mod engine;
mod error;
mod symbol_table;
mod tokenizer;
mod vm_writer;

pub use compiler::Jackc;
pub use error::{
	JackError,
	engine::{ParseError, ParseErrorType},
	tokenizer::{TokenError, TokenErrorType},
};

/// Crate-wide result type, defaulting to the top-level error.
pub type Result<T, E = JackError> = std::result::Result<T, E>;
