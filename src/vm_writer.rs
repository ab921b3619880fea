//! Line-oriented sink for VM instructions.

use std::io::Write;

use crate::error::JackError;

/// VM memory segment named in `push` and `pop` instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
	Constant,
	Argument,
	Local,
	Static,
	This,
	That,
	Pointer,
	Temp,
}

impl std::fmt::Display for Segment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let text = match self {
			Segment::Constant => "constant",
			Segment::Argument => "argument",
			Segment::Local => "local",
			Segment::Static => "static",
			Segment::This => "this",
			Segment::That => "that",
			Segment::Pointer => "pointer",
			Segment::Temp => "temp",
		};
		write!(f, "{text}")
	}
}

/// Arithmetic or logic command of the stack machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
	Add,
	Sub,
	Neg,
	Eq,
	Gt,
	Lt,
	And,
	Or,
	Not,
}

impl std::fmt::Display for Operation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let text = match self {
			Operation::Add => "add",
			Operation::Sub => "sub",
			Operation::Neg => "neg",
			Operation::Eq => "eq",
			Operation::Gt => "gt",
			Operation::Lt => "lt",
			Operation::And => "and",
			Operation::Or => "or",
			Operation::Not => "not",
		};
		write!(f, "{text}")
	}
}

/// Writes one VM instruction per line to the output stream.
///
/// Every line prints both parameter slots; an absent parameter leaves its
/// separating space behind. The downstream VM translator tolerates the
/// trailing whitespace.
pub(crate) struct VmWriter<W: Write> {
	out: W,
}

impl<W: Write> VmWriter<W> {
	pub fn new(out: W) -> Self { Self { out } }

	pub fn write_push(&mut self, segment: Segment, index: u16) -> crate::Result<()> {
		self.command("push", &segment.to_string(), &index.to_string())
	}

	pub fn write_pop(&mut self, segment: Segment, index: u16) -> crate::Result<()> {
		self.command("pop", &segment.to_string(), &index.to_string())
	}

	pub fn write_arithmetic(&mut self, operation: Operation) -> crate::Result<()> {
		self.command(&operation.to_string(), "", "")
	}

	pub fn write_label(&mut self, label: &str) -> crate::Result<()> { self.command("label", label, "") }

	pub fn write_goto(&mut self, label: &str) -> crate::Result<()> { self.command("goto", label, "") }

	pub fn write_if(&mut self, label: &str) -> crate::Result<()> { self.command("if-goto", label, "") }

	pub fn write_call(&mut self, name: &str, arguments: u16) -> crate::Result<()> {
		self.command("call", name, &arguments.to_string())
	}

	pub fn write_function(&mut self, name: &str, locals: u16) -> crate::Result<()> {
		self.command("function", name, &locals.to_string())
	}

	pub fn write_return(&mut self) -> crate::Result<()> { self.command("return", "", "") }

	fn command(&mut self, verb: &str, param1: &str, param2: &str) -> crate::Result<()> {
		writeln!(self.out, "{verb} {param1} {param2}").map_err(JackError::UnwritableOutput)
	}

	/// Flushes and releases the underlying stream.
	pub fn finish(mut self) -> crate::Result<()> { self.out.flush().map_err(JackError::UnwritableOutput) }
}
