//! Recursive-descent parser fused with the code generator.
//!
//! One procedure per grammar rule, and no syntax tree in between: every
//! procedure consumes its terminals from the tokenizer, records
//! declarations in the symbol table, and emits VM instructions the moment
//! it knows them. Lookahead is the tokenizer's step-back: advance, look at
//! the token, and step back when it belongs to the caller.
//!
//! Expressions are compiled strictly left to right. The language has no
//! operator precedence, so `2 + 3 * 4` means `(2 + 3) * 4` and the postfix
//! VM order falls out of the walk for free.

use std::io::Write;

use crate::{
	error::{
		JackError,
		engine::{ParseError, ParseErrorType},
	},
	symbol_table::{Kind, SymbolTable},
	tokenizer::{Keyword, Token, TokenKind, Tokenizer},
	vm_writer::{Operation, Segment, VmWriter},
};

/// Compiles one class from a token stream into VM instructions.
pub(crate) struct CompilationEngine<W: Write> {
	tokenizer:       Tokenizer,
	table:           SymbolTable,
	writer:          VmWriter<W>,
	/// Name bound at `class NAME {`, qualifies every emitted function
	class_name:      String,
	/// Name of the subroutine currently being emitted
	subroutine_name: String,
	/// Next free suffix for `LABEL_<n>`, unique within one class
	label_index:     usize,
}

impl<W: Write> CompilationEngine<W> {
	pub fn new(tokenizer: Tokenizer, writer: VmWriter<W>) -> Self {
		Self {
			tokenizer,
			table: SymbolTable::new(),
			writer,
			class_name: String::new(),
			subroutine_name: String::new(),
			label_index: 0,
		}
	}

	/// Compiles the single class the token stream must contain, then flushes
	/// the output. Anything after the closing brace is stray input.
	pub fn compile_class(mut self) -> crate::Result<()> {
		self.tokenizer.advance();
		if !matches!(self.tokenizer.keyword(), Ok(Keyword::Class)) {
			return Err(self.unexpected("'class'"));
		}
		self.tokenizer.advance();
		self.class_name = self
			.tokenizer
			.identifier()
			.map_err(|_| ParseError::new(self.tokenizer.line(), ParseErrorType::ExpectClassName))?;
		self.check_symbol('{')?;
		self.compile_class_var_decs()?;
		self.compile_subroutines()?;
		self.check_symbol('}')?;
		if self.tokenizer.has_more() {
			return Err(ParseError::new(self.tokenizer.line(), ParseErrorType::StrayInput).into());
		}
		self.writer.finish()
	}

	/// `('static'|'field') type name (',' name)* ';'` repeated. Declarations
	/// only feed the symbol table, nothing is emitted.
	fn compile_class_var_decs(&mut self) -> crate::Result<()> {
		loop {
			self.tokenizer.advance();
			let kind = match self.tokenizer.keyword() {
				Ok(Keyword::Static) => Kind::Static,
				Ok(Keyword::Field) => Kind::Field,
				_ => {
					self.tokenizer.step_back();
					return Ok(());
				}
			};
			let declared_type = self.compile_type()?;
			loop {
				self.tokenizer.advance();
				let name = self
					.tokenizer
					.identifier()
					.map_err(|_| ParseError::new(self.tokenizer.line(), ParseErrorType::ExpectVariableName))?;
				self.table.define(name, declared_type.clone(), kind);
				self.tokenizer.advance();
				match self.tokenizer.symbol()? {
					',' => {}
					';' => break,
					_ => return Err(self.unexpected("',' or ';'")),
				}
			}
		}
	}

	/// A declared type: `int`, `char`, `boolean` or a class name.
	fn compile_type(&mut self) -> crate::Result<String> {
		self.tokenizer.advance();
		match self.tokenizer.current()?.kind.clone() {
			TokenKind::Keyword(keyword @ (Keyword::Int | Keyword::Char | Keyword::Boolean)) => {
				Ok(keyword.text().to_owned())
			}
			TokenKind::Identifier(name) => Ok(name),
			_ => Err(ParseError::new(self.tokenizer.line(), ParseErrorType::ExpectType).into()),
		}
	}

	fn compile_subroutines(&mut self) -> crate::Result<()> {
		loop {
			self.tokenizer.advance();
			let kind = match self.tokenizer.keyword() {
				Ok(kind @ (Keyword::Constructor | Keyword::Function | Keyword::Method)) => kind,
				_ => {
					self.tokenizer.step_back();
					return Ok(());
				}
			};
			self.table.start_subroutine();
			if kind == Keyword::Method {
				// the receiver rides as argument 0 of every method
				self.table.define("this".to_owned(), self.class_name.clone(), Kind::Argument);
			}
			// return type, parsed but not used for code generation
			self.tokenizer.advance();
			if !matches!(self.tokenizer.keyword(), Ok(Keyword::Void)) {
				self.tokenizer.step_back();
				self.compile_type()?;
			}
			self.tokenizer.advance();
			self.subroutine_name = self
				.tokenizer
				.identifier()
				.map_err(|_| ParseError::new(self.tokenizer.line(), ParseErrorType::ExpectSubroutineName))?;
			self.check_symbol('(')?;
			self.compile_parameter_list()?;
			self.check_symbol(')')?;
			self.compile_subroutine_body(kind)?;
		}
	}

	fn compile_parameter_list(&mut self) -> crate::Result<()> {
		self.tokenizer.advance();
		if matches!(self.tokenizer.current()?.kind, TokenKind::Symbol(')')) {
			self.tokenizer.step_back();
			return Ok(());
		}
		self.tokenizer.step_back();
		loop {
			let declared_type = self.compile_type()?;
			self.tokenizer.advance();
			let name = self
				.tokenizer
				.identifier()
				.map_err(|_| ParseError::new(self.tokenizer.line(), ParseErrorType::ExpectVariableName))?;
			self.table.define(name, declared_type, Kind::Argument);
			self.tokenizer.advance();
			match self.tokenizer.symbol()? {
				',' => {}
				')' => {
					self.tokenizer.step_back();
					return Ok(());
				}
				_ => return Err(self.unexpected("',' or ')'")),
			}
		}
	}

	/// `{ varDec* statement* }`. The `function` line can only be emitted
	/// once the local declarations have been counted, so it is written
	/// between the two halves.
	fn compile_subroutine_body(&mut self, kind: Keyword) -> crate::Result<()> {
		self.check_symbol('{')?;
		self.compile_var_decs()?;
		self.write_function_dec(kind)?;
		self.compile_statements()?;
		self.check_symbol('}')
	}

	fn compile_var_decs(&mut self) -> crate::Result<()> {
		loop {
			self.tokenizer.advance();
			if !matches!(self.tokenizer.keyword(), Ok(Keyword::Var)) {
				self.tokenizer.step_back();
				return Ok(());
			}
			let declared_type = self.compile_type()?;
			loop {
				self.tokenizer.advance();
				let name = self
					.tokenizer
					.identifier()
					.map_err(|_| ParseError::new(self.tokenizer.line(), ParseErrorType::ExpectVariableName))?;
				self.table.define(name, declared_type.clone(), Kind::Local);
				self.tokenizer.advance();
				match self.tokenizer.symbol()? {
					',' => {}
					';' => break,
					_ => return Err(self.unexpected("',' or ';'")),
				}
			}
		}
	}

	/// Emits the `function` line and the preamble that binds `this`.
	/// A method rebinds the receiver from argument 0; a constructor
	/// allocates one word per field and keeps the fresh base address.
	fn write_function_dec(&mut self, kind: Keyword) -> crate::Result<()> {
		let name = format!("{}.{}", self.class_name, self.subroutine_name);
		self.writer.write_function(&name, self.table.var_count(Kind::Local))?;
		match kind {
			Keyword::Method => {
				self.writer.write_push(Segment::Argument, 0)?;
				self.writer.write_pop(Segment::Pointer, 0)?;
			}
			Keyword::Constructor => {
				self.writer.write_push(Segment::Constant, self.table.var_count(Kind::Field))?;
				self.writer.write_call("Memory.alloc", 1)?;
				self.writer.write_pop(Segment::Pointer, 0)?;
			}
			_ => {}
		}
		Ok(())
	}

	fn compile_statements(&mut self) -> crate::Result<()> {
		loop {
			self.tokenizer.advance();
			match self.tokenizer.current()?.kind.clone() {
				TokenKind::Symbol('}') => {
					self.tokenizer.step_back();
					return Ok(());
				}
				TokenKind::Keyword(Keyword::Let) => self.compile_let()?,
				TokenKind::Keyword(Keyword::If) => self.compile_if()?,
				TokenKind::Keyword(Keyword::While) => self.compile_while()?,
				TokenKind::Keyword(Keyword::Do) => self.compile_do()?,
				TokenKind::Keyword(Keyword::Return) => self.compile_return()?,
				_ => return Err(self.unexpected("a statement")),
			}
		}
	}

	/// `let name ('[' expression ']')? '=' expression ';'`
	fn compile_let(&mut self) -> crate::Result<()> {
		self.tokenizer.advance();
		let target = self
			.tokenizer
			.identifier()
			.map_err(|_| ParseError::new(self.tokenizer.line(), ParseErrorType::ExpectVariableName))?;
		let (segment, index) = self.resolve_variable(&target)?;
		self.tokenizer.advance();
		let indexed = match self.tokenizer.symbol()? {
			'[' => true,
			'=' => false,
			_ => return Err(self.unexpected("'[' or '='")),
		};
		if indexed {
			self.writer.write_push(segment, index)?;
			self.compile_expression()?;
			self.check_symbol(']')?;
			self.writer.write_arithmetic(Operation::Add)?;
			self.check_symbol('=')?;
		}
		self.compile_expression()?;
		self.check_symbol(';')?;
		if indexed {
			// park the r-value in temp 0 while pointer 1 takes the cell address
			self.writer.write_pop(Segment::Temp, 0)?;
			self.writer.write_pop(Segment::Pointer, 1)?;
			self.writer.write_push(Segment::Temp, 0)?;
			self.writer.write_pop(Segment::That, 0)?;
		} else {
			self.writer.write_pop(segment, index)?;
		}
		Ok(())
	}

	fn compile_if(&mut self) -> crate::Result<()> {
		let else_label = self.new_label();
		let end_label = self.new_label();
		self.check_symbol('(')?;
		self.compile_expression()?;
		self.check_symbol(')')?;
		self.writer.write_arithmetic(Operation::Not)?;
		self.writer.write_if(&else_label)?;
		self.check_symbol('{')?;
		self.compile_statements()?;
		self.check_symbol('}')?;
		self.writer.write_goto(&end_label)?;
		self.writer.write_label(&else_label)?;
		self.tokenizer.advance();
		if matches!(self.tokenizer.keyword(), Ok(Keyword::Else)) {
			self.check_symbol('{')?;
			self.compile_statements()?;
			self.check_symbol('}')?;
		} else {
			self.tokenizer.step_back();
		}
		self.writer.write_label(&end_label)
	}

	fn compile_while(&mut self) -> crate::Result<()> {
		// the exit label is numbered before the top label
		let exit_label = self.new_label();
		let top_label = self.new_label();
		self.writer.write_label(&top_label)?;
		self.check_symbol('(')?;
		self.compile_expression()?;
		self.check_symbol(')')?;
		self.writer.write_arithmetic(Operation::Not)?;
		self.writer.write_if(&exit_label)?;
		self.check_symbol('{')?;
		self.compile_statements()?;
		self.check_symbol('}')?;
		self.writer.write_goto(&top_label)?;
		self.writer.write_label(&exit_label)
	}

	fn compile_do(&mut self) -> crate::Result<()> {
		self.compile_subroutine_call()?;
		self.check_symbol(';')?;
		// a do statement discards the returned value
		self.writer.write_pop(Segment::Temp, 0)
	}

	fn compile_return(&mut self) -> crate::Result<()> {
		self.tokenizer.advance();
		if matches!(self.tokenizer.current()?.kind, TokenKind::Symbol(';')) {
			// void subroutines still return one word, always 0
			self.writer.write_push(Segment::Constant, 0)?;
		} else {
			self.tokenizer.step_back();
			self.compile_expression()?;
			self.check_symbol(';')?;
		}
		self.writer.write_return()
	}

	/// `term (op term)*`, left-associative with no precedence.
	fn compile_expression(&mut self) -> crate::Result<()> {
		self.compile_term()?;
		loop {
			self.tokenizer.advance();
			if !self.tokenizer.is_operator() {
				self.tokenizer.step_back();
				return Ok(());
			}
			let operator = self.tokenizer.symbol()?;
			self.compile_term()?;
			match operator {
				'+' => self.writer.write_arithmetic(Operation::Add)?,
				'-' => self.writer.write_arithmetic(Operation::Sub)?,
				'*' => self.writer.write_call("Math.multiply", 2)?,
				'/' => self.writer.write_call("Math.divide", 2)?,
				'<' => self.writer.write_arithmetic(Operation::Lt)?,
				'>' => self.writer.write_arithmetic(Operation::Gt)?,
				'=' => self.writer.write_arithmetic(Operation::Eq)?,
				'&' => self.writer.write_arithmetic(Operation::And)?,
				'|' => self.writer.write_arithmetic(Operation::Or)?,
				_ => return Err(anyhow::anyhow!("not an operator: '{operator}'").into()),
			}
		}
	}

	fn compile_term(&mut self) -> crate::Result<()> {
		if !self.tokenizer.has_more() {
			return Err(self.unexpected("a term"));
		}
		self.tokenizer.advance();
		match self.tokenizer.current()?.kind.clone() {
			TokenKind::IntLiteral(value) => self.writer.write_push(Segment::Constant, value),
			TokenKind::StringLiteral(text) => self.compile_string(&text),
			TokenKind::Keyword(Keyword::True) => {
				self.writer.write_push(Segment::Constant, 0)?;
				self.writer.write_arithmetic(Operation::Not)
			}
			TokenKind::Keyword(Keyword::False | Keyword::Null) => {
				self.writer.write_push(Segment::Constant, 0)
			}
			TokenKind::Keyword(Keyword::This) => self.writer.write_push(Segment::Pointer, 0),
			TokenKind::Symbol('(') => {
				self.compile_expression()?;
				self.check_symbol(')')
			}
			TokenKind::Symbol(operator @ ('-' | '~')) => {
				self.compile_term()?;
				if operator == '-' {
					self.writer.write_arithmetic(Operation::Neg)
				} else {
					self.writer.write_arithmetic(Operation::Not)
				}
			}
			TokenKind::Identifier(name) => self.compile_variable_term(&name),
			_ => Err(self.unexpected("a term")),
		}
	}

	/// A term opening with an identifier: array access, subroutine call or
	/// plain variable, told apart by one token of lookahead.
	fn compile_variable_term(&mut self, name: &str) -> crate::Result<()> {
		self.tokenizer.advance();
		let next = match self.tokenizer.current() {
			Ok(Token { kind: TokenKind::Symbol(c), .. }) => Some(*c),
			_ => None,
		};
		match next {
			Some('[') => {
				let (segment, index) = self.resolve_variable(name)?;
				self.writer.write_push(segment, index)?;
				self.compile_expression()?;
				self.check_symbol(']')?;
				self.writer.write_arithmetic(Operation::Add)?;
				self.writer.write_pop(Segment::Pointer, 1)?;
				self.writer.write_push(Segment::That, 0)
			}
			Some('(' | '.') => {
				// hand both tokens back and let the call rule re-read them
				self.tokenizer.step_back();
				self.tokenizer.step_back();
				self.compile_subroutine_call()
			}
			_ => {
				self.tokenizer.step_back();
				let (segment, index) = self.resolve_variable(name)?;
				self.writer.write_push(segment, index)
			}
		}
	}

	/// A string literal builds a String object one character at a time.
	fn compile_string(&mut self, text: &str) -> crate::Result<()> {
		self.writer.write_push(Segment::Constant, text.len() as u16)?;
		self.writer.write_call("String.new", 1)?;
		for c in text.chars() {
			self.writer.write_push(Segment::Constant, c as u16)?;
			self.writer.write_call("String.appendChar", 2)?;
		}
		Ok(())
	}

	/// `name '(' expressions ')'` or `name '.' name '(' expressions ')'`.
	///
	/// A bare name is a method call on the current object. After a dot the
	/// first name is looked up: a declared instance routes the call to its
	/// type's class with the object pushed as argument 0, an unknown name is
	/// taken as a class name and the call carries no receiver.
	fn compile_subroutine_call(&mut self) -> crate::Result<()> {
		self.tokenizer.advance();
		let name = self.tokenizer.identifier()?;
		self.tokenizer.advance();
		match self.tokenizer.symbol()? {
			'(' => {
				self.writer.write_push(Segment::Pointer, 0)?;
				let arguments = self.compile_expression_list()? + 1;
				self.check_symbol(')')?;
				self.writer.write_call(&format!("{}.{}", self.class_name, name), arguments)
			}
			'.' => {
				self.tokenizer.advance();
				let subroutine = self.tokenizer.identifier()?;
				let receiver = self
					.table
					.get(&name)
					.map(|symbol| (segment_of(symbol.kind), symbol.index, symbol.declared_type.clone()));
				match receiver {
					Some((segment, index, declared_type)) => {
						self.writer.write_push(segment, index)?;
						self.check_symbol('(')?;
						let arguments = self.compile_expression_list()? + 1;
						self.check_symbol(')')?;
						self.writer.write_call(&format!("{declared_type}.{subroutine}"), arguments)
					}
					None => {
						self.check_symbol('(')?;
						let arguments = self.compile_expression_list()?;
						self.check_symbol(')')?;
						self.writer.write_call(&format!("{name}.{subroutine}"), arguments)
					}
				}
			}
			_ => Err(self.unexpected("'(' or '.'")),
		}
	}

	/// Zero or more comma-separated expressions; returns how many.
	fn compile_expression_list(&mut self) -> crate::Result<u16> {
		self.tokenizer.advance();
		if matches!(self.tokenizer.current()?.kind, TokenKind::Symbol(')')) {
			self.tokenizer.step_back();
			return Ok(0);
		}
		self.tokenizer.step_back();
		let mut arguments = 1;
		self.compile_expression()?;
		loop {
			self.tokenizer.advance();
			if matches!(self.tokenizer.current()?.kind, TokenKind::Symbol(',')) {
				self.compile_expression()?;
				arguments += 1;
			} else {
				self.tokenizer.step_back();
				return Ok(arguments);
			}
		}
	}

	/// Consumes the next token, which must be the given symbol.
	fn check_symbol(&mut self, symbol: char) -> crate::Result<()> {
		self.tokenizer.advance();
		match self.tokenizer.current()? {
			Token { kind: TokenKind::Symbol(c), .. } if *c == symbol => Ok(()),
			_ => Err(self.unexpected(&format!("'{symbol}'"))),
		}
	}

	/// Storage location of a declared variable.
	fn resolve_variable(&self, name: &str) -> crate::Result<(Segment, u16)> {
		match self.table.get(name) {
			Some(symbol) => Ok((segment_of(symbol.kind), symbol.index)),
			None => Err(ParseError::new(
				self.tokenizer.line(),
				ParseErrorType::UndefinedVariable(name.to_owned()),
			)
			.into()),
		}
	}

	/// Labels are unique within one class compilation.
	fn new_label(&mut self) -> String {
		let label = format!("LABEL_{}", self.label_index);
		self.label_index += 1;
		label
	}

	fn unexpected(&self, expected: &str) -> JackError {
		let (line, actual) = match self.tokenizer.current() {
			Ok(token) => (token.line, token.kind.to_string()),
			Err(_) => (0, "end of input".to_owned()),
		};
		ParseError::new(
			line,
			ParseErrorType::UnexpectedToken { expected: expected.to_owned(), actual },
		)
		.into()
	}
}

fn segment_of(kind: Kind) -> Segment {
	match kind {
		Kind::Static => Segment::Static,
		Kind::Field => Segment::This,
		Kind::Argument => Segment::Argument,
		Kind::Local => Segment::Local,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compile(source: &str) -> Vec<String> {
		let mut out = Vec::new();
		let engine = CompilationEngine::new(Tokenizer::new(source), VmWriter::new(&mut out));
		engine.compile_class().unwrap();
		String::from_utf8(out).unwrap().lines().map(|line| line.trim_end().to_owned()).collect()
	}

	fn compile_err(source: &str) -> JackError {
		let mut out = Vec::new();
		let engine = CompilationEngine::new(Tokenizer::new(source), VmWriter::new(&mut out));
		engine.compile_class().unwrap_err()
	}

	#[test]
	fn empty_class_emits_nothing() {
		assert!(compile("class Main {}").is_empty());
	}

	#[test]
	fn void_function_returns_zero() {
		let vm = compile("class A { function void f() { return; } }");
		assert_eq!(vm, vec!["function A.f 0", "push constant 0", "return"]);
	}

	#[test]
	fn constructor_allocates_fields() {
		let vm = compile("class P { field int x; constructor P new(int v) { let x = v; return this; } }");
		assert_eq!(vm, vec![
			"function P.new 0",
			"push constant 1",
			"call Memory.alloc 1",
			"pop pointer 0",
			"push argument 0",
			"pop this 0",
			"push pointer 0",
			"return",
		]);
	}

	#[test]
	fn method_binds_this_and_adds() {
		let vm = compile("class M { field int a; method int get(int b) { return a + b; } }");
		assert_eq!(vm, vec![
			"function M.get 0",
			"push argument 0",
			"pop pointer 0",
			"push this 0",
			"push argument 1",
			"add",
			"return",
		]);
	}

	#[test]
	fn while_loop_numbers_exit_label_first() {
		let vm = compile(
			"class L { function void f() { var int i; let i = 0; while (i < 10) { let i = i + 1; } return; } }",
		);
		assert_eq!(vm, vec![
			"function L.f 1",
			"push constant 0",
			"pop local 0",
			"label LABEL_1",
			"push local 0",
			"push constant 10",
			"lt",
			"not",
			"if-goto LABEL_0",
			"push local 0",
			"push constant 1",
			"add",
			"pop local 0",
			"goto LABEL_1",
			"label LABEL_0",
			"push constant 0",
			"return",
		]);
	}

	#[test]
	fn array_assignment_round_trips_through_temp() {
		let vm = compile("class Z { function void f(Array a) { let a[3] = 7; return; } }");
		assert_eq!(vm, vec![
			"function Z.f 0",
			"push argument 0",
			"push constant 3",
			"add",
			"push constant 7",
			"pop temp 0",
			"pop pointer 1",
			"push temp 0",
			"pop that 0",
			"push constant 0",
			"return",
		]);
	}

	#[test]
	fn array_read() {
		let vm = compile("class Z { function int f(Array a) { return a[2]; } }");
		assert_eq!(vm, vec![
			"function Z.f 0",
			"push argument 0",
			"push constant 2",
			"add",
			"pop pointer 1",
			"push that 0",
			"return",
		]);
	}

	#[test]
	fn class_call_and_own_call() {
		let vm = compile("class C { function void f() { do Math.abs(1); do C.f(); return; } }");
		for line in ["push constant 1", "call Math.abs 1", "pop temp 0", "call C.f 0"] {
			assert!(vm.iter().any(|emitted| emitted == line), "missing {line}");
		}
	}

	#[test]
	fn bare_call_is_method_on_this() {
		let vm = compile("class C { method void f() { do g(1, 2); return; } method void g(int a, int b) { return; } }");
		assert_eq!(vm[3..9].to_vec(), vec![
			"push pointer 0",
			"push constant 1",
			"push constant 2",
			"call C.g 3",
			"pop temp 0",
			"push constant 0",
		]);
	}

	#[test]
	fn method_call_on_field_pushes_receiver_first() {
		let vm = compile("class C { field Point p; method void f() { do p.draw(9); return; } }");
		assert_eq!(vm[3..8].to_vec(), vec![
			"push this 0",
			"push constant 9",
			"call Point.draw 2",
			"pop temp 0",
			"push constant 0",
		]);
	}

	#[test]
	fn if_else_labels() {
		let vm = compile("class I { function int f(int x) { if (x) { return 1; } else { return 2; } return 0; } }");
		assert_eq!(vm, vec![
			"function I.f 0",
			"push argument 0",
			"not",
			"if-goto LABEL_0",
			"push constant 1",
			"return",
			"goto LABEL_1",
			"label LABEL_0",
			"push constant 2",
			"return",
			"label LABEL_1",
			"push constant 0",
			"return",
		]);
	}

	#[test]
	fn nested_control_flow_labels_stay_unique() {
		let vm = compile(
			"class N { function void f(int x) { while (x) { if (x) { let x = 0; } while (x) { let x = 0; } } return; } }",
		);
		let mut labels: Vec<&String> =
			vm.iter().filter(|line| line.starts_with("label ")).collect();
		let total = labels.len();
		labels.sort();
		labels.dedup();
		assert_eq!(labels.len(), total);
	}

	#[test]
	fn expressions_evaluate_left_to_right() {
		// no precedence: 1 + 2 * 3 is (1 + 2) * 3
		let vm = compile("class E { function int f() { return 1 + 2 * 3; } }");
		assert_eq!(vm, vec![
			"function E.f 0",
			"push constant 1",
			"push constant 2",
			"add",
			"push constant 3",
			"call Math.multiply 2",
			"return",
		]);
	}

	#[test]
	fn keyword_constants_and_unary() {
		let vm = compile("class K { function int f(int x) { return true & ~(null = false) | -x; } }");
		assert_eq!(vm, vec![
			"function K.f 0",
			"push constant 0",
			"not",
			"push constant 0",
			"push constant 0",
			"eq",
			"not",
			"and",
			"push argument 0",
			"neg",
			"or",
			"return",
		]);
	}

	#[test]
	fn string_literal_builds_string_object() {
		let vm = compile("class S { function void f() { do Output.printString(\"abc\"); return; } }");
		assert_eq!(vm[1..9].to_vec(), vec![
			"push constant 3",
			"call String.new 1",
			"push constant 97",
			"call String.appendChar 2",
			"push constant 98",
			"call String.appendChar 2",
			"push constant 99",
			"call String.appendChar 2",
		]);
	}

	#[test]
	fn statics_use_the_static_segment() {
		let vm = compile("class G { static int counter; function void bump() { let counter = counter + 1; return; } }");
		assert_eq!(vm[1..5].to_vec(), vec![
			"push static 0",
			"push constant 1",
			"add",
			"pop static 0",
		]);
	}

	#[test]
	fn every_function_line_reaches_a_return() {
		let vm = compile(
			"class F { function void a() { return; } method int b() { return 1; } constructor F c() { return this; } }",
		);
		let functions = vm.iter().filter(|line| line.starts_with("function ")).count();
		let returns = vm.iter().filter(|line| *line == "return").count();
		assert_eq!(functions, 3);
		assert_eq!(returns, 3);
	}

	#[test]
	fn missing_semicolon_is_a_parse_error() {
		let err = compile_err("class A { function void f() { return } }");
		assert!(matches!(err, JackError::ParseError(_)), "{err}");
	}

	#[test]
	fn class_name_must_be_an_identifier() {
		let err = compile_err("class 3 {}");
		assert!(matches!(err, JackError::ParseError(_)), "{err}");
		assert!(err.to_string().contains("class name"), "{err}");
	}

	#[test]
	fn declaration_names_must_be_identifiers() {
		for source in [
			"class A { field int 5; }",
			"class A { function void f(int 5) { return; } }",
			"class A { function void f() { var int 5; return; } }",
			"class A { function void f() { let 5 = 1; return; } }",
		] {
			let err = compile_err(source);
			assert!(matches!(err, JackError::ParseError(_)), "{source}: {err}");
			assert!(err.to_string().contains("variable name"), "{source}: {err}");
		}
	}

	#[test]
	fn subroutine_name_must_be_an_identifier() {
		let err = compile_err("class A { function void 5() { return; } }");
		assert!(matches!(err, JackError::ParseError(_)), "{err}");
		assert!(err.to_string().contains("subroutine name"), "{err}");
	}

	#[test]
	fn undefined_variable_is_reported_with_its_line() {
		let err = compile_err("class A {\n\tfunction void f() {\n\t\tlet ghost = 1;\n\t\treturn;\n\t}\n}");
		assert!(matches!(err, JackError::ParseError(_)), "{err}");
		assert!(err.to_string().contains("line 3"), "{err}");
		assert!(err.to_string().contains("ghost"), "{err}");
	}

	#[test]
	fn stray_input_after_class_is_rejected() {
		let err = compile_err("class A {} class B {}");
		assert!(err.to_string().contains("Unexpected tokens"), "{err}");
	}
}
