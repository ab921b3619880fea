use std::{
	fs::{self, File},
	io::{BufWriter, Write},
	path::Path,
};

use log::{error, info, warn};

use crate::{JackError, engine::CompilationEngine, tokenizer::Tokenizer, vm_writer::VmWriter};

/// Compiler driver: maps `.jack` sources to sibling `.vm` files.
pub struct Jackc;

impl Jackc {
	/// Compiles whatever `path` names: a `.jack` file on its own, a
	/// directory file by file. Anything else is rejected.
	pub fn run_path(&self, path: &Path) -> crate::Result<()> {
		if path.is_dir() {
			self.run_dir(path)
		} else if path.extension().and_then(|ext| ext.to_str()) == Some("jack") && path.is_file() {
			self.run_file(path)
		} else {
			Err(anyhow::anyhow!("{} is neither a .jack file nor a directory", path.display()).into())
		}
	}

	/// Compiles every immediate `.jack` child of `dir` in file-name order.
	/// A failing file does not stop the others; the run fails if any did.
	pub fn run_dir(&self, dir: &Path) -> crate::Result<()> {
		let mut sources: Vec<_> = fs::read_dir(dir)
			.map_err(JackError::UnreadableInput)?
			.filter_map(|entry| entry.ok())
			.map(|entry| entry.path())
			.filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("jack"))
			.collect();
		sources.sort();
		if sources.is_empty() {
			warn!("no .jack files found in {}", dir.display());
			return Ok(());
		}

		let mut failed = 0;
		for source in &sources {
			if let Err(e) = self.run_file(source) {
				error!("{}: {e}", source.display());
				failed += 1;
			}
		}
		if failed > 0 { Err(JackError::FailedFiles(failed)) } else { Ok(()) }
	}

	/// Compiles one `.jack` file into its sibling `.vm` file.
	pub fn run_file(&self, path: &Path) -> crate::Result<()> {
		info!("compiling {}", path.display());
		let source = fs::read_to_string(path).map_err(JackError::UnreadableInput)?;
		let out = File::create(path.with_extension("vm")).map_err(JackError::UnwritableOutput)?;
		self.compile(&source, BufWriter::new(out))
	}

	/// Runs one tokenizer and engine session over an arbitrary sink.
	pub fn compile<W: Write>(&self, source: &str, out: W) -> crate::Result<()> {
		let tokenizer = Tokenizer::new(source);
		CompilationEngine::new(tokenizer, VmWriter::new(out)).compile_class()
	}
}
