use std::path::PathBuf;

use palc::Parser;

/// CLI arguments
#[derive(Parser)]
#[command(name = "jackc", after_long_help = "Compiles Jack classes into stack-machine VM code.")]
pub struct Cli {
	/// A .jack source file, or a directory whose .jack files are all compiled
	pub path: PathBuf,
}
