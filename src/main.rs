use jackc::Jackc;
use palc::Parser;

fn main() {
	simple_logger::SimpleLogger::new().env().init().unwrap();

	let cli = jackc::cli::Cli::parse();
	if let Err(e) = Jackc.run_path(&cli.path) {
		eprintln!("Failed to compile {}: {e}", cli.path.display());
		std::process::exit(1);
	}
}
