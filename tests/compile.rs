use std::{fs, path::PathBuf};

use jackc::{JackError, Jackc};

fn fixture(name: &str) -> PathBuf { PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join(name) }

/// A scratch directory outside the source tree, one per test.
fn workspace(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join("jackc-tests").join(name);
	fs::create_dir_all(&dir).unwrap();
	dir
}

#[test]
fn compile_a_file_next_to_itself() {
	let dir = workspace("single-file");
	let source = dir.join("Main.jack");
	fs::copy(fixture("Main.jack"), &source).unwrap();

	Jackc.run_file(&source).unwrap();

	let vm = fs::read_to_string(dir.join("Main.vm")).unwrap();
	let lines: Vec<&str> = vm.lines().map(|line| line.trim_end()).collect();
	assert_eq!(lines[0], "function Main.main 2");
	assert!(lines.contains(&"call Output.printInt 1"));
	assert!(lines.contains(&"return"));
	assert!(vm.ends_with('\n'));
}

#[test]
fn compile_a_directory_of_files() {
	let dir = workspace("directory");
	fs::copy(fixture("Main.jack"), dir.join("Main.jack")).unwrap();
	fs::write(dir.join("Empty.jack"), "class Empty {}\n").unwrap();
	fs::write(dir.join("notes.txt"), "not a source file\n").unwrap();

	Jackc.run_path(&dir).unwrap();

	assert!(dir.join("Main.vm").is_file());
	assert!(dir.join("Empty.vm").is_file());
	assert!(!dir.join("notes.vm").exists());
}

#[test]
fn directory_keeps_going_past_a_bad_file() {
	let dir = workspace("bad-file");
	fs::write(dir.join("Bad.jack"), "class Bad { function }\n").unwrap();
	fs::copy(fixture("Main.jack"), dir.join("Main.jack")).unwrap();

	let err = Jackc.run_path(&dir).unwrap_err();
	assert!(matches!(err, JackError::FailedFiles(1)), "{err}");
	// the good file still compiled
	assert!(dir.join("Main.vm").is_file());
}

#[test]
fn reject_a_path_with_the_wrong_extension() {
	let dir = workspace("wrong-extension");
	let path = dir.join("Main.vm");
	fs::write(&path, "").unwrap();
	assert!(matches!(Jackc.run_path(&path), Err(JackError::InternalError(_))));
}

#[test]
fn missing_file_is_unreadable_input() {
	let path = workspace("missing").join("Ghost.jack");
	assert!(matches!(Jackc.run_file(&path), Err(JackError::UnreadableInput(_))));
}
