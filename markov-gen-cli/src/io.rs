use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use markov_gen_core::GenerateOptions;

/// Corpus used when no path is given on the command line.
pub(crate) const DEFAULT_CORPUS: &str = "assets/example.txt";

/// Resolves the corpus path.
///
/// - An explicit path is returned as-is (not canonicalized)
/// - Otherwise the bundled example is looked up next to the crate manifest,
///   then relative to the working directory
///
/// The manifest directory is the one of the build machine, baked in at
/// compile time. It only resolves for `cargo run` and tests; an installed
/// binary falls back to `assets/example.txt` under the working directory.
pub(crate) fn corpus_path(input: Option<PathBuf>) -> PathBuf {
	if let Some(path) = input {
		return path;
	}
	let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CORPUS);
	if bundled.is_file() {
		bundled
	} else {
		PathBuf::from(DEFAULT_CORPUS)
	}
}

/// Reads the whole corpus file as UTF-8 text.
pub(crate) fn read_corpus<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	fs::read_to_string(path).with_context(|| format!("failed to read corpus {}", path.display()))
}

/// Loads generation options from a TOML file.
///
/// Missing keys keep their defaults; unknown keys are rejected.
pub(crate) fn load_options<P: AsRef<Path>>(path: P) -> Result<GenerateOptions> {
	let path = path.as_ref();
	let contents =
		fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
	parse_options(&contents).with_context(|| format!("invalid config {}", path.display()))
}

pub(crate) fn parse_options(contents: &str) -> Result<GenerateOptions> {
	Ok(toml::from_str(contents)?)
}
