use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::tokenizer::{Tokenizer, Whitespace};

/// Default number of tokens pulled from the chain.
pub const DEFAULT_WORDS_COUNT: usize = 200;

/// Default window width (context tokens plus one successor).
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Parameters of a single generation run.
///
/// Every field falls back to its default when missing from a deserialized
/// source, so a configuration file only needs to name what it changes.
///
/// # Invariants
/// - `sample_size >= 2` once `validate` has passed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateOptions {
	/// Text the chain starts from. Empty means a random context of the model.
	pub start: String,

	/// Exact number of generation steps, empty predictions included.
	pub words_count: usize,

	/// Window width used to build the model: `sample_size - 1` tokens of
	/// context predict one token.
	pub sample_size: usize,

	/// What the tokenizer does with the text between recognized tokens.
	pub whitespace: Whitespace,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		Self {
			start: String::new(),
			words_count: DEFAULT_WORDS_COUNT,
			sample_size: DEFAULT_SAMPLE_SIZE,
			whitespace: Whitespace::default(),
		}
	}
}

impl GenerateOptions {
	/// Checks the parameters that do not depend on the corpus.
	///
	/// # Errors
	/// Returns an error if `sample_size < 2`.
	pub fn validate(&self) -> Result<()> {
		if self.sample_size < 2 {
			bail!("sample size must not be less than 2, got {}", self.sample_size);
		}
		Ok(())
	}

	/// Builds the tokenizer matching these options.
	pub fn tokenizer(&self) -> Tokenizer {
		Tokenizer::new(self.whitespace)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let options = GenerateOptions::default();
		assert_eq!(options.start, "");
		assert_eq!(options.words_count, 200);
		assert_eq!(options.sample_size, 3);
		assert_eq!(options.whitespace, Whitespace::Drop);
		assert!(options.validate().is_ok());
	}

	#[test]
	fn test_validate_sample_size() {
		for sample_size in [0, 1] {
			let options = GenerateOptions { sample_size, ..Default::default() };
			let err = options.validate().unwrap_err();
			assert!(err.to_string().contains("sample size"));
		}
		let options = GenerateOptions { sample_size: 2, ..Default::default() };
		assert!(options.validate().is_ok());
	}
}
