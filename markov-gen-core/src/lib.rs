//! Token-level Markov chain text generation.
//!
//! This crate learns which token follows which short run of tokens in a
//! source text and walks those statistics to produce new text:
//! - Tokenization into words, compounds, punctuation and paragraph breaks
//! - Transition model construction from fixed-width windows
//! - A lazy chain generator that backtracks on dead ends
//!
//! The crate performs no I/O: callers hand in the corpus as a string and
//! receive the generated text back.

use anyhow::{Result, bail};
use rand::Rng;

/// Tokenizer and its inverse (`tokenize` / `textify`).
pub mod tokenizer;

/// Transition model, chain generator and generation options.
pub mod model;


pub use model::chain::{Chain, create_chain};
pub use model::options::GenerateOptions;
pub use model::transitions::{Sample, TransitionModel, collect_transitions, slice_corpus};
pub use tokenizer::{Token, Tokenizer, Whitespace, textify, tokenize};

/// Generates text from `source` using the thread-local random source.
///
/// See `generate_with` for the details.
///
/// # Errors
/// - `source` is empty
/// - `sample_size < 2`
/// - the corpus has fewer than `sample_size` tokens
pub fn generate(source: &str, start: &str, words_count: usize, sample_size: usize) -> Result<String> {
	let options = GenerateOptions {
		start: start.to_owned(),
		words_count,
		sample_size,
		..GenerateOptions::default()
	};
	generate_with(source, &options, rand::rng())
}

/// Generates text from `source` drawing randomness from `rng`.
///
/// # Behavior
/// - Tokenizes `source` and builds the transition model for `sample_size`.
/// - Seeds a `Chain` with `start` (or a random context when empty).
/// - Pulls exactly `words_count` tokens from the chain. Empty tokens produced
///   while backtracking count toward that number and vanish in `textify`.
///
/// # Errors
/// - `source` is empty
/// - `sample_size < 2`
/// - the corpus has fewer than `sample_size` tokens
pub fn generate_with<R: Rng>(source: &str, options: &GenerateOptions, rng: R) -> Result<String> {
	if source.is_empty() {
		bail!("the source text cannot be empty");
	}
	options.validate()?;

	let tokenizer = options.tokenizer();
	let corpus = tokenizer.tokenize(source);
	let transitions = TransitionModel::build(&corpus, options.sample_size);
	if transitions.is_empty() {
		bail!(
			"source has {} tokens, sample size {} needs at least as many",
			corpus.len(),
			options.sample_size
		);
	}

	let chain = Chain::new(&options.start, &transitions, options.sample_size, &tokenizer, rng)?;
	let tokens: Vec<Token> = chain.take(options.words_count).collect();

	let empty = tokens.iter().filter(|token| token.is_empty()).count();
	log::debug!("generated {} tokens, {} of them empty", tokens.len(), empty);

	Ok(textify(&tokens))
}
