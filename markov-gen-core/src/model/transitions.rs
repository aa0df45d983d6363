use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::successors::Successors;
use crate::tokenizer::Token;

/// A window of consecutive corpus tokens, split into its context (every
/// token but the last) and its successor (the last token).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample<'a> {
	prefix: &'a [Token],
	successor: &'a Token,
}

impl<'a> Sample<'a> {
	/// Splits a window into prefix and successor.
	///
	/// Returns `None` for an empty window.
	pub fn new(window: &'a [Token]) -> Option<Self> {
		let (successor, prefix) = window.split_last()?;
		Some(Self { prefix, successor })
	}

	/// The prefix tokens concatenated without separator.
	pub fn context(&self) -> String {
		self.prefix.concat()
	}

	/// The last token of the window.
	pub fn successor(&self) -> &'a Token {
		self.successor
	}

	/// Number of tokens in the window, successor included.
	pub fn len(&self) -> usize {
		self.prefix.len() + 1
	}

	/// Always `false`: a sample holds at least its successor.
	pub fn is_empty(&self) -> bool {
		false
	}
}

/// Cuts `corpus` into every contiguous window of `sample_size` tokens.
///
/// Windows are produced in corpus order, one per starting index; windows
/// that would run past the end are discarded, so a corpus of `N` tokens
/// yields `max(0, N - sample_size + 1)` samples.
///
/// A `sample_size` of 0 yields no samples.
pub fn slice_corpus(corpus: &[Token], sample_size: usize) -> Vec<Sample<'_>> {
	if sample_size == 0 {
		return Vec::new();
	}
	corpus.windows(sample_size).filter_map(Sample::new).collect()
}

/// Aggregates samples into a transition model.
///
/// With a `sample_size` of 1 every context is the empty string, and the model
/// degenerates to a single list holding the whole corpus.
pub fn collect_transitions<'a, I>(samples: I) -> TransitionModel
where
	I: IntoIterator<Item = Sample<'a>>,
{
	let mut model = TransitionModel::default();
	for sample in samples {
		model.add_sample(&sample);
	}
	model
}

/// Maps each context to the tokens observed right after it.
///
/// # Responsibilities
/// - Accumulate successors for each context, in corpus order
/// - Pick a random context to seed a chain
/// - Predict a successor for a given context
///
/// # Invariants
/// - Each key of `states` is the joined prefix of the samples it collected
/// - Every stored `Successors` holds at least one token
///
/// Contexts are kept ordered so that a seeded random source gives the same
/// draws in every process.
#[derive(Clone, Debug, Default)]
pub struct TransitionModel {
	states: BTreeMap<String, Successors>,
}

impl TransitionModel {
	/// Slices `corpus` and collects its transitions in one go.
	pub fn build(corpus: &[Token], sample_size: usize) -> Self {
		let model = collect_transitions(slice_corpus(corpus, sample_size));
		log::debug!(
			"built transition model: {} tokens, sample size {}, {} contexts",
			corpus.len(),
			sample_size,
			model.len()
		);
		model
	}

	/// Records the successor of `sample` under its context.
	pub fn add_sample(&mut self, sample: &Sample<'_>) {
		let context = sample.context();
		self.states
			.entry(context)
			.or_default()
			.add_transition(sample.successor());
	}

	/// Returns the successors of `context`, if it was ever observed.
	pub fn get(&self, context: &str) -> Option<&Successors> {
		self.states.get(context)
	}

	/// Draws a successor for `context`.
	///
	/// Returns `None` if the context is unknown.
	pub fn predict<R: Rng + ?Sized>(&self, context: &str, rng: &mut R) -> Option<&Token> {
		self.states.get(context)?.predict(rng)
	}

	/// Returns a context picked uniformly among all known contexts.
	///
	/// Returns `None` if the model is empty.
	pub fn get_random_seed<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.states.keys().choose(rng).map(String::as_str)
	}

	/// Iterates over the known contexts in order.
	pub fn contexts(&self) -> impl Iterator<Item = &str> {
		self.states.keys().map(String::as_str)
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}
