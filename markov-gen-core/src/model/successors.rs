use rand::Rng;
use rand::seq::IndexedRandom;

use crate::tokenizer::Token;

/// Everything observed right after one context.
///
/// A `Successors` list stores the tokens that followed its context in the
/// corpus, in corpus order. Duplicates are
/// kept: a token seen three times is three times as likely to be drawn.
///
/// ## Invariants
/// - Once stored in a `TransitionModel`, the list is never empty
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Successors {
	/// Observed successors, in encounter order.
	tokens: Vec<Token>,
}

impl Successors {
	/// Records one more occurrence of `successor` after this context.
	pub fn add_transition(&mut self, successor: &str) {
		self.tokens.push(successor.to_owned());
	}

	/// Draws a successor uniformly from the list.
	///
	/// Since duplicates are kept, the probability of each distinct token is
	/// proportional to how often it followed the context.
	///
	/// Returns `None` if the list is empty.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		self.tokens.choose(rng)
	}

	/// Observed successors, duplicates included, in corpus order.
	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// Number of observations, duplicates included.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns `true` if nothing was observed yet.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}
