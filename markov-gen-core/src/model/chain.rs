use anyhow::{Result, bail};
use rand::Rng;

use super::transitions::TransitionModel;
use crate::tokenizer::{Token, Tokenizer};

/// Builds the initial chain.
///
/// A non-empty `start_text` is tokenized as is. Otherwise a context is drawn
/// uniformly from the model and tokenized back into its parts.
///
/// # Errors
/// Returns an error if a random context is needed and the model is empty.
pub fn create_chain<R: Rng + ?Sized>(
	start_text: &str,
	transitions: &TransitionModel,
	tokenizer: &Tokenizer,
	rng: &mut R,
) -> Result<Vec<Token>> {
	if !start_text.is_empty() {
		return Ok(tokenizer.tokenize(start_text));
	}

	match transitions.get_random_seed(rng) {
		Some(seed) => Ok(tokenizer.tokenize(seed)),
		None => bail!("transition model is empty, cannot pick a random start"),
	}
}

/// Lazy, unbounded producer of tokens walking a `TransitionModel`.
///
/// Each call to `next` predicts one token from the last `sample_size - 1`
/// tokens of the chain:
/// - on success the token is appended to the chain and returned
/// - on failure the last token of the chain is dropped (backtracking) and an
///   empty token is returned
///
/// Backtracking shortens the lookup context for the following attempts. The
/// chain may shrink all the way to empty, in which case every further step
/// yields an empty token. The iterator never returns `None`; callers bound it
/// with `take`.
#[derive(Debug)]
pub struct Chain<'m, R> {
	transitions: &'m TransitionModel,
	sample_size: usize,
	tokens: Vec<Token>,
	rng: R,
}

impl<'m, R: Rng> Chain<'m, R> {
	/// Seeds a chain from `start_text` (see `create_chain`).
	///
	/// # Errors
	/// Returns an error if `start_text` is empty and the model has no context.
	pub fn new(
		start_text: &str,
		transitions: &'m TransitionModel,
		sample_size: usize,
		tokenizer: &Tokenizer,
		mut rng: R,
	) -> Result<Self> {
		let tokens = create_chain(start_text, transitions, tokenizer, &mut rng)?;
		log::debug!("chain seeded with {} tokens", tokens.len());
		Ok(Self::from_tokens(tokens, transitions, sample_size, rng))
	}

	/// Starts a chain from already tokenized text.
	pub fn from_tokens(
		tokens: Vec<Token>,
		transitions: &'m TransitionModel,
		sample_size: usize,
		rng: R,
	) -> Self {
		Self { transitions, sample_size, tokens, rng }
	}

	/// Current content of the chain.
	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// The lookup key: the last `sample_size - 1` tokens, joined.
	///
	/// Shorter chains contribute all of their tokens.
	pub fn context(&self) -> String {
		let width = self.sample_size.saturating_sub(1);
		let from = self.tokens.len().saturating_sub(width);
		self.tokens[from..].concat()
	}

	/// Predicts the next token without touching the chain.
	///
	/// Returns `None` if the current context was never observed.
	pub fn predict_next(&mut self) -> Option<Token> {
		let context = self.context();
		self.transitions.predict(&context, &mut self.rng).cloned()
	}

	/// Runs one generation step and returns the produced token, empty when
	/// nothing could be predicted.
	pub fn step(&mut self) -> Token {
		match self.predict_next() {
			Some(token) => {
				self.tokens.push(token.clone());
				token
			}
			None => {
				let dropped = self.tokens.pop();
				log::trace!("no successor for {:?}, dropped {:?}", self.context(), dropped);
				Token::new()
			}
		}
	}
}

impl<R: Rng> Iterator for Chain<'_, R> {
	type Item = Token;

	fn next(&mut self) -> Option<Token> {
		Some(self.step())
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(usize::MAX, None)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tokenizer::tokenize;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn model(text: &str, sample_size: usize) -> TransitionModel {
		TransitionModel::build(&tokenize(text), sample_size)
	}

	#[test]
	fn test_create_chain_from_start_text() {
		let transitions = model("a b a b a", 2);
		let mut rng = StdRng::seed_from_u64(3);
		let chain = create_chain("b, a", &transitions, &Tokenizer::default(), &mut rng).unwrap();
		assert_eq!(chain, vec!["b", ",", "a"]);
	}

	#[test]
	fn test_create_chain_from_random_context() {
		let transitions = model("one two three four", 3);
		let mut rng = StdRng::seed_from_u64(3);
		let chain = create_chain("", &transitions, &Tokenizer::default(), &mut rng).unwrap();
		let seed = chain.concat();
		assert!(transitions.get(&seed).is_some(), "unknown seed {seed:?}");
	}

	#[test]
	fn test_create_chain_empty_model() {
		let transitions = TransitionModel::default();
		let mut rng = StdRng::seed_from_u64(3);
		assert!(create_chain("", &transitions, &Tokenizer::default(), &mut rng).is_err());
		// An explicit start does not need the model.
		assert!(create_chain("go", &transitions, &Tokenizer::default(), &mut rng).is_ok());
	}

	#[test]
	fn test_alternates_deterministically() {
		let transitions = model("a b a b a", 2);
		let chain = Chain::new("a", &transitions, 2, &Tokenizer::default(), StdRng::seed_from_u64(0)).unwrap();
		let tokens: Vec<Token> = chain.take(6).collect();
		assert_eq!(tokens, vec!["b", "a", "b", "a", "b", "a"]);
	}

	#[test]
	fn test_context_uses_last_tokens() {
		let transitions = model("a b c d", 3);
		let tokens = tokenize("x y z");
		let chain = Chain::from_tokens(tokens, &transitions, 3, StdRng::seed_from_u64(0));
		assert_eq!(chain.context(), "yz");

		let short = Chain::from_tokens(tokenize("z"), &transitions, 3, StdRng::seed_from_u64(0));
		assert_eq!(short.context(), "z");
	}

	#[test]
	fn test_backtracks_on_dead_end() {
		// "bc" is the last context and has no successor.
		let transitions = model("a b c", 3);
		let mut chain = Chain::new("a b", &transitions, 3, &Tokenizer::default(), StdRng::seed_from_u64(0)).unwrap();

		assert_eq!(chain.step(), "c");
		assert_eq!(chain.tokens(), ["a", "b", "c"]);

		assert_eq!(chain.step(), "");
		assert_eq!(chain.tokens(), ["a", "b"]);

		// Back on a known context.
		assert_eq!(chain.step(), "c");
	}

	#[test]
	fn test_exhausted_chain_keeps_yielding_empty_tokens() {
		let transitions = model("a b c", 3);
		let chain = Chain::new("zzz", &transitions, 3, &Tokenizer::default(), StdRng::seed_from_u64(0)).unwrap();
		let tokens: Vec<Token> = chain.take(5).collect();
		assert_eq!(tokens, vec!["", "", "", "", ""]);
	}

	#[test]
	fn test_never_ends() {
		let transitions = model("a b c", 2);
		let chain = Chain::new("a", &transitions, 2, &Tokenizer::default(), StdRng::seed_from_u64(0)).unwrap();
		assert_eq!(chain.take(50).count(), 50);
	}
}
