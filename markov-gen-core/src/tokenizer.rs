use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An atomic unit of text: a word, a hyphenated compound, an ellipsis,
/// a punctuation mark or the paragraph placeholder.
pub type Token = String;

/// Reserved character standing for a paragraph break inside a token stream.
pub const PARAGRAPH_PLACEHOLDER: char = '§';

/// What a paragraph placeholder turns back into.
pub const PARAGRAPH_BREAK: &str = "\n\n";

const ELLIPSIS: &str = r"\.{3}";
const WORD: &str = "[a-zA-Zа-яА-ЯёЁ]+";
const PUNCTUATION: &str = r#"\[\](){}!?.,:;'"\\/*\&\^%$_+\-–—=<>@|\~"#;

/// A newline followed by any run of whitespace (further newlines included).
static NEWLINES: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\n\s*").expect("newline pattern is valid"));

/// Ordered alternation: the first branch that matches at a position wins.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
	let pattern = format!(
		"{PARAGRAPH_PLACEHOLDER}|{ELLIPSIS}|{WORD}-{WORD}|{WORD}|[{PUNCTUATION}]"
	);
	Regex::new(&pattern).expect("token pattern is valid")
});

/// Policy for the text found between two recognized tokens.
///
/// # Variants
/// - `Drop`: whitespace is consumed as a separator. Whatever else sits in the
///   gap (digits, unsupported symbols) is kept, one token per
///   whitespace-separated fragment.
/// - `Preserve`: the gap is kept verbatim as a single token, spaces included,
///   so that `textify` can put the original spacing back.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Whitespace {
	#[default]
	Drop,
	Preserve,
}

/// Splits text into tokens and joins tokens back into text.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tokenizer {
	whitespace: Whitespace,
}

impl Tokenizer {
	/// Creates a tokenizer with the given gap policy.
	pub fn new(whitespace: Whitespace) -> Self {
		Self { whitespace }
	}

	/// Splits `text` into an ordered sequence of tokens.
	///
	/// Every newline followed by optional whitespace collapses into a single
	/// `PARAGRAPH_PLACEHOLDER` token first. The rest of the text is cut on the
	/// token pattern, keeping the matches as tokens. Gaps between matches are
	/// handled according to the `Whitespace` policy. Empty strings are never
	/// emitted.
	pub fn tokenize(&self, text: &str) -> Vec<Token> {
		let placeholder = PARAGRAPH_PLACEHOLDER.to_string();
		let paragraphed = NEWLINES.replace_all(text, placeholder.as_str());

		let mut tokens = Vec::new();
		let mut last = 0;
		for found in TOKEN.find_iter(&paragraphed) {
			self.push_gap(&paragraphed[last..found.start()], &mut tokens);
			tokens.push(found.as_str().to_owned());
			last = found.end();
		}
		self.push_gap(&paragraphed[last..], &mut tokens);

		tokens
	}

	fn push_gap(&self, gap: &str, tokens: &mut Vec<Token>) {
		match self.whitespace {
			Whitespace::Drop => tokens.extend(gap.split_whitespace().map(str::to_owned)),
			Whitespace::Preserve if !gap.is_empty() => tokens.push(gap.to_owned()),
			Whitespace::Preserve => (),
		}
	}
}

/// Tokenizes `text` with the default (`Whitespace::Drop`) policy.
///
/// Example: `"Hello, world!\n\nBye."` → `["Hello", ",", "world", "!", "§", "Bye", "."]`
pub fn tokenize(text: &str) -> Vec<Token> {
	Tokenizer::default().tokenize(text)
}

/// Joins tokens back into text.
///
/// Empty tokens are skipped, the rest are concatenated without separators,
/// and every paragraph placeholder becomes `PARAGRAPH_BREAK`.
pub fn textify<I>(tokens: I) -> String
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	let joined: String = tokens
		.into_iter()
		.filter(|token| !token.as_ref().is_empty())
		.fold(String::new(), |mut text, token| {
			text.push_str(token.as_ref());
			text
		});
	joined.replace(PARAGRAPH_PLACEHOLDER, PARAGRAPH_BREAK)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tokenize_drops_plain_whitespace() {
		let tokens = tokenize("Hello, world!\n\nBye.");
		assert_eq!(tokens, vec!["Hello", ",", "world", "!", "§", "Bye", "."]);
		assert_eq!(textify(&tokens), "Hello,world!\n\nBye.");
	}

	#[test]
	fn test_ellipsis_wins_over_single_dots() {
		assert_eq!(tokenize("Wait... no."), vec!["Wait", "...", "no", "."]);
		assert_eq!(tokenize("...."), vec!["...", "."]);
	}

	#[test]
	fn test_compounds_and_cyrillic() {
		assert_eq!(tokenize("well-known ёлка-палка"), vec!["well-known", "ёлка-палка"]);
		assert_eq!(tokenize("Привет, Мир"), vec!["Привет", ",", "Мир"]);
		// A dangling hyphen is punctuation, not part of a compound.
		assert_eq!(tokenize("half- done"), vec!["half", "-", "done"]);
	}

	#[test]
	fn test_punctuation_set() {
		let symbols = r#"[](){}!?.,:;'"\/*&^%$_+-–—=<>@|~"#;
		let tokens = tokenize(symbols);
		assert_eq!(tokens.len(), symbols.chars().count());
		assert!(tokens.iter().all(|token| token.chars().count() == 1));
	}

	#[test]
	fn test_newline_runs_collapse() {
		let tokens = tokenize("one\ntwo\n \n\t\nthree");
		assert_eq!(tokens, vec!["one", "§", "two", "§", "three"]);
		assert_eq!(textify(&tokens), "one\n\ntwo\n\nthree");
	}

	#[test]
	fn test_unsupported_fragments_are_kept() {
		assert_eq!(tokenize("in 1984 we"), vec!["in", "1984", "we"]);
		assert_eq!(tokenize("a#b"), vec!["a", "#", "b"]);
	}

	#[test]
	fn test_preserve_keeps_gaps() {
		let tokenizer = Tokenizer::new(Whitespace::Preserve);
		let tokens = tokenizer.tokenize("Hello, world!\n\nBye.");
		assert_eq!(tokens, vec!["Hello", ",", " ", "world", "!", "§", "Bye", "."]);
		assert_eq!(textify(&tokens), "Hello, world!\n\nBye.");
	}

	#[test]
	fn test_textify_skips_empty_tokens() {
		assert_eq!(textify(["a", "", "b", "", "§", "c"]), "ab\n\nc");
		assert_eq!(textify(Vec::<String>::new()), "");
	}

	#[test]
	fn test_empty_input() {
		assert!(tokenize("").is_empty());
		assert!(tokenize("   \t ").is_empty());
		assert!(Tokenizer::new(Whitespace::Preserve).tokenize("").is_empty());
	}
}
