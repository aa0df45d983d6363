use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use markov_gen_core::{GenerateOptions, Whitespace, generate_with};
use rand::SeedableRng;
use rand::rngs::StdRng;

mod io;

/// Number of tokens generated when neither the config nor the flags say otherwise.
const WORDS_COUNT: usize = 300;

/// Sample size used when neither the config nor the flags say otherwise.
const SAMPLE_SIZE: usize = 6;

/// Generate text from a corpus with a token-level Markov chain. Spacing between words is dropped unless --preserve-whitespace is given.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Corpus file (defaults to the bundled example)
	#[arg(value_name = "PATH")]
	path: Option<PathBuf>,
	/// TOML file with generation options
	#[arg(long, short, value_name = "FILE")]
	config: Option<PathBuf>,
	/// Number of tokens to generate
	#[arg(long, short)]
	words: Option<usize>,
	/// Window width; `sample_size - 1` tokens predict the next one
	#[arg(long, short)]
	sample_size: Option<usize>,
	/// Text to start the chain from
	#[arg(long)]
	start: Option<String>,
	/// Seed for reproducible output
	#[arg(long)]
	seed: Option<u64>,
	/// Keep the spacing of the corpus instead of dropping it
	#[arg(long)]
	preserve_whitespace: bool,
	/// Log progress to stderr
	#[arg(long, short)]
	verbose: bool,
}

impl Args {
	/// Defaults, then the config file, then the flags.
	fn options(&self) -> Result<GenerateOptions> {
		let mut options = match &self.config {
			Some(path) => {
				log::info!("reading config {}...", path.display());
				io::load_options(path)?
			}
			None => GenerateOptions {
				words_count: WORDS_COUNT,
				sample_size: SAMPLE_SIZE,
				..GenerateOptions::default()
			},
		};

		if let Some(words) = self.words {
			options.words_count = words;
		}
		if let Some(sample_size) = self.sample_size {
			options.sample_size = sample_size;
		}
		if let Some(start) = &self.start {
			options.start = start.clone();
		}
		if self.preserve_whitespace {
			options.whitespace = Whitespace::Preserve;
		}
		Ok(options)
	}
}

fn main() -> Result<()> {
	let args = Args::parse();

	let level = if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Warn)
		.filter_module("markov_gen", level)
		.filter_module("markov_gen_core", level)
		.parse_default_env()
		.init();

	let options = args.options()?;
	let path = io::corpus_path(args.path.clone());
	log::info!("reading corpus {}...", path.display());
	let source = io::read_corpus(&path)?;

	let text = match args.seed {
		Some(seed) => generate_with(&source, &options, StdRng::seed_from_u64(seed))?,
		None => generate_with(&source, &options, rand::rng())?,
	};
	println!("{text}");

	Ok(())
}
