use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// One classified specification line. The first token of a line selects the
/// variant: `#` declares a chapter, `##` a subchapter, `###` a problem, and
/// any other token is itself the problem number of a bare problem line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
	Chapter { number: String, title: String },
	Subchapter { number: String, title: String },
	Problem { number: String, parts: String },
	/// A line with no tokens at all. Silently skipped by the compiler.
	Blank,
}

/// A reason a single specification line could not be classified. These are
/// recoverable: the compiler records them as warnings and keeps going with
/// the next line, leaving hierarchy state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DirectiveError {
	#[error("chapter directive expects a number and a title")]
	ChapterArity,

	#[error("subchapter directive expects a number and a title")]
	SubchapterArity,

	#[error("problem directive expects a number and optional part letters")]
	ProblemArity,

	#[error("part letters must all be lowercase ascii letters: `{0}`")]
	InvalidParts(String),
}

/// Split a line on whitespace into at most three tokens. The third token is
/// the untouched remainder of the line (minus trailing whitespace), so
/// chapter and subchapter titles may contain spaces.
fn split_tokens(line: &str) -> Vec<&str> {
	let mut tokens = Vec::with_capacity(3);
	let mut rest = line.trim_start();

	while tokens.len() < 2 && !rest.is_empty() {
		match rest.find(char::is_whitespace) {
			Some(end) => {
				tokens.push(&rest[..end]);
				rest = rest[end..].trim_start();
			}
			None => {
				tokens.push(rest);
				rest = "";
			}
		}
	}

	let rest = rest.trim_end();
	if !rest.is_empty() {
		tokens.push(rest);
	}

	tokens
}

fn problem(number: &str, parts: &str) -> Result<Directive, DirectiveError> {
	if !parts.chars().all(|c| c.is_ascii_lowercase()) {
		return Err(DirectiveError::InvalidParts(parts.to_string()));
	}
	Ok(Directive::Problem {
		number: number.to_string(),
		parts: parts.to_string(),
	})
}

/// Classify one specification line.
///
/// Marker lines (`#`, `##`) require exactly a number and a title. Problem
/// lines (`###` or bare) take a number and optionally a string of lowercase
/// part letters; anything beyond that, or any non-lowercase character in the
/// letters, is a [`DirectiveError`].
pub fn parse_directive(line: &str) -> Result<Directive, DirectiveError> {
	let tokens = split_tokens(line);

	match tokens.as_slice() {
		[] => Ok(Directive::Blank),
		["#", number, title] => {
			Ok(Directive::Chapter {
				number: (*number).to_string(),
				title: (*title).to_string(),
			})
		}
		["#", ..] => Err(DirectiveError::ChapterArity),
		["##", number, title] => {
			Ok(Directive::Subchapter {
				number: (*number).to_string(),
				title: (*title).to_string(),
			})
		}
		["##", ..] => Err(DirectiveError::SubchapterArity),
		["###", number] => problem(number, ""),
		["###", number, parts] => problem(number, parts),
		["###"] => Err(DirectiveError::ProblemArity),
		[number] => problem(number, ""),
		[number, parts] => problem(number, parts),
		// A bare problem line with a third token has too many tokens.
		_ => Err(DirectiveError::ProblemArity),
	}
}

/// Identity of one generated problem file: the current chapter and
/// subchapter at the time its directive was seen, its declared number, and
/// its part letters. Two directives resolving to the same identity address
/// the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemIdentity {
	/// `None` until some chapter directive has been seen; rendered as the
	/// literal text `None` in the identifier in that degenerate case.
	pub chapter: Option<String>,
	pub subchapter: Option<String>,
	pub problem: String,
	pub parts: String,
}

impl ProblemIdentity {
	/// The canonical identifier, e.g. chapter `1`, subchapter `2`, problem
	/// `3` with parts `ab` → `1.2.3ab`. This is both the file name stem and
	/// the token embedded in the root document's `\subfile` reference.
	pub fn identifier(&self) -> String {
		format!(
			"{}.{}.{}{}",
			self.chapter.as_deref().unwrap_or("None"),
			self.subchapter.as_deref().unwrap_or("None"),
			self.problem,
			self.parts,
		)
	}

	pub fn file_name(&self) -> String {
		format!("{}.tex", self.identifier())
	}
}

/// The running chapter/subchapter state of one compile run. Chapter and
/// subchapter directives overwrite their field; problem directives read
/// both. A new chapter does not reset the current subchapter.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
	chapter: Option<String>,
	subchapter: Option<String>,
}

impl Hierarchy {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_chapter(&mut self, number: &str) {
		self.chapter = Some(number.to_string());
	}

	pub fn set_subchapter(&mut self, number: &str) {
		self.subchapter = Some(number.to_string());
	}

	pub fn chapter(&self) -> Option<&str> {
		self.chapter.as_deref()
	}

	pub fn subchapter(&self) -> Option<&str> {
		self.subchapter.as_deref()
	}

	/// Resolve a problem directive against the current hierarchy state.
	pub fn resolve(&self, number: &str, parts: &str) -> ProblemIdentity {
		ProblemIdentity {
			chapter: self.chapter.clone(),
			subchapter: self.subchapter.clone(),
			problem: number.to_string(),
			parts: parts.to_string(),
		}
	}
}
