use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::SheetResult;
use crate::parser::ProblemIdentity;
use crate::templates;

/// What happened to one output file: either its content was (re)written, or
/// an existing file was preserved because the run was not forcing overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
	Written,
	Skipped,
}

impl FileOutcome {
	pub fn is_written(self) -> bool {
		matches!(self, Self::Written)
	}
}

/// Build the blank enumerate skeleton for a problem's part letters.
///
/// Each letter becomes one blank `\item`. When a letter's zero-based
/// alphabet offset differs from the count of items emitted so far, a
/// `\setcounter{enumi}` reset is emitted first so the item's printed ordinal
/// matches the letter's alphabet position — `ac` skips the `b)` ordinal
/// instead of renumbering. Empty parts produce a single blank line.
///
/// Callers must pass validated part letters (lowercase ascii only).
pub fn part_skeleton(parts: &str) -> String {
	if parts.is_empty() {
		return "\n".to_string();
	}

	let mut skeleton = String::from("\\begin{enumerate}[a)]\n");
	let mut emitted = 0_u32;
	for letter in parts.bytes() {
		debug_assert!(letter.is_ascii_lowercase());
		let offset = u32::from(letter - b'a');
		if offset != emitted {
			skeleton.push_str(&format!("\t\\setcounter{{enumi}}{{{offset}}}\n"));
		}
		skeleton.push_str("\t\\item \n");
		emitted += 1;
	}
	skeleton.push_str("\\end{enumerate}\n");
	skeleton
}

/// Synthesize the full content of one problem file: a standalone `subfiles`
/// compilation unit with a problem heading, the blank part skeleton, and an
/// identical blank skeleton under the solution heading.
pub fn problem_file_content(identity: &ProblemIdentity) -> String {
	let skeleton = part_skeleton(&identity.parts);

	let mut content = String::new();
	content.push_str(templates::PROBLEM_PREAMBLE);
	content.push('\n');
	content.push_str(templates::BEGIN_DOCUMENT);
	content.push('\n');
	content.push_str(&templates::problem_heading(&identity.problem));
	content.push_str(&skeleton);
	content.push('\n');
	content.push_str(templates::SOLUTION_HEADING);
	content.push_str(&skeleton);
	content.push('\n');
	content.push_str(templates::END_DOCUMENT);
	content
}

/// Write one problem file into `problems_dir`, honoring the overwrite
/// policy: an existing file is preserved unless `overwrite` is set. Content
/// is a pure function of the identity, so re-running with `overwrite`
/// regenerates byte-identical files.
pub fn write_problem_file(
	problems_dir: &Path,
	identity: &ProblemIdentity,
	overwrite: bool,
) -> SheetResult<FileOutcome> {
	let path = problems_dir.join(identity.file_name());

	if path.exists() && !overwrite {
		debug!(file = %path.display(), "preserving existing problem file");
		return Ok(FileOutcome::Skipped);
	}

	debug!(file = %path.display(), "writing problem file");
	std::fs::write(&path, problem_file_content(identity))?;
	Ok(FileOutcome::Written)
}

/// The root document resource for one compile run.
///
/// When the root document is to be written this wraps a buffered file
/// writer; when an existing root is preserved it becomes a discard sink
/// behind the same interface, so header and reference appends need no
/// special-casing at each call site (and no OS null device is involved).
#[derive(Debug)]
pub enum RootSink {
	File(BufWriter<File>),
	Discard,
}

impl RootSink {
	/// Open the root document at `path` per the overwrite policy. Returns
	/// the sink together with the outcome to report for the file.
	pub fn open(path: &Path, overwrite: bool) -> SheetResult<(Self, FileOutcome)> {
		if path.exists() && !overwrite {
			debug!(file = %path.display(), "preserving existing root document");
			return Ok((Self::Discard, FileOutcome::Skipped));
		}

		debug!(file = %path.display(), "writing root document");
		let file = File::create(path)?;
		Ok((Self::File(BufWriter::new(file)), FileOutcome::Written))
	}

	pub fn append(&mut self, content: &str) -> SheetResult<()> {
		match self {
			Self::File(writer) => writer.write_all(content.as_bytes())?,
			Self::Discard => {}
		}
		Ok(())
	}

	/// Finalize the root document: append the closing `\end{document}` and
	/// flush. Dropping the sink without calling this still closes the file,
	/// but leaves the document unterminated.
	pub fn finish(mut self) -> SheetResult<()> {
		self.append("\n")?;
		self.append(templates::END_DOCUMENT)?;
		if let Self::File(writer) = &mut self {
			writer.flush()?;
		}
		Ok(())
	}
}
