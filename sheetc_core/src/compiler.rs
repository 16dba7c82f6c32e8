use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use tracing::trace;

use crate::SheetError;
use crate::SheetResult;
use crate::generator::FileOutcome;
use crate::generator::RootSink;
use crate::generator::write_problem_file;
use crate::parser::Directive;
use crate::parser::DirectiveError;
use crate::parser::Hierarchy;
use crate::parser::parse_directive;
use crate::templates;

/// File name of the generated root document inside the destination.
pub const ROOT_FILE_NAME: &str = "main.tex";

/// Name of the subdirectory holding the generated problem files.
pub const PROBLEMS_DIR_NAME: &str = "problems";

/// Options for one compile run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
	/// Path to the specification file.
	pub spec_path: PathBuf,
	/// Destination directory; defaults to the specification file's own
	/// directory when unset.
	pub dest: Option<PathBuf>,
	/// Overwrite existing output files instead of preserving them.
	pub overwrite: bool,
}

impl CompileOptions {
	pub fn new(spec_path: impl Into<PathBuf>) -> Self {
		Self {
			spec_path: spec_path.into(),
			dest: None,
			overwrite: false,
		}
	}

	/// The resolved destination directory.
	pub fn dest_dir(&self) -> PathBuf {
		self.dest.clone().unwrap_or_else(|| {
			self.spec_path
				.parent()
				.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
		})
	}
}

/// One file touched by a run, in encounter order: the root document first,
/// then one entry per problem directive. Duplicate identities produce
/// duplicate entries; the second and later ones are skips unless the run
/// forces overwrites.
#[derive(Debug, Clone, Serialize)]
pub struct FileAction {
	/// Display name of the file (`main.tex` or a problem file name).
	pub file: String,
	pub outcome: FileOutcome,
}

/// A specification line that could not be processed. The run continues past
/// it; hierarchy and generator state are left as they were before the line.
#[derive(Debug, Clone, Serialize)]
pub struct DirectiveWarning {
	/// 1-indexed line number within the specification file.
	pub line_number: usize,
	/// The raw text of the offending line.
	pub line: String,
	pub message: String,
}

/// Result of one compile run.
#[derive(Debug, Serialize)]
pub struct CompileReport {
	/// The document title consumed from the specification's first line.
	pub title: String,
	/// Every file written or skipped, in encounter order.
	pub actions: Vec<FileAction>,
	/// One entry per malformed directive, in encounter order.
	pub warnings: Vec<DirectiveWarning>,
	/// Set when a second malformed directive was seen: accumulated partial
	/// state may make subsequent output unreliable. Advisory only.
	pub degraded: bool,
	pub chapters: usize,
	pub subchapters: usize,
	pub problems_written: usize,
	pub problems_skipped: usize,
}

impl CompileReport {
	fn new(title: &str) -> Self {
		Self {
			title: title.to_string(),
			actions: Vec::new(),
			warnings: Vec::new(),
			degraded: false,
			chapters: 0,
			subchapters: 0,
			problems_written: 0,
			problems_skipped: 0,
		}
	}

	/// Returns true if no malformed directives were encountered.
	pub fn is_clean(&self) -> bool {
		self.warnings.is_empty()
	}

	fn record_warning(&mut self, line_number: usize, line: &str, error: &DirectiveError) {
		// The second failure flips the run into its degraded state; later
		// failures leave the flag as-is.
		if !self.warnings.is_empty() {
			self.degraded = true;
		}
		self.warnings.push(DirectiveWarning {
			line_number,
			line: line.to_string(),
			message: error.to_string(),
		});
	}
}

/// Compile one specification file into a LaTeX skeleton.
///
/// Creates the destination directory and its `problems/` subdirectory,
/// consumes the title line, then processes each remaining line in order:
/// chapter and subchapter directives update the hierarchy and append a
/// header to the root document immediately; problem directives write (or
/// skip) a problem file and then unconditionally append its `\subfile`
/// reference to the root document. Malformed lines become warnings on the
/// report without stopping the run; the root document is finalized even if
/// every directive failed.
///
/// A specification with no title line at all is the one fatal input error.
/// Filesystem errors also abort the run.
pub fn compile(options: &CompileOptions) -> SheetResult<CompileReport> {
	let dest = options.dest_dir();
	fs::create_dir_all(&dest)?;
	let problems_dir = dest.join(PROBLEMS_DIR_NAME);
	fs::create_dir_all(&problems_dir)?;

	let source = fs::read_to_string(&options.spec_path)?;
	let mut lines = source.lines();
	let Some(title) = lines.next() else {
		return Err(SheetError::MissingTitle {
			path: options.spec_path.clone(),
		});
	};

	let mut report = CompileReport::new(title);

	let (mut sink, root_outcome) = RootSink::open(&dest.join(ROOT_FILE_NAME), options.overwrite)?;
	report.actions.push(FileAction {
		file: ROOT_FILE_NAME.to_string(),
		outcome: root_outcome,
	});

	sink.append(templates::MAIN_PREAMBLE)?;
	sink.append("\n")?;
	sink.append(templates::BEGIN_DOCUMENT)?;
	sink.append("\n")?;
	sink.append(&templates::main_front_matter(title))?;
	sink.append("\n")?;

	let mut hierarchy = Hierarchy::new();

	// The title line is line 1; directives start on line 2.
	for (index, line) in lines.enumerate() {
		let directive = match parse_directive(line) {
			Ok(directive) => directive,
			Err(error) => {
				report.record_warning(index + 2, line, &error);
				continue;
			}
		};
		trace!(?directive, "classified directive");

		match directive {
			Directive::Blank => {}
			Directive::Chapter { number, title } => {
				hierarchy.set_chapter(&number);
				sink.append(&templates::chapter_header(&number, &title))?;
				report.chapters += 1;
			}
			Directive::Subchapter { number, title } => {
				hierarchy.set_subchapter(&number);
				sink.append(&templates::subchapter_header(&number, &title))?;
				report.subchapters += 1;
			}
			Directive::Problem { number, parts } => {
				let identity = hierarchy.resolve(&number, &parts);
				let outcome = write_problem_file(&problems_dir, &identity, options.overwrite)?;
				report.actions.push(FileAction {
					file: identity.file_name(),
					outcome,
				});
				if outcome.is_written() {
					report.problems_written += 1;
				} else {
					report.problems_skipped += 1;
				}

				// The reference is appended even when the problem file
				// itself was preserved, so the root document always compiles
				// against whatever content is on disk.
				sink.append(&templates::subfile_reference(&identity.identifier()))?;
			}
		}
	}

	sink.finish()?;
	Ok(report)
}
