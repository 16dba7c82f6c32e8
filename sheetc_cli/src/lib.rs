use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Compile a problem sheet specification into a LaTeX skeleton.",
	long_about = "sheetc (sheet compiler) turns a small line-oriented specification of a \
	              hierarchical problem sheet into a LaTeX skeleton: a root document plus one \
	              subfile per problem.\n\nSpecification format:\n  first line        document \
	              title\n  # N TITLE         chapter N\n  ## N TITLE        subchapter N\n  ### N \
	              [letters]   problem N with optional lettered parts\n  N [letters]       bare \
	              problem line, same as above\n\nExisting output files are preserved unless \
	              --force is given."
)]
pub struct SheetcCli {
	/// The specification file to compile.
	#[arg(value_name = "FILE")]
	pub spec: PathBuf,

	/// The directory to compile to. Defaults to the directory containing the
	/// specification file.
	#[arg(long, short, value_name = "DESTINATION")]
	pub output: Option<PathBuf>,

	/// Overwrite existing files. Without this flag, files that already exist
	/// are preserved and reported with a "Not overwriting" notice.
	#[arg(long, short, default_value_t = false)]
	pub force: bool,

	/// Print a run summary after the file notices.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,

	/// Output format for the run report. Use `text` for one notice per file
	/// and warning, or `json` for programmatic consumption.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable notices, one line per file action and warning.
	Text,
	/// The full compile report as a single JSON object.
	Json,
}
