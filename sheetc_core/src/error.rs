use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SheetError {
	#[error(transparent)]
	#[diagnostic(code(sheetc::io_error))]
	Io(#[from] std::io::Error),

	#[error("specification file `{}` has no title line", path.display())]
	#[diagnostic(
		code(sheetc::missing_title),
		help("the first line of a specification file is the document title")
	)]
	MissingTitle { path: PathBuf },
}

pub type SheetResult<T> = Result<T, SheetError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
