//! `sheetc_core` is the core library for the [sheetc](https://github.com/sheetc/sheetc)
//! problem-sheet compiler. It turns a small line-oriented specification of a
//! hierarchical problem sheet (chapters, subchapters, problems, lettered
//! sub-parts) into a LaTeX skeleton: one root document plus one subfile per
//! problem, cross-referenced by inclusion.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Specification file
//!   → title line (consumed once into the root document)
//!   → parser (classifies each remaining line as a directive)
//!   → hierarchy tracker (carries the current chapter/subchapter forward)
//!   → generator (synthesizes problem files, honors the overwrite policy)
//!   → compiler (drives the loop, collects notices and warnings)
//! ```
//!
//! ## Modules
//!
//! - [`parser`] — Directive classification and the running chapter/subchapter
//!   state that resolves each problem line into a [`ProblemIdentity`].
//! - [`generator`] — Problem-file synthesis, the lettered enumerate skeleton,
//!   and the skip-if-exists overwrite policy shared with the root document.
//! - [`compiler`] — The one-shot compile run over a specification file,
//!   producing a [`CompileReport`] of file actions and directive warnings.
//! - [`templates`] — The literal LaTeX text emitted into generated files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use sheetc_core::CompileOptions;
//! use sheetc_core::compile;
//!
//! let options = CompileOptions::new(PathBuf::from("sheet.spec"));
//! let report = compile(&options).unwrap();
//! for warning in &report.warnings {
//! 	eprintln!("line {}: {}", warning.line_number, warning.message);
//! }
//! ```
//!
//! Malformed directives never abort a run: they are collected as warnings on
//! the report, and the second one flips the report's `degraded` flag.

pub use compiler::*;
pub use error::*;
pub use generator::*;
pub use parser::*;

pub mod compiler;
mod error;
pub mod generator;
pub mod parser;
pub mod templates;

#[cfg(test)]
mod __tests;
