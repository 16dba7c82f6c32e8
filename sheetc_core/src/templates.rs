//! The literal LaTeX text emitted into generated documents.
//!
//! The root document defines its own `\chapter`, `\subchapter`, `\problem`,
//! and `\solution` macros on top of the `article` class so that generated
//! headers carry the declared numbers rather than LaTeX's own counters.
//! Problem files use the `subfiles` package so each one compiles standalone
//! while still being includable from the root document.

/// Preamble of the generated root document.
pub const MAIN_PREAMBLE: &str = r"\documentclass[11pt,a4paper]{article}

\usepackage{enumerate}
\usepackage{subfiles}

\usepackage{mathtools}
\usepackage{amssymb}

\newcommand{\chapter}[2]{%
\setcounter{section}{#1-1}%
\section{#2}%
}

\newcommand{\subchapter}[2]{%
\setcounter{subsection}{#1-1}%
\subsection{#2}%
}

\newcommand{\problem}[1]{%
\setcounter{subsubsection}{#1-1}%
\subsubsection{\hfill}%
}

\newcommand{\solution}{%
\subsubsection*{Solution}%
}

% Misc math operators

\DeclarePairedDelimiter{\ceil}{\lceil}{\rceil}
\DeclarePairedDelimiter{\floor}{\lfloor}{\rfloor}

% Operators for predicate logic

\DeclareMathOperator{\T}{\text{\textbf T}}
\DeclareMathOperator{\F}{\text{\textbf F}}
\DeclareMathOperator{\lthen}{\to}
\DeclareMathOperator{\limplies}{\to}
\DeclareMathOperator{\lwhen}{\gets}
\DeclareMathOperator{\lif}{\gets}
\DeclareMathOperator{\liff}{\leftrightarrow}
\DeclareMathOperator{\lxor}{\oplus}

% Sets

\DeclarePairedDelimiter{\set}
	{\lbrace}
	{\rbrace}
\DeclareMathOperator{\ZZ}{\mathbb{Z}}
\DeclareMathOperator{\SetOfIntegers}{\ZZ}
\DeclareMathOperator{\ZZPos}{\mathbb{Z}^+}
\DeclareMathOperator{\SetOfPositiveIntegers}{\ZZPos}
\DeclareMathOperator{\NN}{\mathbb{N}}
\DeclareMathOperator{\SetOfNaturalNumbers}{\NN}
\DeclareMathOperator{\RR}{\mathbb{R}}
\DeclareMathOperator{\SetOfRealNumbers}{\RR}
\DeclareMathOperator{\RRPos}{\mathbb{R}^+}
\DeclareMathOperator{\SetOfPositiveRealNumbers}{\RRPos}
\DeclareMathOperator{\QQ}{\mathbb{Q}}
\DeclareMathOperator{\SetOfRationalNumbers}{\QQ}
\DeclareMathOperator{\CC}{\mathbb{C}}
\DeclareMathOperator{\SetOfComplexNumbers}{\CC}
";

/// Preamble of each generated problem file. The `subfiles` document class
/// declares the inclusion relationship back to the root document, so problem
/// files compile standalone as well as via `\subfile` from the root.
pub const PROBLEM_PREAMBLE: &str = "\\documentclass[../main.tex]{subfiles}\n";

pub const BEGIN_DOCUMENT: &str = "\\begin{document}\n";

/// No trailing newline; this is always the final text of a generated file.
pub const END_DOCUMENT: &str = "\\end{document}";

pub const SOLUTION_HEADING: &str = "\\solution\n";

/// Titled front matter of the root document.
pub fn main_front_matter(title: &str) -> String {
	format!("\\title{{{title}}}\n\\date{{}}\n\\author{{}}\n\\maketitle\n")
}

pub fn chapter_header(number: &str, title: &str) -> String {
	format!("\\chapter{{{number}}}{{{title}}}\n")
}

pub fn subchapter_header(number: &str, title: &str) -> String {
	format!("\t\\subchapter{{{number}}}{{{title}}}\n")
}

pub fn problem_heading(number: &str) -> String {
	format!("\\problem{{{number}}}\n")
}

/// The root document's reference to a generated problem file, followed by a
/// page break so each problem starts on its own page.
pub fn subfile_reference(identifier: &str) -> String {
	format!("\t\t\\subfile{{problems/{identifier}.tex}}\n\t\t\\pagebreak\n")
}
