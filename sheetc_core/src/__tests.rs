use rstest::rstest;
use similar_asserts::assert_eq;

use super::*;
use crate::parser::DirectiveError;
use crate::parser::parse_directive;

fn chapter(number: &str, title: &str) -> Directive {
	Directive::Chapter {
		number: number.to_string(),
		title: title.to_string(),
	}
}

fn subchapter(number: &str, title: &str) -> Directive {
	Directive::Subchapter {
		number: number.to_string(),
		title: title.to_string(),
	}
}

fn problem(number: &str, parts: &str) -> Directive {
	Directive::Problem {
		number: number.to_string(),
		parts: parts.to_string(),
	}
}

#[rstest]
#[case::chapter("# 1 Logic", chapter("1", "Logic"))]
#[case::chapter_spaced_title("# 2 Number theory basics", chapter("2", "Number theory basics"))]
#[case::chapter_extra_whitespace("  #   1    Logic  ", chapter("1", "Logic"))]
#[case::subchapter("## 3 Predicate logic", subchapter("3", "Predicate logic"))]
#[case::explicit_problem("### 3 ab", problem("3", "ab"))]
#[case::explicit_problem_no_parts("### 3", problem("3", ""))]
#[case::bare_problem("7", problem("7", ""))]
#[case::bare_problem_with_parts("7 acd", problem("7", "acd"))]
#[case::empty_line("", Directive::Blank)]
#[case::whitespace_line("   \t ", Directive::Blank)]
fn classifies_directives(#[case] line: &str, #[case] expected: Directive) {
	assert_eq!(parse_directive(line), Ok(expected));
}

#[rstest]
#[case::chapter_missing_title("# 1", DirectiveError::ChapterArity)]
#[case::chapter_bare_marker("#", DirectiveError::ChapterArity)]
#[case::subchapter_missing_title("## 2", DirectiveError::SubchapterArity)]
#[case::explicit_marker_alone("###", DirectiveError::ProblemArity)]
#[case::bare_problem_extra_token("5 ab extra", DirectiveError::ProblemArity)]
#[case::digit_in_parts("### 4 a1b", DirectiveError::InvalidParts("a1b".to_string()))]
#[case::uppercase_in_parts("5 aB", DirectiveError::InvalidParts("aB".to_string()))]
#[case::explicit_extra_token("### 5 ab cd", DirectiveError::InvalidParts("ab cd".to_string()))]
fn rejects_malformed_directives(#[case] line: &str, #[case] expected: DirectiveError) {
	assert_eq!(parse_directive(line), Err(expected));
}

#[test]
fn identifier_is_deterministic() {
	let mut hierarchy = Hierarchy::new();
	hierarchy.set_chapter("3");
	hierarchy.set_subchapter("1");

	let identity = hierarchy.resolve("7", "bd");
	assert_eq!(identity.identifier(), "3.1.7bd");
	assert_eq!(identity.file_name(), "3.1.7bd.tex");
}

#[test]
fn unset_hierarchy_renders_as_literal_none() {
	let identity = Hierarchy::new().resolve("5", "");
	assert_eq!(identity.identifier(), "None.None.5");
}

#[test]
fn new_chapter_keeps_current_subchapter() {
	let mut hierarchy = Hierarchy::new();
	hierarchy.set_chapter("1");
	hierarchy.set_subchapter("4");
	hierarchy.set_chapter("2");

	assert_eq!(hierarchy.chapter(), Some("2"));
	assert_eq!(hierarchy.subchapter(), Some("4"));
	assert_eq!(hierarchy.resolve("9", "a").identifier(), "2.4.9a");
}

#[rstest]
#[case::contiguous(
	"abc",
	"\\begin{enumerate}[a)]\n\t\\item \n\t\\item \n\t\\item \n\\end{enumerate}\n"
)]
#[case::skipped_letter(
	"ac",
	"\\begin{enumerate}[a)]\n\t\\item \n\t\\setcounter{enumi}{2}\n\t\\item \n\\end{enumerate}\n"
)]
#[case::offset_start(
	"b",
	"\\begin{enumerate}[a)]\n\t\\setcounter{enumi}{1}\n\t\\item \n\\end{enumerate}\n"
)]
#[case::no_parts("", "\n")]
fn builds_part_skeletons(#[case] parts: &str, #[case] expected: &str) {
	assert_eq!(part_skeleton(parts), expected);
}

#[test]
fn skeleton_for_skipped_letters_has_two_items() {
	let skeleton = part_skeleton("ac");
	assert_eq!(skeleton.matches("\\item").count(), 2);
	assert_eq!(skeleton.matches("\\setcounter{enumi}{2}").count(), 1);
}

#[test]
fn problem_file_is_a_standalone_subfile() {
	let identity = ProblemIdentity {
		chapter: Some("1".to_string()),
		subchapter: Some("2".to_string()),
		problem: "3".to_string(),
		parts: "ab".to_string(),
	};
	let content = problem_file_content(&identity);

	assert!(content.starts_with("\\documentclass[../main.tex]{subfiles}\n"));
	assert!(content.contains("\\begin{document}\n"));
	assert!(content.contains("\\problem{3}\n"));
	assert!(content.contains("\\solution\n"));
	assert!(content.ends_with("\\end{document}"));
	// The blank skeleton appears once for the problem, once for the solution.
	assert_eq!(content.matches("\\begin{enumerate}[a)]").count(), 2);
}

#[test]
fn problem_file_without_parts_uses_blank_placeholder() {
	let identity = ProblemIdentity {
		chapter: Some("1".to_string()),
		subchapter: Some("1".to_string()),
		problem: "5".to_string(),
		parts: String::new(),
	};
	let content = problem_file_content(&identity);

	assert!(!content.contains("enumerate"));
	assert!(content.contains("\\problem{5}\n\n"));
	assert!(content.contains("\\solution\n\n"));
}

fn write_spec(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
	let path = dir.join("sheet.spec");
	std::fs::write(&path, content).unwrap();
	path
}

#[test]
fn compile_generates_root_and_problem_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(
		tmp.path(),
		"Discrete Mathematics\n# 1 Logic\n## 1 Propositional logic\n### 2 ab\n3\n",
	);

	let report = compile(&CompileOptions::new(spec))?;

	assert_eq!(report.title, "Discrete Mathematics");
	assert_eq!(report.chapters, 1);
	assert_eq!(report.subchapters, 1);
	assert_eq!(report.problems_written, 2);
	assert_eq!(report.problems_skipped, 0);
	assert!(report.is_clean());

	let main = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	assert!(main.contains("\\title{Discrete Mathematics}"));
	assert!(main.contains("\\chapter{1}{Logic}\n"));
	assert!(main.contains("\t\\subchapter{1}{Propositional logic}\n"));
	assert!(main.contains("\t\t\\subfile{problems/1.1.2ab.tex}\n\t\t\\pagebreak\n"));
	assert!(main.contains("\t\t\\subfile{problems/1.1.3.tex}\n"));
	assert!(main.ends_with("\n\\end{document}"));

	assert!(tmp.path().join("problems/1.1.2ab.tex").exists());
	assert!(tmp.path().join("problems/1.1.3.tex").exists());

	Ok(())
}

#[test]
fn root_document_preserves_directive_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), "T\n# 1 Alpha\n2\n# 2 Beta\n4\n");

	compile(&CompileOptions::new(spec))?;

	let main = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	let alpha = main.find("\\chapter{1}{Alpha}").unwrap();
	let first = main.find("\\subfile{problems/1.None.2.tex}").unwrap();
	let beta = main.find("\\chapter{2}{Beta}").unwrap();
	let second = main.find("\\subfile{problems/2.None.4.tex}").unwrap();
	assert!(alpha < first && first < beta && beta < second);

	Ok(())
}

#[test]
fn duplicate_identities_keep_both_references() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), "T\n# 1 C\n## 1 S\n2\n2\n");

	let report = compile(&CompileOptions::new(spec))?;

	// Second directive finds the file already on disk and skips it, but its
	// reference is still appended.
	assert_eq!(report.problems_written, 1);
	assert_eq!(report.problems_skipped, 1);

	let main = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	assert_eq!(main.matches("\\subfile{problems/1.1.2.tex}").count(), 2);

	Ok(())
}

#[test]
fn malformed_directive_is_isolated() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), "T\n### 4 a1b\n# 1 Logic\n## 1 Sub\n5\n6 ab\n");

	let report = compile(&CompileOptions::new(spec))?;

	assert_eq!(report.warnings.len(), 1);
	assert_eq!(report.warnings[0].line_number, 2);
	assert_eq!(report.warnings[0].line, "### 4 a1b");
	assert!(!report.degraded);
	assert_eq!(report.problems_written, 2);

	let main = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	assert_eq!(main.matches("\\subfile").count(), 2);

	Ok(())
}

#[test]
fn failed_directive_leaves_hierarchy_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), "T\n# 1 Logic\n# 2\n5\n");

	let report = compile(&CompileOptions::new(spec))?;

	assert_eq!(report.warnings.len(), 1);
	// The malformed `# 2` must not have replaced the current chapter.
	assert!(tmp.path().join("problems/1.None.5.tex").exists());

	Ok(())
}

#[rstest]
#[case::one_failure("T\n### 4 a1b\n5\n", 1, false)]
#[case::two_failures("T\n### 4 a1b\n# 9\n5\n", 2, true)]
#[case::three_failures("T\n### 4 a1b\n# 9\n## 8\n5\n", 3, true)]
fn degraded_flag_flips_on_second_failure(
	#[case] spec_content: &str,
	#[case] expected_warnings: usize,
	#[case] expected_degraded: bool,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), spec_content);

	let report = compile(&CompileOptions::new(spec))?;

	assert_eq!(report.warnings.len(), expected_warnings);
	assert_eq!(report.degraded, expected_degraded);
	// The run still completed and generated the valid problem.
	assert_eq!(report.problems_written, 1);

	Ok(())
}

#[test]
fn rerun_without_overwrite_preserves_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), "T\n# 1 C\n## 2 S\n3 ab\n");
	let options = CompileOptions::new(spec);

	compile(&options)?;
	let main_before = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	let problem_before = std::fs::read_to_string(tmp.path().join("problems/1.2.3ab.tex"))?;

	let second = compile(&options)?;
	assert!(second.actions.iter().all(|action| !action.outcome.is_written()));
	assert_eq!(second.problems_skipped, 1);

	let main_after = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	let problem_after = std::fs::read_to_string(tmp.path().join("problems/1.2.3ab.tex"))?;
	assert_eq!(main_before, main_after);
	assert_eq!(problem_before, problem_after);

	Ok(())
}

#[test]
fn rerun_with_overwrite_is_idempotent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), "T\n# 1 C\n## 2 S\n3 ab\n4\n");
	let mut options = CompileOptions::new(spec);
	options.overwrite = true;

	compile(&options)?;
	let main_before = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	let problem_before = std::fs::read_to_string(tmp.path().join("problems/1.2.3ab.tex"))?;

	let second = compile(&options)?;
	assert!(second.actions.iter().all(|action| action.outcome.is_written()));

	let main_after = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	let problem_after = std::fs::read_to_string(tmp.path().join("problems/1.2.3ab.tex"))?;
	assert_eq!(main_before, main_after);
	assert_eq!(problem_before, problem_after);

	Ok(())
}

#[test]
fn empty_specification_is_fatal() {
	let tmp = tempfile::tempdir().unwrap();
	let spec = write_spec(tmp.path(), "");

	let error = compile(&CompileOptions::new(spec)).unwrap_err();
	assert!(matches!(error, SheetError::MissingTitle { .. }));
}

#[test]
fn title_only_specification_produces_root_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), "Just a Title\n");

	let report = compile(&CompileOptions::new(spec))?;

	assert_eq!(report.actions.len(), 1);
	assert_eq!(report.problems_written, 0);

	let main = std::fs::read_to_string(tmp.path().join("main.tex"))?;
	assert!(main.contains("\\title{Just a Title}"));
	assert!(main.ends_with("\n\\end{document}"));

	Ok(())
}

#[test]
fn explicit_destination_directory_is_created() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let spec = write_spec(tmp.path(), "T\n# 1 C\n## 1 S\n2\n");
	let dest = tmp.path().join("out/nested");

	let mut options = CompileOptions::new(spec);
	options.dest = Some(dest.clone());
	compile(&options)?;

	assert!(dest.join("main.tex").exists());
	assert!(dest.join("problems/1.1.2.tex").exists());

	Ok(())
}
