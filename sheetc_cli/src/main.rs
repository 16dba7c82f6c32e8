use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use sheetc_cli::OutputFormat;
use sheetc_cli::SheetcCli;
use sheetc_core::CompileOptions;
use sheetc_core::CompileReport;
use sheetc_core::compile;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SheetcCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	if let Err(e) = run(&args) {
		// Render core errors through miette for error codes and help text.
		match e.downcast::<sheetc_core::SheetError>() {
			Ok(sheet_err) => {
				let report: miette::Report = (*sheet_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn run(args: &SheetcCli) -> Result<(), Box<dyn std::error::Error>> {
	let options = CompileOptions {
		spec_path: args.spec.clone(),
		dest: args.output.clone(),
		overwrite: args.force,
	};
	let report = compile(&options)?;

	match args.format {
		OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
		OutputFormat::Text => print_report(&report, args.verbose),
	}

	Ok(())
}

fn print_report(report: &CompileReport, verbose: bool) {
	for action in &report.actions {
		if action.outcome.is_written() {
			println!("Writing {}", action.file);
		} else {
			println!("Not overwriting {}", action.file);
		}
	}

	for (index, warning) in report.warnings.iter().enumerate() {
		eprintln!(
			"{} line {}: failed to process specification line {:?}: {}",
			colored!("warning:", yellow),
			warning.line_number,
			warning.line,
			warning.message,
		);
		// The degraded advisory fires once, when the second failure is
		// reached, not on every subsequent one.
		if report.degraded && index == 1 {
			eprintln!(
				"{} multiple malformed directives, output may be incomplete",
				colored!("warning:", yellow),
			);
		}
	}

	if verbose {
		println!(
			"{} {} chapter(s), {} subchapter(s), {} problem file(s) written, {} preserved.",
			colored!(format!("Compiled \"{}\":", report.title), bold),
			report.chapters,
			report.subchapters,
			report.problems_written,
			report.problems_skipped,
		);
	}
}
