use std::{
	io::{self, BufRead, Write},
	process::ExitCode,
};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use epicforge::{
	check::Check,
	dice::{self, roller::FastRand},
	eval::{self, Engine},
	parse,
	session::{Choice, Input, Keyboard, Reply, Session},
};
use tracing_subscriber::EnvFilter;

/// Rolls dice formulas such as 2d6+1d8-1, 1d20! or 4f
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
	/// Formula to roll. All words are joined, so it can be left unquoted even with spaces (quote it when a word starts
	/// with `-` and isn't a plain number, like `-1d4`). Without a formula, an interactive chat session runs on stdin.
	#[arg(allow_negative_numbers = true)]
	formula: Vec<String>,

	/// Check the total against this difficulty
	#[arg(long)]
	dc: Option<i64>,

	/// Maximum extra rolls a single exploding die may chain into
	#[arg(long, default_value_t = dice::MAX_EXPLOSIONS)]
	max_explosions: u16,

	/// Number of dice for a quick fate roll
	#[arg(long, default_value_t = eval::DEFAULT_FATE_COUNT)]
	fate_count: u16,

	/// Seed for the random number generator
	#[arg(long)]
	seed: Option<u64>,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(io::stderr)
		.init();

	let args = Args::parse();
	let engine = Engine::builder()
		.max_explosions(args.max_explosions)
		.default_fate_count(args.fate_count)
		.build();
	let mut roller = args.seed.map(FastRand::with_seed).unwrap_or_default();

	if args.formula.is_empty() {
		return match run_session(&engine, &mut roller) {
			Ok(()) => ExitCode::SUCCESS,
			Err(err) => {
				eprintln!("I/O error: {err}");
				ExitCode::FAILURE
			}
		};
	}

	let input = args.formula.join(" ");
	let result = match args.dc {
		Some(dc) => Check { dc }.roll(&engine, &input, &mut roller).map(|checked| checked.to_string()),
		None => engine
			.evaluate(&input, &mut roller)
			.map(|evaled| evaled.to_string())
			.map_err(Into::into),
	};

	match result {
		Ok(text) => {
			println!("{text}");
			ExitCode::SUCCESS
		}
		Err(epicforge::check::Error::Formula(err)) => {
			report(&err);
			ExitCode::FAILURE
		}
		Err(err) => {
			eprintln!("{err}");
			ExitCode::FAILURE
		}
	}
}

/// Prints a detailed report of why a formula was rejected.
fn report(err: &parse::Error) {
	let parse::Error::InvalidFormula { formula, reasons } = err else {
		eprintln!("{err}");
		return;
	};

	let span = reasons.first().map_or(0..formula.len(), |reason| reason.span.clone());
	let mut builder = Report::build(ReportKind::Error, ("formula", span)).with_message(err.to_string());
	for reason in reasons {
		builder = builder.with_label(
			Label::new(("formula", reason.span.clone()))
				.with_message(&reason.message)
				.with_color(Color::Red),
		);
	}

	if builder.finish().eprint(("formula", Source::from(formula.as_str()))).is_err() {
		eprintln!("{err}: {}", err.details());
	}
}

/// Runs a chat session over stdin/stdout, one message per line. Main menu buttons can be pressed by typing their
/// callback data.
fn run_session(engine: &Engine, roller: &mut FastRand) -> io::Result<()> {
	let mut session = Session::default();
	let mut stdout = io::stdout().lock();
	print_replies(&mut stdout, &session.handle(engine, Input::Start, roller))?;

	for line in io::stdin().lock().lines() {
		let line = line?;
		let text = line.trim();
		if text.is_empty() {
			continue;
		}

		let input = Choice::from_callback(text).map_or_else(|| Input::from_text(text), Input::Choice);
		print_replies(&mut stdout, &session.handle(engine, input, roller))?;
	}

	Ok(())
}

/// Writes replies along with a plain rendering of their keyboards.
fn print_replies(out: &mut impl Write, replies: &[Reply]) -> io::Result<()> {
	for reply in replies {
		writeln!(out, "{}", reply.text)?;
		match reply.keyboard {
			Some(Keyboard::Inline(rows)) => {
				for row in rows {
					let buttons = row
						.iter()
						.map(|button| format!("[{}: {}]", button.text, button.data))
						.collect::<Vec<_>>();
					writeln!(out, "  {}", buttons.join(" "))?;
				}
			}
			Some(Keyboard::Reply(rows)) => {
				for row in rows {
					let buttons = row.iter().map(|text| format!("[{text}]")).collect::<Vec<_>>();
					writeln!(out, "  {}", buttons.join(" "))?;
				}
			}
			Some(_) | None => {}
		}
	}
	out.flush()
}
