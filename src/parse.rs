//! Grammar for dice formulas, built with [chumsky].
//!
//! The accepted grammar, once whitespace has been stripped, is `Lead (('+' | '-') Term)*` where `Lead` is either dice
//! (`2d6`, `1d20!`) or fate dice (`4f`), and `Term` may additionally be a flat integer modifier (`1`). Numbers may have
//! leading zeros. Fate terms tolerate trailing sides and `!` (`4f6`, `4f!`), which are ignored. Anything that doesn't
//! match is rejected as a whole with [`Error::InvalidFormula`].

#![cfg(feature = "parse")]

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{ops::Range, str::FromStr};

use chumsky::prelude::*;

use crate::formula::{self, Dice, Formula, Sign, Term};

/// Usage message shown to whoever submitted a formula that couldn't be parsed
pub const USAGE: &str = "Неверная формула. Пример: 2d6+1d8-1 или 1d20! или 4f";

/// Generates a parser for a run of decimal digits, leading zeros included.
fn digits<'src>() -> impl Parser<'src, &'src str, &'src str, extra::Err<Rich<'src, char>>> + Clone {
	text::digits(10).to_slice()
}

/// Generates a parser for a die or fate count (a positive integer).
fn count<'src>() -> impl Parser<'src, &'src str, u16, extra::Err<Rich<'src, char>>> + Clone {
	digits().try_map(|raw: &str, span| {
		let count: u16 = raw
			.parse()
			.map_err(|err| Rich::custom(span, format!("Dice count: {err}")))?;
		if count == 0 {
			return Err(Rich::custom(span, "Dice count must be at least 1"));
		}
		Ok(count)
	})
}

/// Generates a parser that specifically handles dice terms like "1d20", "2d6", "3d6!", etc.
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, Dice, extra::Err<Rich<'src, char>>> + Clone {
	let sides = digits().try_map(|raw: &str, span| {
		let sides: u16 = raw
			.parse()
			.map_err(|err| Rich::custom(span, format!("Dice sides: {err}")))?;
		if sides == 0 {
			return Err(Rich::custom(span, "Dice must have at least 1 side"));
		}
		Ok(sides)
	});

	count()
		.then_ignore(just('d'))
		.then(sides)
		.then(just('!').or_not())
		.map(|((count, sides), bang)| Dice {
			count,
			sides,
			explode: bang.is_some(),
		})
}

/// Generates a parser that handles fate dice terms like "4f". Sides and `!` after the `f` are accepted and ignored.
pub fn fate_part<'src>() -> impl Parser<'src, &'src str, u16, extra::Err<Rich<'src, char>>> + Clone {
	count()
		.then_ignore(just('f'))
		.then_ignore(digits().or_not())
		.then_ignore(just('!').or_not())
}

/// Generates a parser for flat modifiers like the "1" in "2d6-1".
pub fn flat_part<'src>() -> impl Parser<'src, &'src str, u32, extra::Err<Rich<'src, char>>> + Clone {
	digits().try_map(|raw: &str, span| {
		raw
			.parse()
			.map_err(|err| Rich::custom(span, format!("Modifier: {err}")))
	})
}

/// Generates a parser that handles a full formula. The input is expected to already be normalized (see
/// [`formula::normalize()`]), since no whitespace is skipped.
pub fn formula_part<'src>() -> impl Parser<'src, &'src str, Formula, extra::Err<Rich<'src, char>>> + Clone {
	let dice = dice_part().map(Term::Dice);
	let fate = fate_part().map(Term::Fate);
	let flat = flat_part().map(Term::Flat);

	// Flat modifiers can't lead, since a lone number isn't a roll
	let lead = choice((dice.clone(), fate.clone()));
	let sign = choice((just('+').to(Sign::Plus), just('-').to(Sign::Minus)));

	lead.then(sign.then(choice((dice, fate, flat))).repeated().collect::<Vec<_>>())
		.map(|(first, rest)| Formula::new(first, rest))
}

/// Generates a parser that handles a full formula and expects end of input
pub fn formula<'src>() -> impl Parser<'src, &'src str, Formula, extra::Err<Rich<'src, char>>> + Clone {
	formula_part().then_ignore(end())
}

/// Normalizes and parses a raw formula.
///
/// # Errors
/// If the formula doesn't match the grammar, [`Error::InvalidFormula`] is returned.
///
/// # Examples
/// ```
/// use epicforge::parse::{parse, Error};
///
/// assert_eq!(parse(" 2d6 + 1 ")?.to_string(), "2d6+1");
/// assert!(matches!(parse("2x6"), Err(Error::InvalidFormula { .. })));
/// # Ok::<(), Error>(())
/// ```
pub fn parse(raw: &str) -> Result<Formula, Error> {
	let normalized = formula::normalize(raw);
	let result = formula().parse(normalized.as_str()).into_result().map_err(|errs| {
		errs.iter()
			.map(|err| Reason {
				span: err.span().start..err.span().end,
				message: err.to_string(),
			})
			.collect::<Vec<_>>()
	});

	match result {
		Ok(parsed) => {
			tracing::debug!(formula = %parsed, terms = parsed.terms().len(), "accepted formula");
			Ok(parsed)
		}
		Err(reasons) => {
			tracing::debug!(formula = %normalized, reasons = reasons.len(), "rejected formula");
			Err(Error::InvalidFormula {
				formula: normalized,
				reasons,
			})
		}
	}
}

/// A single diagnostic explaining why a formula was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Reason {
	/// Byte range in the normalized formula
	pub span: Range<usize>,

	/// Description of the problem
	pub message: String,
}

/// An error resulting from parsing a formula
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The formula doesn't match the grammar. Displays as the fixed [`USAGE`] message; the specific problems are
	/// available in `reasons`.
	#[error("{}", USAGE)]
	InvalidFormula {
		/// Normalized formula that was rejected (spans in `reasons` refer to this)
		formula: String,

		/// Problems found by the parser
		reasons: Vec<Reason>,
	},
}

impl Error {
	/// Joins all of the reasons into a single line, mainly for logging.
	#[must_use]
	pub fn details(&self) -> String {
		match self {
			Self::InvalidFormula { reasons, .. } => reasons
				.iter()
				.map(|reason| reason.message.as_str())
				.collect::<Vec<_>>()
				.join("; "),
		}
	}
}

impl FromStr for Formula {
	type Err = Error;

	#[inline]
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}
