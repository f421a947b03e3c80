//! Evaluation of whole formulas: the [`Engine`] that rolls every term and the [`Evaluation`] it produces.

use alloc::{format, string::String, vec::Vec};
use core::fmt;

use crate::{
	dice::{self, RollOutcome, Roller},
	fate::{self, FateOutcome},
	formula::{Dice, Formula, Sign, Term},
};

/// Separator placed between the descriptions of each term
pub const TERM_SEPARATOR: &str = " + ";

/// Default number of fate dice for a quick fate roll
pub const DEFAULT_FATE_COUNT: u16 = 4;

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed string listing the individual results that occurred (ideally, up to `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Rolls formulas. Holds configuration only, so a single engine can be shared between any number of concurrent
/// evaluations as long as each one has its own [`Roller`].
///
/// # Examples
/// ```
/// use epicforge::{dice::roller::Iter as IterRoller, eval::Engine};
///
/// let engine = Engine::default();
/// let mut roller = IterRoller::new([4, 2, 7]);
/// let evaled = engine.evaluate("2d6 + 1d8 - 1", &mut roller)?;
/// assert_eq!(evaled.total, 12);
/// assert_eq!(evaled.to_string(), "Бросок 4, 2 [d6] + 7 [d8] + -1 = 12");
/// # Ok::<(), epicforge::parse::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
	/// Maximum number of extra rolls a single exploding die may chain into
	max_explosions: u16,

	/// Number of fate dice for a quick fate roll
	default_fate_count: u16,
}

impl Engine {
	/// Creates an engine with the default configuration.
	#[must_use]
	pub const fn new() -> Self {
		Self {
			max_explosions: dice::MAX_EXPLOSIONS,
			default_fate_count: DEFAULT_FATE_COUNT,
		}
	}

	/// Creates a new engine builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Gets the maximum number of extra rolls a single exploding die may chain into.
	#[must_use]
	pub const fn max_explosions(&self) -> u16 {
		self.max_explosions
	}

	/// Gets the number of fate dice used for a quick fate roll.
	#[must_use]
	pub const fn default_fate_count(&self) -> u16 {
		self.default_fate_count
	}

	/// Parses and evaluates a raw formula.
	///
	/// # Errors
	/// If the formula is malformed, [`parse::Error::InvalidFormula`](crate::parse::Error::InvalidFormula) is returned
	/// and nothing is rolled.
	#[cfg(feature = "parse")]
	pub fn evaluate(&self, raw: &str, roller: &mut impl Roller) -> Result<Evaluation, crate::parse::Error> {
		let formula = crate::parse::parse(raw)?;
		Ok(self.eval(formula, roller))
	}

	/// Evaluates an already-parsed formula, rolling every term from left to right.
	pub fn eval(&self, formula: Formula, roller: &mut impl Roller) -> Evaluation {
		let mut terms = Vec::with_capacity(formula.terms().len());
		for signed in formula.terms() {
			let outcome = match signed.term {
				Term::Dice(set) => Outcome::Dice(dice::roll(&set, roller, self.max_explosions)),
				Term::Fate(count) => Outcome::Fate(fate::roll(count, roller)),
				Term::Flat(val) => Outcome::Flat(val),
			};
			terms.push(TermOutcome {
				sign: signed.sign,
				outcome,
			});
		}

		let evaled = Evaluation::from_terms(formula, terms);
		tracing::debug!(formula = %evaled.formula, total = evaled.total, "evaluated formula");
		evaled
	}

	/// Rolls a single die with the given number of sides (`1dN`).
	///
	/// # Examples
	/// ```
	/// use epicforge::{dice::roller::Iter as IterRoller, eval::Engine};
	///
	/// let evaled = Engine::default().roll_single(20, &mut IterRoller::new([17]));
	/// assert_eq!(evaled.to_string(), "Бросок 17 [d20] = 17");
	/// ```
	pub fn roll_single(&self, sides: u16, roller: &mut impl Roller) -> Evaluation {
		self.eval(Formula::new(Term::Dice(Dice::new(1, sides.max(1))), []), roller)
	}

	/// Rolls the default number of fate dice.
	///
	/// # Examples
	/// ```
	/// use epicforge::{dice::roller::Max as MaxRoller, eval::Engine};
	///
	/// let evaled = Engine::default().roll_fate(&mut MaxRoller);
	/// assert_eq!(evaled.total, 4);
	/// assert_eq!(evaled.fate_label, Some("Легендарный"));
	/// ```
	pub fn roll_fate(&self, roller: &mut impl Roller) -> Evaluation {
		self.eval(Formula::new(Term::Fate(self.default_fate_count), []), roller)
	}
}

impl Default for Engine {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

/// Builds an [`Engine`] with a fluent interface.
///
/// # Examples
/// ```
/// use epicforge::eval::Engine;
///
/// let engine = Engine::builder().max_explosions(10).default_fate_count(3).build();
/// assert_eq!(engine.max_explosions(), 10);
/// assert_eq!(engine.default_fate_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder(Engine);

impl Builder {
	/// Sets the maximum number of extra rolls a single exploding die may chain into.
	#[must_use]
	pub const fn max_explosions(mut self, max: u16) -> Self {
		self.0.max_explosions = max;
		self
	}

	/// Sets the number of fate dice for a quick fate roll (at least 1).
	#[must_use]
	pub fn default_fate_count(mut self, count: u16) -> Self {
		self.0.default_fate_count = count.max(1);
		self
	}

	/// Finalizes the engine.
	#[must_use]
	pub const fn build(self) -> Engine {
		self.0
	}
}

/// Result of evaluating a single term, before its sign is applied
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
	/// Rolled numbered dice
	Dice(RollOutcome),

	/// Rolled fate dice
	Fate(FateOutcome),

	/// Flat modifier
	Flat(u32),
}

/// A term's outcome along with the sign it had in the formula
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain pair")]
pub struct TermOutcome {
	/// Sign of the term
	pub sign: Sign,

	/// What the term produced
	pub outcome: Outcome,
}

impl TermOutcome {
	/// Calculates what the term adds to (or subtracts from) the total.
	#[must_use]
	pub fn contribution(&self) -> i64 {
		let raw = match &self.outcome {
			Outcome::Dice(rolled) => rolled.total(),
			Outcome::Fate(rolled) => rolled.total(),
			Outcome::Flat(val) => i64::from(*val),
		};
		self.sign.apply(raw)
	}
}

impl Describe for TermOutcome {
	/// Describes the term's outcome. Dice and fate dice list what they rolled; flat modifiers show their sign.
	fn describe(&self, list_limit: Option<usize>) -> String {
		match &self.outcome {
			Outcome::Dice(rolled) => rolled.describe(list_limit),
			Outcome::Fate(rolled) => rolled.describe(list_limit),
			Outcome::Flat(val) => format!("{}{val}", self.sign),
		}
	}
}

/// Complete result of evaluating a formula
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Evaluation {
	/// Formula that was evaluated
	pub formula: Formula,

	/// Outcome of every term, in formula order
	pub terms: Vec<TermOutcome>,

	/// Sum of every term's signed contribution
	pub total: i64,

	/// Fate scale label of the last fate term in the formula (keyed by that term's own, unsigned sum), if there were
	/// any fate terms. May be empty when the sum falls outside of the scale.
	pub fate_label: Option<&'static str>,
}

impl Evaluation {
	/// Aggregates already-rolled term outcomes. No rolling happens here.
	#[must_use]
	pub fn from_terms(formula: Formula, terms: Vec<TermOutcome>) -> Self {
		let total = terms
			.iter()
			.fold(0_i64, |total, term| total.saturating_add(term.contribution()));
		let fate_label = terms.iter().rev().find_map(|term| match &term.outcome {
			Outcome::Fate(rolled) => Some(rolled.label()),
			_ => None,
		});

		Self {
			formula,
			terms,
			total,
			fate_label,
		}
	}

	/// Builds the description of every term, in formula order.
	#[must_use]
	pub fn rolls(&self, list_limit: Option<usize>) -> Vec<String> {
		self.terms.iter().map(|term| term.describe(list_limit)).collect()
	}

	/// Checks whether any exploding dice chain was cut short by the explosion limit.
	#[must_use]
	pub fn is_capped(&self) -> bool {
		self.terms
			.iter()
			.any(|term| matches!(&term.outcome, Outcome::Dice(rolled) if rolled.capped))
	}
}

impl Describe for Evaluation {
	/// Builds the reply text: `Бросок <terms> = <total>`, followed by a `Результат: <label>` line when there is a
	/// non-empty fate label.
	fn describe(&self, list_limit: Option<usize>) -> String {
		let mut text = format!(
			"Бросок {} = {}",
			self.rolls(list_limit).join(TERM_SEPARATOR),
			self.total
		);
		if let Some(label) = self.fate_label.filter(|label| !label.is_empty()) {
			text.push_str("\nРезультат: ");
			text.push_str(label);
		}
		text
	}
}

impl fmt::Display for Evaluation {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}
