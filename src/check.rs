//! Difficulty checks: evaluate a formula and compare its total against a threshold.
//!
//! Who may run a check is up to the caller, which supplies a [`Gate`]. A typical gate only lets the Game Master of a
//! chat through; [`Masters`] is a simple in-memory version of that.

#![cfg(feature = "parse")]

use alloc::collections::BTreeSet;
use core::fmt;

use crate::{
	dice::Roller,
	eval::{Engine, Evaluation},
	parse,
};

/// Identifier of a chat participant
pub type Participant = i64;

/// Decides which participants may run difficulty checks
pub trait Gate {
	/// Checks whether the participant is allowed to run a check.
	fn allows(&self, participant: Participant) -> bool;
}

impl<F: Fn(Participant) -> bool> Gate for F {
	#[inline]
	fn allows(&self, participant: Participant) -> bool {
		self(participant)
	}
}

/// Lets everyone run checks.
#[derive(Debug, Clone, Copy, Default)]
#[expect(clippy::exhaustive_structs, reason = "Unit gate")]
pub struct AllowAll;

impl Gate for AllowAll {
	#[inline]
	fn allows(&self, _participant: Participant) -> bool {
		true
	}
}

/// Lets only a known set of Game Masters run checks.
///
/// # Examples
/// ```
/// use epicforge::check::{Gate, Masters};
///
/// let mut masters = Masters::default();
/// masters.promote(42);
/// assert!(masters.allows(42));
/// assert!(!masters.allows(7));
/// masters.demote(42);
/// assert!(!masters.allows(42));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Masters(BTreeSet<Participant>);

impl Masters {
	/// Grants the Game Master role. Returns whether the participant was newly promoted.
	pub fn promote(&mut self, participant: Participant) -> bool {
		self.0.insert(participant)
	}

	/// Revokes the Game Master role. Returns whether the participant had it.
	pub fn demote(&mut self, participant: Participant) -> bool {
		self.0.remove(&participant)
	}
}

impl Gate for Masters {
	#[inline]
	fn allows(&self, participant: Participant) -> bool {
		self.0.contains(&participant)
	}
}

impl FromIterator<Participant> for Masters {
	fn from_iter<T: IntoIterator<Item = Participant>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// A check against a difficulty class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain threshold")]
pub struct Check {
	/// Total needed to succeed
	pub dc: i64,
}

impl Check {
	/// Evaluates a formula and compares its total against the difficulty.
	///
	/// # Errors
	/// If the formula is malformed, [`Error::Formula`] is returned.
	///
	/// # Examples
	/// ```
	/// use epicforge::{check::Check, dice::roller::Iter as IterRoller, eval::Engine};
	///
	/// let checked = Check { dc: 15 }.roll(&Engine::default(), "1d20+2", &mut IterRoller::new([13]))?;
	/// assert!(checked.is_success());
	/// assert_eq!(checked.margin(), 0);
	/// assert_eq!(checked.to_string(), "Бросок 13 [d20] + +2 = 15\nСложность 15: Успех");
	/// # Ok::<(), epicforge::check::Error>(())
	/// ```
	pub fn roll(&self, engine: &Engine, raw: &str, roller: &mut impl Roller) -> Result<CheckOutcome, Error> {
		let evaluation = engine.evaluate(raw, roller)?;
		let checked = CheckOutcome { evaluation, dc: self.dc };
		tracing::debug!(
			total = checked.evaluation.total,
			dc = self.dc,
			success = checked.is_success(),
			"difficulty check"
		);
		Ok(checked)
	}

	/// Like [`Self::roll()`], but only for participants the gate allows. Nothing is rolled for anyone else.
	///
	/// # Errors
	/// If the participant isn't allowed, [`Error::Denied`] is returned. If the formula is malformed,
	/// [`Error::Formula`] is returned.
	///
	/// # Examples
	/// ```
	/// use epicforge::{check::{Check, Error, Masters}, dice::roller::Max as MaxRoller, eval::Engine};
	///
	/// let masters = Masters::from_iter([1]);
	/// let check = Check { dc: 10 };
	/// assert!(check.roll_as(&masters, 1, &Engine::default(), "2d6", &mut MaxRoller).is_ok());
	/// assert!(matches!(
	/// 	check.roll_as(&masters, 2, &Engine::default(), "2d6", &mut MaxRoller),
	/// 	Err(Error::Denied(2))
	/// ));
	/// ```
	pub fn roll_as(
		&self,
		gate: &impl Gate,
		participant: Participant,
		engine: &Engine,
		raw: &str,
		roller: &mut impl Roller,
	) -> Result<CheckOutcome, Error> {
		if !gate.allows(participant) {
			tracing::debug!(participant, "difficulty check denied");
			return Err(Error::Denied(participant));
		}
		self.roll(engine, raw, roller)
	}
}

/// Result of a difficulty check
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CheckOutcome {
	/// Evaluated formula
	pub evaluation: Evaluation,

	/// Difficulty that was checked against
	pub dc: i64,
}

impl CheckOutcome {
	/// Checks whether the total met the difficulty.
	#[must_use]
	pub const fn is_success(&self) -> bool {
		self.evaluation.total >= self.dc
	}

	/// Gets how far above (positive) or below (negative) the difficulty the total landed.
	#[must_use]
	pub const fn margin(&self) -> i64 {
		self.evaluation.total.saturating_sub(self.dc)
	}
}

impl fmt::Display for CheckOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}\nСложность {}: {}",
			self.evaluation,
			self.dc,
			if self.is_success() { "Успех" } else { "Провал" }
		)
	}
}

/// An error resulting from a difficulty check
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The formula couldn't be parsed
	#[error(transparent)]
	Formula(#[from] parse::Error),

	/// The participant isn't allowed to run checks
	#[error("Проверки сложности доступны только мастеру")]
	Denied(Participant),
}
