//! Typed representation of a dice formula: an ordered list of signed terms.
//!
//! A [`Formula`] is only ever produced by the parser (see [`Formula::from_str()`]) or assembled by hand, and is never
//! partially valid. Evaluating it is the job of [`Engine`](crate::eval::Engine).

use alloc::{string::String, vec::Vec};
use core::fmt;

/// Sign attached to the term that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[expect(clippy::exhaustive_enums, reason = "There are only ever two signs")]
pub enum Sign {
	/// Term is added to the total
	#[default]
	Plus,

	/// Term is subtracted from the total
	Minus,
}

impl Sign {
	/// Applies the sign to a value.
	#[must_use]
	pub const fn apply(self, val: i64) -> i64 {
		match self {
			Self::Plus => val,
			Self::Minus => val.saturating_neg(),
		}
	}

	/// Gets the operator character for the sign.
	#[must_use]
	pub const fn symbol(self) -> char {
		match self {
			Self::Plus => '+',
			Self::Minus => '-',
		}
	}
}

impl fmt::Display for Sign {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.symbol())
	}
}

/// A set of identical dice with a number of sides, optionally exploding on their max face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Plain data mirrored directly by the grammar")]
pub struct Dice {
	/// Number of dice to roll
	pub count: u16,

	/// Number of sides for each die
	pub sides: u16,

	/// Whether a die landing on its max face triggers an additional roll
	pub explode: bool,
}

impl Dice {
	/// Creates a new set of plain dice.
	#[must_use]
	pub const fn new(count: u16, sides: u16) -> Self {
		Self {
			count,
			sides,
			explode: false,
		}
	}

	/// Creates a new set of exploding dice.
	#[must_use]
	pub const fn new_exploding(count: u16, sides: u16) -> Self {
		Self {
			count,
			sides,
			explode: true,
		}
	}
}

impl fmt::Display for Dice {
	/// Formats the dice the same way they are written in a formula, e.g. `2d6` or `1d20!`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}d{}{}", self.count, self.sides, if self.explode { "!" } else { "" })
	}
}

/// Individual term of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Term {
	/// Numbered dice, e.g. `2d6` or `1d20!`
	Dice(Dice),

	/// Fate dice with a count, e.g. `4f`
	Fate(u16),

	/// Flat modifier, e.g. the `1` in `2d6-1`
	Flat(u32),
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Dice(dice) => write!(f, "{dice}"),
			Self::Fate(count) => write!(f, "{count}f"),
			Self::Flat(val) => write!(f, "{val}"),
		}
	}
}

/// A term along with the sign that precedes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Plain pair")]
pub struct Signed {
	/// Sign of the term (the leading term is always [`Sign::Plus`])
	pub sign: Sign,

	/// The term itself
	pub term: Term,
}

/// A full, validated formula
///
/// # Examples
/// ```
/// use epicforge::formula::{Dice, Formula, Sign, Term};
///
/// let formula: Formula = "2d6 + 1d8! - 1".parse()?;
/// let terms: Vec<_> = formula.terms().iter().map(|signed| (signed.sign, signed.term)).collect();
/// assert_eq!(
/// 	terms,
/// 	vec![
/// 		(Sign::Plus, Term::Dice(Dice::new(2, 6))),
/// 		(Sign::Plus, Term::Dice(Dice::new_exploding(1, 8))),
/// 		(Sign::Minus, Term::Flat(1)),
/// 	]
/// );
/// assert_eq!(formula.to_string(), "2d6+1d8!-1");
/// # Ok::<(), epicforge::parse::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Formula {
	/// Terms in input order
	terms: Vec<Signed>,
}

impl Formula {
	/// Creates a formula from a leading term and any number of following signed terms.
	#[must_use]
	pub fn new(first: Term, rest: impl IntoIterator<Item = (Sign, Term)>) -> Self {
		let mut terms = Vec::from([Signed {
			sign: Sign::Plus,
			term: first,
		}]);
		terms.extend(rest.into_iter().map(|(sign, term)| Signed { sign, term }));
		Self { terms }
	}

	/// Gets the terms of the formula in input order.
	#[must_use]
	pub fn terms(&self) -> &[Signed] {
		&self.terms
	}

	/// Checks whether the formula contains any fate dice.
	#[must_use]
	pub fn has_fate(&self) -> bool {
		self.terms.iter().any(|signed| matches!(signed.term, Term::Fate(..)))
	}
}

impl fmt::Display for Formula {
	/// Writes the formula back in its compact form, without whitespace.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, signed) in self.terms.iter().enumerate() {
			if idx > 0 {
				write!(f, "{}", signed.sign)?;
			}
			write!(f, "{}", signed.term)?;
		}
		Ok(())
	}
}

/// Removes all whitespace from a raw formula and lowercases it, ready for the grammar.
#[must_use]
pub fn normalize(raw: &str) -> String {
	raw.chars()
		.filter(|ch| !ch.is_whitespace())
		.flat_map(char::to_lowercase)
		.collect()
}
