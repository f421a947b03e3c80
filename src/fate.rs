//! Fate dice: three-faced dice showing `-`, blank, or `+`, and the narrative scale their sums map onto.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{dice::Roller, eval::Describe};

/// Unit draws below this come up [`FateDie::Minus`]
pub const MINUS_BELOW: f64 = 0.33;

/// Unit draws below this (and not below [`MINUS_BELOW`]) come up [`FateDie::Blank`]
pub const BLANK_BELOW: f64 = 0.66;

/// Separator between the glyphs of individual fate dice
const GLYPH_SEPARATOR: &str = " , ";

/// Labels for fate sums from -4 to +4
const SCALE: [&str; 9] = [
	"Ужасающий",
	"Катастрофический",
	"Ужасный",
	"Плохой",
	"Средний",
	"Посредственный",
	"Хороший",
	"Эпический",
	"Легендарный",
];

/// A single rolled fate die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Fate dice only have three faces")]
pub enum FateDie {
	/// -1
	Minus,

	/// 0
	Blank,

	/// +1
	Plus,
}

impl FateDie {
	/// Maps a uniform draw in `[0, 1)` onto a face. The boundaries are 0.33 and 0.66 rather than exact thirds, which
	/// makes `+` very slightly more likely than the other faces; rolls stay compatible with the bot's history.
	///
	/// # Examples
	/// ```
	/// use epicforge::fate::FateDie;
	///
	/// assert_eq!(FateDie::from_unit(0.0), FateDie::Minus);
	/// assert_eq!(FateDie::from_unit(0.33), FateDie::Blank);
	/// assert_eq!(FateDie::from_unit(0.66), FateDie::Plus);
	/// ```
	#[must_use]
	pub fn from_unit(unit: f64) -> Self {
		if unit < MINUS_BELOW {
			Self::Minus
		} else if unit < BLANK_BELOW {
			Self::Blank
		} else {
			Self::Plus
		}
	}

	/// Gets the numeric value of the face.
	#[must_use]
	pub const fn val(self) -> i8 {
		match self {
			Self::Minus => -1,
			Self::Blank => 0,
			Self::Plus => 1,
		}
	}

	/// Gets the three-character glyph shown for the face.
	#[must_use]
	pub const fn glyph(self) -> &'static str {
		match self {
			Self::Minus => " - ",
			Self::Blank => "   ",
			Self::Plus => " + ",
		}
	}
}

impl fmt::Display for FateDie {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.glyph())
	}
}

/// Representation of the result from rolling fate dice
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain result data")]
pub struct FateOutcome {
	/// Each die in roll order
	pub dice: Vec<FateDie>,
}

impl FateOutcome {
	/// Sums the faces of the dice, ignoring whatever sign the term has in its formula.
	#[must_use]
	pub fn total(&self) -> i64 {
		self.dice.iter().map(|die| i64::from(die.val())).sum()
	}

	/// Looks up the scale label for [`Self::total()`].
	#[must_use]
	pub fn label(&self) -> &'static str {
		scale(self.total())
	}
}

impl Describe for FateOutcome {
	/// Joins the glyphs of every die. `list_limit` is ignored, since fate dice are rolled in small numbers.
	///
	/// # Examples
	/// ```
	/// use epicforge::{eval::Describe, fate::{FateDie, FateOutcome}};
	///
	/// let rolled = FateOutcome { dice: vec![FateDie::Plus, FateDie::Blank, FateDie::Minus] };
	/// assert_eq!(rolled.describe(None), " +  ,     ,  - ");
	/// ```
	fn describe(&self, _list_limit: Option<usize>) -> String {
		self.dice
			.iter()
			.map(|die| die.glyph())
			.collect::<Vec<_>>()
			.join(GLYPH_SEPARATOR)
	}
}

impl fmt::Display for FateOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Rolls a number of fate dice.
///
/// # Examples
/// ```
/// use epicforge::{dice::roller::Iter as IterRoller, fate::{self, FateDie}};
///
/// let mut roller = IterRoller::new([]).with_units([0.1, 0.5, 0.9, 0.9]);
/// let rolled = fate::roll(4, &mut roller);
/// assert_eq!(rolled.dice, vec![FateDie::Minus, FateDie::Blank, FateDie::Plus, FateDie::Plus]);
/// assert_eq!(rolled.total(), 1);
/// assert_eq!(rolled.label(), "Посредственный");
/// ```
pub fn roll(count: u16, roller: &mut impl Roller) -> FateOutcome {
	let dice = (0..count)
		.map(|_| FateDie::from_unit(roller.roll_unit()))
		.collect::<Vec<_>>();
	let rolled = FateOutcome { dice };
	tracing::trace!(count, total = rolled.total(), "rolled fate dice");
	rolled
}

/// Looks up the narrative label for a fate sum. Sums outside of -4..=4 have no label and give an empty string.
///
/// # Examples
/// ```
/// use epicforge::fate::scale;
///
/// assert_eq!(scale(0), "Средний");
/// assert_eq!(scale(4), "Легендарный");
/// assert_eq!(scale(-4), "Ужасающий");
/// assert_eq!(scale(5), "");
/// ```
#[must_use]
pub fn scale(sum: i64) -> &'static str {
	sum.checked_add(4)
		.and_then(|idx| usize::try_from(idx).ok())
		.and_then(|idx| SCALE.get(idx))
		.copied()
		.unwrap_or("")
}
