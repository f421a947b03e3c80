//! Rolling numbered dice and working with their resulting faces.
//!
//! Fate dice live in [`crate::fate`]; both are combined into a full result by [`Engine`](crate::eval::Engine).

pub mod roller;

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::roller::Roller;
use crate::{eval::Describe, formula::Dice};

/// Default maximum number of extra rolls a single exploding die may chain into
pub const MAX_EXPLOSIONS: u16 = 100;

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain result data")]
pub struct RollOutcome {
	/// Dice that were rolled to produce this
	pub dice: Dice,

	/// Every face rolled, in roll order. Extra rolls from explosions directly follow the die that triggered them.
	pub faces: Vec<u16>,

	/// Whether an explosion chain was cut short by the explosion limit
	pub capped: bool,
}

impl RollOutcome {
	/// Calculates the sum of all faces, including exploded ones.
	///
	/// # Examples
	/// ```
	/// use epicforge::{dice::RollOutcome, formula::Dice};
	///
	/// let rolled = RollOutcome::from_dice_and_faces(Dice::new_exploding(2, 6), [6, 6, 3, 4]);
	/// assert_eq!(rolled.total(), 19);
	/// ```
	#[must_use]
	pub fn total(&self) -> i64 {
		self.faces.iter().map(|&face| i64::from(face)).sum()
	}

	/// Counts the extra faces that were added by explosions.
	#[must_use]
	pub fn explosions(&self) -> usize {
		self.faces.len().saturating_sub(usize::from(self.dice.count))
	}

	/// Creates a new outcome from a given set of dice and predetermined faces.
	#[must_use]
	pub fn from_dice_and_faces(dice: Dice, faces: impl IntoIterator<Item = u16>) -> Self {
		Self {
			dice,
			faces: faces.into_iter().collect(),
			capped: false,
		}
	}
}

impl Describe for RollOutcome {
	/// Builds a list of all of the rolled faces followed by the die size (and `!` for exploding dice) in brackets.
	///
	/// If `list_limit` is specified and there are more faces than it, the list will be truncated and appended with
	/// "X more..." (where X is the remaining face count past the max).
	///
	/// # Examples
	/// ```
	/// use epicforge::{dice::RollOutcome, eval::Describe, formula::Dice};
	///
	/// let rolled = RollOutcome::from_dice_and_faces(Dice::new_exploding(2, 6), [6, 6, 3, 4]);
	/// assert_eq!(rolled.describe(None), "6, 6, 3, 4 [d6!]");
	/// assert_eq!(rolled.describe(Some(2)), "6, 6, 2 more... [d6!]");
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated = self.faces.len().saturating_sub(list_limit);

		format!(
			"{}{} [d{}{}]",
			self.faces
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated > 0 {
				format!(", {truncated} more...")
			} else {
				String::new()
			},
			self.dice.sides,
			if self.dice.explode { "!" } else { "" },
		)
	}
}

impl fmt::Display for RollOutcome {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Rolls a set of dice, chaining explosions for exploding dice.
///
/// Each die that lands on its max face rolls again, and so does every extra roll that also lands on the max face. A
/// single die's chain stops after `max_explosions` extra rolls, in which case the outcome is marked as
/// [`capped`](RollOutcome::capped).
///
/// # Examples
///
/// ## Exploding chain
/// ```
/// use epicforge::{dice::{roll, roller::Iter as IterRoller}, formula::Dice};
///
/// let mut roller = IterRoller::new([3, 6, 6, 2]);
/// let rolled = roll(&Dice::new_exploding(2, 6), &mut roller, 100);
/// assert_eq!(rolled.faces, vec![3, 6, 6, 2]);
/// assert_eq!(rolled.total(), 17);
/// ```
///
/// ## Single-sided exploding dice
/// ```
/// use epicforge::{dice::{roll, roller::Max as MaxRoller}, formula::Dice};
///
/// let rolled = roll(&Dice::new_exploding(1, 1), &mut MaxRoller, 100);
/// assert_eq!(rolled.faces.len(), 101);
/// assert!(rolled.capped);
/// ```
pub fn roll(dice: &Dice, roller: &mut impl Roller, max_explosions: u16) -> RollOutcome {
	let mut faces = Vec::with_capacity(usize::from(dice.count));
	let mut capped = false;

	for _ in 0..dice.count {
		let mut face = roller.roll_die(dice.sides);
		faces.push(face);

		if !dice.explode {
			continue;
		}

		let mut chain: u16 = 0;
		while face == dice.sides {
			if chain >= max_explosions {
				tracing::warn!(%dice, max_explosions, "explosion chain hit the limit");
				capped = true;
				break;
			}
			face = roller.roll_die(dice.sides);
			faces.push(face);
			chain = chain.saturating_add(1);
		}
	}

	let rolled = RollOutcome {
		dice: *dice,
		faces,
		capped,
	};
	tracing::trace!(%dice, faces = rolled.faces.len(), total = rolled.total(), "rolled dice");
	rolled
}
