//! Sources of randomness for rolling dice.
//!
//! Everything that needs a random value goes through a [`Roller`], so evaluation itself never touches shared state.
//! Give each concurrent evaluation its own roller.

use alloc::vec::{self, Vec};

#[cfg(feature = "fastrand")]
use fastrand::Rng;

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die, producing a value in `1..=sides`.
	#[must_use]
	fn roll_die(&mut self, sides: u16) -> u16;

	/// Draws a uniform value in `[0, 1)`. Used for fate dice.
	#[must_use]
	fn roll_unit(&mut self) -> f64;
}

impl<R: Roller + ?Sized> Roller for &mut R {
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		(**self).roll_die(sides)
	}

	#[inline]
	fn roll_unit(&mut self) -> f64 {
		(**self).roll_unit()
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use epicforge::dice::{roller::{FastRand as FastRandRoller, Roller}, roll};
/// use epicforge::formula::Dice;
///
/// let mut roller = FastRandRoller::default();
/// let rolled = roll(&Dice::new(4, 6), &mut roller, 100);
/// assert_eq!(rolled.faces.len(), 4);
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use epicforge::dice::roller::{FastRand as FastRandRoller, Roller};
///
/// let mut a = FastRandRoller::with_seed(0x750c38d574400);
/// let mut b = FastRandRoller::with_seed(0x750c38d574400);
/// assert_eq!(a.roll_die(20), b.roll_die(20));
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		if sides > 0 {
			self.0.u16(1..=sides)
		} else {
			0
		}
	}

	#[inline]
	fn roll_unit(&mut self) -> f64 {
		self.0.f64()
	}
}

/// Generates rolls that always have their max value, and fate dice that always come up `+`.
///
/// # Examples
/// ```
/// use epicforge::dice::roller::{Max as MaxRoller, Roller};
///
/// let mut roller = MaxRoller;
/// assert_eq!(roller.roll_die(6), 6);
/// assert_eq!(roller.roll_die(20), 20);
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		sides
	}

	#[inline]
	fn roll_unit(&mut self) -> f64 {
		1.0 - f64::EPSILON
	}
}

/// Generates rolls from predetermined values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use epicforge::dice::roller::{Iter as IterRoller, Roller};
///
/// let mut roller = IterRoller::new([1, 2, 6]).with_units([0.1, 0.9]);
/// assert_eq!(roller.roll_die(6), 1);
/// assert_eq!(roller.roll_die(6), 2);
/// assert_eq!(roller.roll_unit(), 0.1);
/// assert_eq!(roller.roll_die(6), 6);
/// assert!(!roller.can_roll());
/// ```
#[derive(Debug, Clone)]
pub struct Iter {
	/// Values handed out by [`Roller::roll_die()`]
	faces: vec::IntoIter<u16>,

	/// Values handed out by [`Roller::roll_unit()`]
	units: vec::IntoIter<f64>,
}

impl Iter {
	/// Creates a new roller that uses the given values for die rolls.
	#[must_use]
	pub fn new(faces: impl IntoIterator<Item = u16>) -> Self {
		Self {
			faces: faces.into_iter().collect::<Vec<_>>().into_iter(),
			units: Vec::new().into_iter(),
		}
	}

	/// Sets the values to use for unit draws (fate dice).
	#[must_use]
	pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
		self.units = units.into_iter().collect::<Vec<_>>().into_iter();
		self
	}

	/// Checks whether any die roll values remain.
	#[inline]
	#[must_use]
	pub fn can_roll(&self) -> bool {
		!self.faces.as_slice().is_empty()
	}
}

impl Roller for Iter {
	/// Rolls a die with the next predetermined value.
	///
	/// # Panics
	/// If the values have run out, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u16) -> u16 {
		self.faces.next().expect("die values are exhausted")
	}

	/// Draws the next predetermined unit value.
	///
	/// # Panics
	/// If the values have run out, this will panic.
	#[inline]
	#[expect(clippy::expect_used, reason = "Mostly for testing")]
	fn roll_unit(&mut self) -> f64 {
		self.units.next().expect("unit values are exhausted")
	}
}
