use proptest::prelude::*;

use crate::{
	dice::{
		roll,
		roller::{FastRand as FastRandRoller, Iter as IterRoller},
		MAX_EXPLOSIONS,
	},
	eval::Engine,
	fate,
	formula::Dice,
	parse,
};

proptest! {
	#[test]
	fn plain_dice_faces_in_range(count in 1_u16..=50, sides in 1_u16..=100, seed in any::<u64>()) {
		let rolled = roll(&Dice::new(count, sides), &mut FastRandRoller::with_seed(seed), MAX_EXPLOSIONS);
		prop_assert_eq!(rolled.faces.len(), usize::from(count));
		prop_assert!(rolled.faces.iter().all(|&face| (1..=sides).contains(&face)));
	}

	#[test]
	fn exploding_chains_end_below_max(sides in 2_u16..=20, seed in any::<u64>()) {
		let rolled = roll(&Dice::new_exploding(1, sides), &mut FastRandRoller::with_seed(seed), MAX_EXPLOSIONS);
		let (last, chain) = rolled.faces.split_last().unwrap();
		prop_assert!(*last < sides || rolled.capped);
		prop_assert!(chain.iter().all(|&face| face == sides));
	}

	#[test]
	fn fate_sums_in_range(count in 1_u16..=20, seed in any::<u64>()) {
		let rolled = fate::roll(count, &mut FastRandRoller::with_seed(seed));
		prop_assert_eq!(rolled.dice.len(), usize::from(count));
		let bound = i64::from(count);
		prop_assert!((-bound..=bound).contains(&rolled.total()));
	}

	#[test]
	fn total_ignores_term_order(
		a in prop::collection::vec(1_u16..=6, 1..5),
		b in prop::collection::vec(1_u16..=4, 1..5),
		flat in 0_u32..100,
	) {
		let engine = Engine::default();
		let forward = engine
			.evaluate(
				&format!("{}d6+{}d4-{flat}", a.len(), b.len()),
				&mut IterRoller::new(a.iter().chain(&b).copied()),
			)
			.unwrap();
		let backward = engine
			.evaluate(
				&format!("{}d4+{}d6-{flat}", b.len(), a.len()),
				&mut IterRoller::new(b.iter().chain(&a).copied()),
			)
			.unwrap();

		let expected = a.iter().chain(&b).map(|&face| i64::from(face)).sum::<i64>() - i64::from(flat);
		prop_assert_eq!(forward.total, expected);
		prop_assert_eq!(backward.total, expected);
		prop_assert_eq!(forward.total, forward.terms.iter().map(|term| term.contribution()).sum::<i64>());
	}

	#[test]
	fn foreign_letters_rejected(raw in "[0-9+-]{0,3}[abceg-zABCEG-Z][0-9a-z+!-]{0,5}") {
		prop_assert!(parse::parse(&raw).is_err());
	}
}
