use crate::{
	dice::{
		roll,
		roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller},
		RollOutcome, MAX_EXPLOSIONS,
	},
	eval::Describe,
	formula::Dice,
};

#[test]
fn single_d20() {
	let dice = Dice::new(1, 20);
	let rolled = rolls_in_range(&dice);
	assert_eq!(rolled.faces.len(), 1);
	assert_eq!(rolled.dice, dice);
}

#[test]
fn double_d8() {
	let rolled = rolls_in_range(&Dice::new(2, 8));
	assert_eq!(rolled.faces.len(), 2);
}

#[test]
fn hundred_d42s() {
	let rolled = rolls_in_range(&Dice::new(100, 42));
	assert_eq!(rolled.faces.len(), 100);
	assert!(!rolled.capped);
}

#[test]
fn predetermined_faces() {
	let mut roller = IterRoller::new([2, 5, 1]);
	let rolled = roll(&Dice::new(3, 6), &mut roller, MAX_EXPLOSIONS);
	assert_eq!(rolled.faces, vec![2, 5, 1]);
	assert_eq!(rolled.total(), 8);
	assert_eq!(rolled.explosions(), 0);
	assert!(!roller.can_roll());
}

#[test]
fn max_faces_without_explode() {
	let rolled = roll(&Dice::new(3, 6), &mut MaxRoller, MAX_EXPLOSIONS);
	assert_eq!(rolled.faces, vec![6, 6, 6]);
	assert!(!rolled.capped);
}

#[test]
fn exploding_chain_follows_its_die() {
	let mut roller = IterRoller::new([6, 6, 3, 2, 6, 1]);
	let rolled = roll(&Dice::new_exploding(3, 6), &mut roller, MAX_EXPLOSIONS);
	assert_eq!(rolled.faces, vec![6, 6, 3, 2, 6, 1]);
	assert_eq!(rolled.total(), 24);
	assert_eq!(rolled.explosions(), 3);
	assert!(!rolled.capped);
	assert!(!roller.can_roll());
}

#[test]
fn exploding_d20() {
	for _ in 0..200 {
		let rolled = rolls_in_range(&Dice::new_exploding(1, 20));
		let (last, chain) = rolled.faces.split_last().unwrap();
		assert_ne!(*last, 20);
		assert!(chain.iter().all(|&face| face == 20));
	}
}

#[test]
fn single_sided_explosion_is_capped() {
	let rolled = roll(&Dice::new_exploding(1, 1), &mut MaxRoller, MAX_EXPLOSIONS);
	assert_eq!(rolled.faces.len(), usize::from(MAX_EXPLOSIONS) + 1);
	assert!(rolled.faces.iter().all(|&face| face == 1));
	assert_eq!(rolled.total(), i64::from(MAX_EXPLOSIONS) + 1);
	assert!(rolled.capped);
}

#[test]
fn custom_explosion_cap_applies_per_die() {
	let rolled = roll(&Dice::new_exploding(2, 4), &mut MaxRoller, 5);
	assert_eq!(rolled.faces.len(), 12);
	assert!(rolled.capped);

	let rolled = roll(&Dice::new_exploding(2, 4), &mut MaxRoller, 0);
	assert_eq!(rolled.faces, vec![4, 4]);
	assert!(rolled.capped);
}

#[test]
fn all_dice_sides_occur() {
	let mut roller = FastRandRoller::default();
	let mut faces = Vec::new();
	for _ in 0..100 {
		faces.extend(roll(&Dice::new(100, 20), &mut roller, MAX_EXPLOSIONS).faces);
	}

	assert!(faces.iter().all(|&face| (1..=20).contains(&face)));
	for side in 1..=20 {
		assert!(faces.contains(&side), "side {side} never came up");
	}
}

#[test]
fn seeded_rolls_repeat() {
	let dice = Dice::new_exploding(10, 6);
	let a = roll(&dice, &mut FastRandRoller::with_seed(0x750c_38d5_7440), MAX_EXPLOSIONS);
	let b = roll(&dice, &mut FastRandRoller::with_seed(0x750c_38d5_7440), MAX_EXPLOSIONS);
	assert_eq!(a, b);
}

#[test]
fn describe_plain() {
	let rolled = RollOutcome::from_dice_and_faces(Dice::new(2, 6), [3, 5]);
	assert_eq!(rolled.describe(None), "3, 5 [d6]");
	assert_eq!(rolled.to_string(), "3, 5 [d6]");
}

#[test]
fn describe_exploding_truncated() {
	let rolled = RollOutcome::from_dice_and_faces(Dice::new_exploding(1, 4), [4, 4, 4, 2]);
	assert_eq!(rolled.describe(None), "4, 4, 4, 2 [d4!]");
	assert_eq!(rolled.describe(Some(1)), "4, 3 more... [d4!]");
	assert_eq!(rolled.describe(Some(10)), "4, 4, 4, 2 [d4!]");
}

fn rolls_in_range(dice: &Dice) -> RollOutcome {
	let rolled = roll(dice, &mut FastRandRoller::default(), MAX_EXPLOSIONS);
	assert!(rolled.faces.iter().all(|&face| (1..=dice.sides).contains(&face)));
	assert!(rolled.faces.len() >= usize::from(dice.count));
	rolled
}
