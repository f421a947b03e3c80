use crate::{
	check::{AllowAll, Check, Error, Gate, Masters},
	dice::roller::{Iter as IterRoller, Max as MaxRoller},
	eval::Engine,
	parse::USAGE,
};

#[test]
fn success_at_threshold() {
	let checked = Check { dc: 12 }
		.roll(&Engine::default(), "2d6", &mut MaxRoller)
		.unwrap();
	assert!(checked.is_success());
	assert_eq!(checked.margin(), 0);
}

#[test]
fn failure_below_threshold() {
	let checked = Check { dc: 15 }
		.roll(&Engine::default(), "1d20-1", &mut IterRoller::new([12]))
		.unwrap();
	assert!(!checked.is_success());
	assert_eq!(checked.margin(), -4);
	assert!(checked.to_string().ends_with("Сложность 15: Провал"));
}

#[test]
fn malformed_formula() {
	let err = Check { dc: 10 }
		.roll(&Engine::default(), "1q20", &mut IterRoller::new([]))
		.unwrap_err();
	assert!(matches!(err, Error::Formula(..)));
	assert_eq!(err.to_string(), USAGE);
}

#[test]
fn gate_denies_before_rolling() {
	let masters = Masters::from_iter([7]);
	let result = Check { dc: 10 }.roll_as(&masters, 8, &Engine::default(), "1d20", &mut IterRoller::new([]));
	assert!(matches!(result, Err(Error::Denied(8))));
}

#[test]
fn gate_allows_masters() {
	let mut masters = Masters::default();
	assert!(masters.promote(7));
	assert!(!masters.promote(7));

	let checked = Check { dc: 10 }
		.roll_as(&masters, 7, &Engine::default(), "1d20", &mut IterRoller::new([10]))
		.unwrap();
	assert!(checked.is_success());

	assert!(masters.demote(7));
	assert!(!masters.allows(7));
}

#[test]
fn closure_and_allow_all_gates() {
	let even_only = |participant: i64| participant % 2 == 0;
	assert!(even_only.allows(2));
	assert!(!even_only.allows(3));
	assert!(AllowAll.allows(3));

	let result = Check { dc: 1 }.roll_as(&even_only, 3, &Engine::default(), "1d4", &mut MaxRoller);
	assert!(matches!(result, Err(Error::Denied(3))));
}
