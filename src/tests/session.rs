use crate::{
	dice::roller::{Iter as IterRoller, Max as MaxRoller},
	eval::Engine,
	parse::USAGE,
	session::{Choice, Input, Keyboard, Mode, Reply, Session, DICE_MENU, FORMULA_PAD, MAIN_MENU},
};

#[test]
fn start_shows_main_menu() {
	let mut session = Session::default();
	let replies = session.handle(&Engine::default(), Input::Start, &mut MaxRoller);
	assert_eq!(replies, vec![Reply::main_menu()]);
	assert_eq!(replies[0].keyboard, Some(Keyboard::Inline(MAIN_MENU)));
	assert_eq!(session.mode(), Mode::Idle);
}

#[test]
fn idle_text_points_to_start() {
	let mut session = Session::default();
	let replies = session.handle(&Engine::default(), Input::Text("2d6"), &mut IterRoller::new([]));
	assert_eq!(replies.len(), 1);
	assert_eq!(replies[0].text, "Используй /start для начала");
}

#[test]
fn commands_are_ignored() {
	let mut session = Session::new(Mode::AwaitingFormula);
	let replies = session.handle(&Engine::default(), Input::from_text("/help"), &mut IterRoller::new([]));
	assert!(replies.is_empty());
	assert_eq!(session.mode(), Mode::AwaitingFormula);
}

#[test]
fn callback_data_maps_to_choices() {
	for button in MAIN_MENU.iter().flat_map(|row| row.iter()) {
		assert!(Choice::from_callback(button.data).is_some());
	}
	assert_eq!(Choice::from_callback("explosive_dice"), Some(Choice::Formula));
	assert_eq!(Choice::from_callback("regular_fate_dice"), Some(Choice::QuickRoll));
	assert_eq!(Choice::from_callback("nope"), None);
}

#[test]
fn formula_mode_rolls() {
	let engine = Engine::default();
	let mut roller = IterRoller::new([4, 6, 2]);
	let mut session = Session::default();

	let replies = session.handle(&engine, Input::Choice(Choice::Formula), &mut roller);
	assert_eq!(replies[0].keyboard, Some(Keyboard::Reply(FORMULA_PAD)));
	assert_eq!(session.mode(), Mode::AwaitingFormula);

	let replies = session.handle(&engine, Input::Text("1d4+1d6!"), &mut roller);
	assert_eq!(replies.len(), 2);
	assert_eq!(replies[0].text, "Бросок 4 [d4] + 6, 2 [d6!] = 12");
	assert_eq!(replies[1].keyboard, Some(Keyboard::Reply(FORMULA_PAD)));
	assert_eq!(session.mode(), Mode::AwaitingFormula);
}

#[test]
fn formula_mode_rejects_with_usage() {
	let mut session = Session::new(Mode::AwaitingFormula);
	let replies = session.handle(&Engine::default(), Input::Text("2x6"), &mut IterRoller::new([]));
	assert_eq!(replies[0].text, USAGE);
	assert_eq!(session.mode(), Mode::AwaitingFormula);
}

#[test]
fn quick_roll_mode() {
	let engine = Engine::default();
	let mut roller = IterRoller::new([17]);
	let mut session = Session::default();

	let replies = session.handle(&engine, Input::Choice(Choice::QuickRoll), &mut roller);
	assert_eq!(replies[0].keyboard, Some(Keyboard::Reply(DICE_MENU)));

	let replies = session.handle(&engine, Input::Text("1d20"), &mut roller);
	assert_eq!(replies[0].text, "Бросок 17 [d20] = 17");
	assert_eq!(replies[1].keyboard, Some(Keyboard::Reply(DICE_MENU)));
	assert_eq!(session.mode(), Mode::QuickRoll);
}

#[test]
fn quick_roll_fate() {
	let mut session = Session::new(Mode::QuickRoll);
	for choice in ["Судьба", "Кубы судьбы"] {
		let replies = session.handle(&Engine::default(), Input::Text(choice), &mut MaxRoller);
		assert_eq!(
			replies[0].text,
			"Бросок  +  ,  +  ,  +  ,  +  = 4\nРезультат: Легендарный"
		);
	}
}

#[test]
fn quick_roll_rejects_unknown_dice() {
	let mut session = Session::new(Mode::QuickRoll);
	for text in ["2d6", "1d0", "1dx", "hello"] {
		let replies = session.handle(&Engine::default(), Input::Text(text), &mut IterRoller::new([]));
		assert_eq!(replies[0].text, "Бросок Неверный выбор куба = 0");
		assert_eq!(replies[1].keyboard, Some(Keyboard::Reply(DICE_MENU)));
	}
}

#[test]
fn back_returns_to_menu() {
	for mode in [Mode::AwaitingFormula, Mode::QuickRoll] {
		let mut session = Session::new(mode);
		let replies = session.handle(&Engine::default(), Input::Text("Назад"), &mut IterRoller::new([]));
		assert_eq!(replies.len(), 2);
		assert_eq!(replies[0].keyboard, Some(Keyboard::Remove));
		assert_eq!(replies[1], Reply::main_menu());
		assert_eq!(session.mode(), Mode::Idle);
	}
}
