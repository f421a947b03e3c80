//! Chat dialogue for the dice bot, independent of any particular chat transport.
//!
//! Each chat gets its own [`Session`], which the transport stores between messages and hands back in for the next
//! one. [`Session::handle()`] turns one incoming [`Input`] into the [`Reply`]s to send, including which keyboard to
//! show. Delivering replies and cleaning up old messages is left to the transport.

#![cfg(feature = "parse")]

use alloc::{
	string::{String, ToString},
	vec::Vec,
};

use crate::{dice::Roller, eval::Engine, parse};

/// Text of the button (and message) that leaves the current mode
pub const BACK: &str = "Назад";

/// Inline main menu buttons
pub const MAIN_MENU: &[&[Button]] = &[&[
	Button {
		text: "Взрывные/Ввод",
		data: Choice::Formula.callback_data(),
	},
	Button {
		text: "1Dx/Судьба",
		data: Choice::QuickRoll.callback_data(),
	},
]];

/// Keypad shown while entering a formula
pub const FORMULA_PAD: &[&[&str]] = &[
	&["1", "2", "3", "4", "5"],
	&["6", "7", "8", "9", "0"],
	&["d", "f", "!", "+", "-"],
	&[BACK],
];

/// Dice shown in quick roll mode
pub const DICE_MENU: &[&[&str]] = &[
	&["1d4", "1d6", "1d8"],
	&["1d10", "1d12", "1d20"],
	&["1d100", "Судьба"],
	&[BACK],
];

/// Reply to a quick roll choice that isn't on the dice menu
pub const INVALID_CHOICE: &str = "Бросок Неверный выбор куба = 0";

/// Messages that trigger a quick fate roll
const FATE_CHOICES: [&str; 2] = ["Судьба", "Кубы судьбы"];

/// What a chat is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[expect(clippy::exhaustive_enums, reason = "The dialogue only has these modes")]
pub enum Mode {
	/// Nothing selected yet
	#[default]
	Idle,

	/// Every message is a formula to roll
	AwaitingFormula,

	/// Every message is a die from the dice menu
	QuickRoll,
}

/// Mode picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Mirrors the main menu")]
pub enum Choice {
	/// Free formula entry (exploding dice, fate dice, modifiers)
	Formula,

	/// Single dice and quick fate rolls from a menu
	QuickRoll,
}

impl Choice {
	/// Gets the callback data attached to the choice's button.
	#[must_use]
	pub const fn callback_data(self) -> &'static str {
		match self {
			Self::Formula => "explosive_dice",
			Self::QuickRoll => "regular_fate_dice",
		}
	}

	/// Finds the choice that a button's callback data belongs to.
	#[must_use]
	pub fn from_callback(data: &str) -> Option<Self> {
		[Self::Formula, Self::QuickRoll]
			.into_iter()
			.find(|choice| choice.callback_data() == data)
	}
}

/// Something a chat participant did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Input<'a> {
	/// The `/start` command
	Start,

	/// A main menu button was pressed
	Choice(Choice),

	/// Any other command, which is ignored
	Command(&'a str),

	/// A plain text message
	Text(&'a str),
}

impl<'a> Input<'a> {
	/// Classifies the text of a message.
	///
	/// # Examples
	/// ```
	/// use epicforge::session::Input;
	///
	/// assert_eq!(Input::from_text("/start"), Input::Start);
	/// assert_eq!(Input::from_text("/help"), Input::Command("/help"));
	/// assert_eq!(Input::from_text("2d6"), Input::Text("2d6"));
	/// ```
	#[must_use]
	pub fn from_text(text: &'a str) -> Self {
		if text.starts_with("/start") {
			Self::Start
		} else if text.starts_with('/') {
			Self::Command(text)
		} else {
			Self::Text(text)
		}
	}
}

/// Inline button with callback data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain button data")]
pub struct Button {
	/// Label on the button
	pub text: &'static str,

	/// Data sent back when pressed
	pub data: &'static str,
}

/// Keyboard to attach to a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Keyboard {
	/// Buttons attached to the message itself
	Inline(&'static [&'static [Button]]),

	/// Persistent reply keyboard, sending the button text as a message
	Reply(&'static [&'static [&'static str]]),

	/// Remove any reply keyboard
	Remove,
}

/// A message to send back to the chat
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Reply {
	/// Message text
	pub text: String,

	/// Keyboard to show with it, if any
	pub keyboard: Option<Keyboard>,
}

impl Reply {
	/// Creates a reply with no keyboard.
	#[must_use]
	pub fn text(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			keyboard: None,
		}
	}

	/// Creates a reply with a keyboard.
	#[must_use]
	pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
		Self {
			text: text.into(),
			keyboard: Some(keyboard),
		}
	}

	/// Main menu with its mode buttons.
	#[must_use]
	pub fn main_menu() -> Self {
		Self::with_keyboard("🎲 Выбери режим:", Keyboard::Inline(MAIN_MENU))
	}
}

/// Dialogue state of a single chat
///
/// # Examples
/// ```
/// use epicforge::{
/// 	dice::roller::Iter as IterRoller,
/// 	eval::Engine,
/// 	session::{Choice, Input, Mode, Session},
/// };
///
/// let engine = Engine::default();
/// let mut roller = IterRoller::new([5, 3]);
/// let mut session = Session::default();
///
/// session.handle(&engine, Input::Choice(Choice::Formula), &mut roller);
/// assert_eq!(session.mode(), Mode::AwaitingFormula);
///
/// let replies = session.handle(&engine, Input::Text("2d6+1"), &mut roller);
/// assert_eq!(replies[0].text, "Бросок 5, 3 [d6] + +1 = 9");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Session {
	/// Current mode
	mode: Mode,
}

impl Session {
	/// Creates a session in the given mode.
	#[must_use]
	pub const fn new(mode: Mode) -> Self {
		Self { mode }
	}

	/// Gets the current mode.
	#[must_use]
	pub const fn mode(&self) -> Mode {
		self.mode
	}

	/// Handles one input, updating the mode and producing the replies to send in order.
	pub fn handle(&mut self, engine: &Engine, input: Input<'_>, roller: &mut impl Roller) -> Vec<Reply> {
		tracing::trace!(mode = ?self.mode, ?input, "handling input");

		match input {
			Input::Start => Vec::from([Reply::main_menu()]),
			Input::Choice(Choice::Formula) => {
				self.mode = Mode::AwaitingFormula;
				Vec::from([Reply::with_keyboard(
					"Введи формулу (2d6+1d8-1 или 1d20!):",
					Keyboard::Reply(FORMULA_PAD),
				)])
			}
			Input::Choice(Choice::QuickRoll) => {
				self.mode = Mode::QuickRoll;
				Vec::from([dice_menu()])
			}
			Input::Command(..) => Vec::new(),
			Input::Text(text) => match self.mode() {
				Mode::Idle => Vec::from([Reply::text("Используй /start для начала")]),
				_ if text.trim() == BACK => self.back(),
				Mode::AwaitingFormula => Vec::from([
					Reply::text(formula_reply(engine, text, roller)),
					Reply::with_keyboard("Введи формулу:", Keyboard::Reply(FORMULA_PAD)),
				]),
				Mode::QuickRoll => Vec::from([Reply::text(quick_reply(engine, text, roller)), dice_menu()]),
			},
		}
	}

	/// Leaves the current mode and goes back to the main menu.
	fn back(&mut self) -> Vec<Reply> {
		self.mode = Mode::Idle;
		Vec::from([
			Reply::with_keyboard("Клавиатура убрана", Keyboard::Remove),
			Reply::main_menu(),
		])
	}
}

/// Dice menu for quick roll mode.
fn dice_menu() -> Reply {
	Reply::with_keyboard("Выбери куб для броска:", Keyboard::Reply(DICE_MENU))
}

/// Rolls a formula, answering with the usage message if it's malformed.
fn formula_reply(engine: &Engine, text: &str, roller: &mut impl Roller) -> String {
	match engine.evaluate(text, roller) {
		Ok(evaled) => evaled.to_string(),
		Err(err) => {
			tracing::debug!(details = %err.details(), "formula rejected in chat");
			parse::USAGE.to_string()
		}
	}
}

/// Rolls a choice from the dice menu.
fn quick_reply(engine: &Engine, text: &str, roller: &mut impl Roller) -> String {
	let text = text.trim();
	if FATE_CHOICES.contains(&text) {
		return engine.roll_fate(roller).to_string();
	}

	match text
		.strip_prefix("1d")
		.and_then(|sides| sides.parse::<u16>().ok())
		.filter(|&sides| sides > 0)
	{
		Some(sides) => engine.roll_single(sides, roller).to_string(),
		None => INVALID_CHOICE.to_string(),
	}
}
