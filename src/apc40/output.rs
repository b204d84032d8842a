use midir::MidiOutputConnection;

use super::Button;
use crate::host::{PlayMode, PlayState};
use crate::OutputDevice;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
/// The colours a clip launch button can show. The discriminant is the note-on velocity that
/// selects it.
pub enum Color {
	Off = 0,
	Green = 1,
	GreenBlink = 2,
	Red = 3,
	RedBlink = 4,
	Orange = 5,
	OrangeBlink = 6,
}

impl Color {
	pub fn velocity(self) -> u8 {
		self as u8
	}

	/// The colour that represents a pad in the given mode and raw play state.
	///
	/// Disabled pads, stopped pads and states the sequencer doesn't define are red. Playing is
	/// green, about-to-start blinks green and about-to-stop is orange.
	pub fn for_pad(mode: PlayMode, state: u8) -> Color {
		if mode.is_disabled() {
			return Color::Red;
		}

		match PlayState::from_raw(state) {
			Some(PlayState::Stopped) => Color::Red,
			Some(PlayState::Playing) => Color::Green,
			Some(PlayState::Stopping) => Color::Orange,
			Some(PlayState::Starting) => Color::GreenBlink,
			_ => Color::Red,
		}
	}
}

/// The APC40 output connection handler.
///
/// ```no_run
/// use apc40_zynpad::OutputDevice as _;
/// use apc40_zynpad::apc40::{Button, Color};
///
/// let mut output = apc40_zynpad::apc40::Output::guess()?;
/// output.light(Button::new(2, 2), Color::OrangeBlink)?;
/// # Ok::<(), apc40_zynpad::MidiError>(())
/// ```
pub struct Output {
	connection: MidiOutputConnection,
}

impl crate::OutputDevice for Output {
	const MIDI_CONNECTION_NAME: &'static str = "APC40 zynpad output";
	const MIDI_DEVICE_KEYWORDS: &'static [&'static str] = super::DEVICE_IDS;

	fn from_connection(connection: MidiOutputConnection) -> Result<Self, crate::MidiError> {
		return Ok(Self { connection });
	}

	fn send(&mut self, bytes: &[u8]) -> Result<(), crate::MidiError> {
		log::trace!("MIDI out {:02X?}", bytes);
		self.connection.send(bytes)?;
		return Ok(());
	}
}

impl crate::NoteSender for Output {
	// One connection is one device, so the index has nothing left to select
	fn send_note_on(&mut self, _device_index: u8, channel: u8, note: u8, velocity: u8)
			-> Result<(), crate::MidiError> {
		self.send(&[0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F])
	}
}

impl Output {
	/// Light a single grid button. This sends exactly one note-on.
	pub fn light(&mut self, button: Button, color: Color) -> Result<(), crate::MidiError> {
		use crate::NoteSender;

		let (channel, note) = button.outbound_address();
		self.send_note_on(0, channel, note, color.velocity())
	}
}
