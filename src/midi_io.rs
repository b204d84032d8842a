use crate::ok_or_continue;
use midir::{MidiInput, MidiInputConnection, MidiInputPort, MidiOutput, MidiOutputConnection};

/// Checks whether a MIDI port name belongs to a device with one of the given identifiers.
///
/// Depending on the backend, port names carry client/port suffixes ("Akai_APC40 20:0"), so an
/// identifier only needs to be contained in the name.
pub fn port_name_matches(name: &str, keywords: &[&str]) -> bool {
	keywords.iter().any(|keyword| name == *keyword || name.contains(keyword))
}

fn guess_port<T: midir::MidiIO>(midi_io: &T, keywords: &[&str]) -> Option<T::Port> {
	for port in midi_io.ports() {
		let name = ok_or_continue!(midi_io.port_name(&port));

		if port_name_matches(&name, keywords) {
			log::debug!("Picked MIDI port '{}'", name);
			return Some(port);
		}
	}

	return None;
}

/// The host primitive for lighting controller LEDs: "send a note-on to device N".
///
/// Sends are fire-and-forget. An `Err` only means the bytes never left this process; nothing
/// reports whether the device acted on them.
pub trait NoteSender {
	fn send_note_on(&mut self, device_index: u8, channel: u8, note: u8, velocity: u8)
			-> Result<(), crate::MidiError>;
}

impl<T: NoteSender + ?Sized> NoteSender for &mut T {
	fn send_note_on(&mut self, device_index: u8, channel: u8, note: u8, velocity: u8)
			-> Result<(), crate::MidiError> {
		(**self).send_note_on(device_index, channel, note, velocity)
	}
}

pub trait OutputDevice where Self: Sized {
	const MIDI_CONNECTION_NAME: &'static str;
	/// Port names this device shows up under
	const MIDI_DEVICE_KEYWORDS: &'static [&'static str];

	/// Initiate from an existing midir connection.
	fn from_connection(connection: MidiOutputConnection) -> Result<Self, crate::MidiError>;

	fn send(&mut self, bytes: &[u8]) -> Result<(), crate::MidiError>;

	/// Search the midi devices and connect to the first one matching `MIDI_DEVICE_KEYWORDS`.
	fn guess() -> Result<Self, crate::MidiError> {
		let midi_output = MidiOutput::new(crate::APPLICATION_NAME)?;

		let port = guess_port(&midi_output, Self::MIDI_DEVICE_KEYWORDS)
				.ok_or(crate::MidiError::NoPortFound { keywords: Self::MIDI_DEVICE_KEYWORDS })?;

		let connection = midi_output.connect(&port, Self::MIDI_CONNECTION_NAME)?;

		return Self::from_connection(connection);
	}
}

/// Keeps an input connection alive. Dropping this disconnects the callback.
pub struct InputDeviceHandler {
	#[allow(dead_code)]
	connection: MidiInputConnection<()>,
}

pub trait InputDevice {
	const MIDI_CONNECTION_NAME: &'static str;
	/// Port names this device shows up under
	const MIDI_DEVICE_KEYWORDS: &'static [&'static str];
	type Message;

	/// Turn raw bytes from the port into a message. `device_index` is the slot the device
	/// manager assigned to this device. Returns `None` for data that can't be represented.
	fn decode_message(device_index: u8, timestamp: u64, data: &[u8]) -> Option<Self::Message>;

	#[must_use = "If not saved, the connection will be immediately dropped"]
	fn from_port<F>(midi_input: MidiInput, port: &MidiInputPort, device_index: u8, mut user_callback: F)
			-> Result<InputDeviceHandler, crate::MidiError>
			where Self: 'static, F: FnMut(Self::Message) + Send + 'static {

		let midir_callback = move |timestamp: u64, data: &[u8], _: &mut ()| {
			log::trace!("MIDI in [{}] {:02X?}", device_index, data);
			if let Some(msg) = Self::decode_message(device_index, timestamp, data) {
				(user_callback)(msg);
			}
		};

		let connection = midi_input.connect(port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;

		return Ok(InputDeviceHandler { connection });
	}

	/// Search the midi devices and choose the first one matching `MIDI_DEVICE_KEYWORDS`.
	#[must_use = "If not saved, the connection will be immediately dropped"]
	fn guess<F>(device_index: u8, user_callback: F) -> Result<InputDeviceHandler, crate::MidiError>
			where Self: 'static, F: FnMut(Self::Message) + Send + 'static {

		let midi_input = MidiInput::new(crate::APPLICATION_NAME)?;

		let port = guess_port(&midi_input, Self::MIDI_DEVICE_KEYWORDS)
				.ok_or(crate::MidiError::NoPortFound { keywords: Self::MIDI_DEVICE_KEYWORDS })?;

		return Self::from_port(midi_input, &port, device_index, user_callback);
	}
}
