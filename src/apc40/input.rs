use crate::protocols::Event;

/// The APC40 input connection creator.
///
/// Raw bytes from the port are packed into [`Event`]s tagged with the device index, ready to be
/// handed to [`ControlDevice::midi_event`](crate::ControlDevice::midi_event).
///
/// ```no_run
/// use apc40_zynpad::InputDevice as _;
///
/// let _input = apc40_zynpad::apc40::Input::guess(0, |event| {
///     println!("{:08X}", event.raw());
/// })?;
/// # Ok::<(), apc40_zynpad::MidiError>(())
/// ```
pub struct Input;

impl crate::InputDevice for Input {
	const MIDI_CONNECTION_NAME: &'static str = "APC40 zynpad input";
	const MIDI_DEVICE_KEYWORDS: &'static [&'static str] = super::DEVICE_IDS;
	type Message = Event;

	fn decode_message(device_index: u8, _timestamp: u64, data: &[u8]) -> Option<Event> {
		Event::from_bytes(device_index, data)
	}
}

/// The grid button a note-on on `event` was pressed on, if any.
///
/// Any note-on in the grid's note window counts as a press, velocity included: the APC40
/// reports releases as separate note-off messages.
pub fn decode_grid_press(event: Event) -> Option<super::Button> {
	let (note, _velocity) = event.note_on()?;
	super::Button::from_channel_note(event.channel(), note)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apc40::Button;
	use crate::InputDevice;

	#[test]
	fn decodes_presses_on_every_column() {
		for column in 0..8u8 {
			let event = Input::decode_message(2, 0, &[0x90 | column, 0x39, 0x7F]).unwrap();
			assert_eq!(event.device_index(), 2);
			assert_eq!(decode_grid_press(event), Some(Button::new(column, 4)));
		}
	}

	#[test]
	fn ignores_everything_but_grid_note_ons() {
		// note-off on the grid
		assert_eq!(decode_grid_press(Event(0x0080_3500)), None);
		// control change
		assert_eq!(decode_grid_press(Event(0x00B0_3540)), None);
		// ninth channel
		assert_eq!(decode_grid_press(Event(0x0098_3540)), None);
		// note below the grid (track selection)
		assert_eq!(decode_grid_press(Event(0x0090_3340)), None);
	}
}
