use super::{decode_grid_press, Button, Color, PAD_WIDTH};
use crate::host::{PadGrid, PadIndex, PlayMode, Sequencer};
use crate::protocols::Event;
use crate::{ControlDevice, NoteSender};

/// The APC40 as a pad trigger for the sequencer.
///
/// Grid presses toggle the pad at that position of the current bank, and every pad update from
/// the host is shown as a colour on the matching button. The driver keeps no state of its own;
/// it borrows the host's grid layout and sequencer, and owns the note sender it lights LEDs with.
///
/// ```no_run
/// use apc40_zynpad::prelude::*;
/// use apc40_zynpad::apc40::{Apc40, Output};
/// use apc40_zynpad::host::{Sequencer, SquareLayout};
///
/// fn attach(sequencer: &impl Sequencer) -> Result<(), apc40_zynpad::MidiError> {
///     let layout = SquareLayout::new(0, 16);
///     let mut apc = Apc40::new(0, &layout, sequencer, Output::guess()?);
///     apc.init();
///     Ok(())
/// }
/// ```
pub struct Apc40<'a, G, S, O> {
	device_index: u8,
	grid: &'a G,
	sequencer: &'a S,
	output: O,
}

impl<'a, G: PadGrid, S: Sequencer, O: NoteSender> Apc40<'a, G, S, O> {
	/// `device_index` is the slot the device manager assigned; it addresses outgoing note-ons.
	pub fn new(device_index: u8, grid: &'a G, sequencer: &'a S, output: O) -> Self {
		Self { device_index, grid, sequencer, output }
	}

	pub fn device_index(&self) -> u8 {
		self.device_index
	}

	pub fn output(&self) -> &O {
		&self.output
	}

	pub fn into_output(self) -> O {
		self.output
	}

	fn light(&mut self, button: Button, color: Color) -> bool {
		let (channel, note) = button.outbound_address();
		match self.output.send_note_on(self.device_index, channel, note, color.velocity()) {
			Ok(()) => true,
			Err(e) => {
				log::warn!("APC40 couldn't light {:?} {:?}: {}", button, color, e);
				false
			}
		}
	}
}

impl<G: PadGrid, S: Sequencer, O: NoteSender> ControlDevice for Apc40<'_, G, S, O> {
	const DEVICE_IDS: &'static [&'static str] = super::DEVICE_IDS;
	const IS_PAD_TRIGGER: bool = true;

	fn init(&mut self) {
		let shown = self.refresh_pad_bank();
		log::debug!("APC40 [{}] initialised, {} pads shown", self.device_index, shown);
	}

	fn midi_event(&mut self, event: Event) -> bool {
		log::debug!("APC40 MIDI handler => {:08X}", event.raw());

		let (note, velocity) = match event.note_on() {
			Some(note_on) => note_on,
			None => return false,
		};
		let channel = event.channel();
		log::debug!(
			"Event type: {:?}; idev: {}; channel: {}; note: {}; val: {}",
			event.event_type(), event.device_index(), channel, note, velocity,
		);

		if !(1..=PAD_WIDTH).contains(&channel) {
			return false;
		}

		// From here on the press belongs to the grid, whether or not it lands on a pad
		let button = match decode_grid_press(event) {
			Some(button) => button,
			None => {
				log::debug!("Note {:#04X} is outside the APC40 launch grid", note);
				return true;
			}
		};

		let bank = self.grid.bank();
		match self.grid.get_pad_from_xy(button.x() as u32, button.y() as u32) {
			Some(pad) => self.sequencer.toggle_play_state(bank, pad),
			None => log::debug!("No pad at {},{} in bank {}", button.x(), button.y(), bank),
		}

		true
	}

	fn update_pad(&mut self, pad: PadIndex, state: u8, mode: PlayMode) -> bool {
		log::debug!("Updating APC40 pad {}", pad);

		let (col, row) = match self.grid.get_xy_from_pad(pad) {
			Some(position) => position,
			None => {
				log::debug!("Pad {} is not part of bank {}", pad, self.grid.bank());
				return false;
			}
		};
		let button = match Button::from_xy(col, row) {
			Some(button) => button,
			None => {
				log::debug!("Pad position {},{} out of bounds for APC40", col, row);
				return false;
			}
		};

		let group = self.sequencer.get_group(self.grid.bank(), pad);
		let color = Color::for_pad(mode, state);
		let (channel, note) = button.outbound_address();
		log::debug!("Lighting PAD {}, group {} => {}, {}, {:?}", pad, group, channel, note, color);

		self.light(button, color)
	}

	fn refresh_pad_bank(&mut self) -> usize {
		let bank = self.grid.bank();
		let mut shown = 0;

		for button in Button::all() {
			match self.grid.get_pad_from_xy(button.x() as u32, button.y() as u32) {
				Some(pad) => {
					let state = self.sequencer.play_state(bank, pad);
					let mode = self.sequencer.play_mode(bank, pad);
					if self.update_pad(pad, state, mode) {
						shown += 1;
					}
				}
				None => {
					self.light(button, Color::Off);
				}
			}
		}

		shown
	}

	fn end(&mut self) {
		for button in Button::all() {
			self.light(button, Color::Off);
		}
	}
}
