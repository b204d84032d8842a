use crate::host::{PadIndex, PlayMode};
use crate::protocols::Event;

/// Controller drivers implement this trait so a device manager can drive them without knowing
/// which controller is attached.
///
/// None of these methods fail. Input the driver can't make sense of is reported as not handled,
/// and LED updates that can't be shown are reported as unsuccessful; both are logged, neither is
/// an error.
pub trait ControlDevice {
	/// Port names this device shows up under
	const DEVICE_IDS: &'static [&'static str];
	/// Whether the device can launch pads of the sequencer
	const IS_PAD_TRIGGER: bool;

	/// Called by the device manager once the device is connected
	fn init(&mut self);

	/// Handle one inbound event. Returns `false` if the event is not meant for this driver and
	/// should go to other handlers.
	fn midi_event(&mut self, event: Event) -> bool;

	/// Show a pad's current state on the device. `state` is the sequencer's raw play state.
	/// Returns `false` if the pad isn't visible on the device or couldn't be sent.
	fn update_pad(&mut self, pad: PadIndex, state: u8, mode: PlayMode) -> bool;

	/// Redraw everything after the host switched banks. Returns the number of pads shown.
	fn refresh_pad_bank(&mut self) -> usize;

	/// Called before the device is released
	fn end(&mut self);

	/// Whether a MIDI port with this name belongs to this kind of device
	fn matches(port_name: &str) -> bool {
		crate::midi_io::port_name_matches(port_name, Self::DEVICE_IDS)
	}
}
