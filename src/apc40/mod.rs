/*!
# Akai APC40 (Mk1) binding

The APC40's clip launch grid has 8 columns and 5 rows. Each column sends on its own MIDI channel
(1-8), and the rows are the notes `0x35..=0x39` from top to bottom. Lighting a button is a note-on
to the same note, with the velocity picking one of seven fixed colours.

```text
            ch 1  ch 2        ch 8
note 0x35 [ 0,0 ][ 1,0 ] ... [ 7,0 ]
note 0x36 [ 0,1 ][ 1,1 ] ... [ 7,1 ]
   ...
note 0x39 [ 0,4 ][ 1,4 ] ... [ 7,4 ]
```

Hosts with a larger pad grid only get their top-left 8x5 corner shown.
*/

mod input;
pub use input::*;

mod output;
pub use output::*;

mod driver;
pub use driver::*;

/// Port names the APC40 shows up under
pub const DEVICE_IDS: &[&str] = &["Akai_APC40", "Akai_APC40_MIDI_1"];

/// Columns of the clip launch grid
pub const PAD_WIDTH: u8 = 8;
/// Rows of the clip launch grid
pub const PAD_HEIGHT: u8 = 5;

/// Note of the top grid row
pub const PAD_NOTE_MIN: u8 = 0x35;
/// Note of the bottom grid row
pub const PAD_NOTE_MAX: u8 = 0x39;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A button of the clip launch grid, `x` being the column and `y` the row
pub struct Button {
	x: u8,
	y: u8,
}

impl Button {
	/// Panics if the coordinates are outside the 8x5 grid. See [`Button::from_xy`] for a
	/// checked variant.
	pub fn new(x: u8, y: u8) -> Self {
		assert!(x < PAD_WIDTH);
		assert!(y < PAD_HEIGHT);
		Self { x, y }
	}

	/// The button at a host grid position, or `None` if the position is off-device
	pub fn from_xy(x: u32, y: u32) -> Option<Self> {
		if x >= PAD_WIDTH as u32 || y >= PAD_HEIGHT as u32 {
			return None;
		}
		Some(Self { x: x as u8, y: y as u8 })
	}

	/// The button that sends on the 1-based `channel` with `note`, or `None` if that is not a
	/// grid button
	pub fn from_channel_note(channel: u8, note: u8) -> Option<Self> {
		if !(1..=PAD_WIDTH).contains(&channel) || !(PAD_NOTE_MIN..=PAD_NOTE_MAX).contains(&note) {
			return None;
		}
		Some(Self { x: channel - 1, y: note - PAD_NOTE_MIN })
	}

	pub fn x(self) -> u8 { self.x }
	pub fn y(self) -> u8 { self.y }

	/// The 1-based channel presses of this button arrive on
	pub fn channel(self) -> u8 {
		self.x + 1
	}

	pub fn note(self) -> u8 {
		PAD_NOTE_MIN + self.y
	}

	/// `(channel, note)` to light this button with. The channel here is the bare column index,
	/// unlike the 1-based channel presses arrive on.
	pub fn outbound_address(self) -> (u8, u8) {
		(self.x, self.note())
	}

	/// All 40 grid buttons, row by row
	pub fn all() -> impl Iterator<Item = Button> {
		(0..PAD_HEIGHT).flat_map(|y| (0..PAD_WIDTH).map(move |x| Button { x, y }))
	}
}
