//! The pieces of the sequencer host a controller driver talks to.
//!
//! The host owns all pad state. A driver only reads it through [`PadGrid`] and [`Sequencer`],
//! and the only thing it ever changes is a pad's play state, via
//! [`Sequencer::toggle_play_state`]. Both traits take `&self`: the host decides how access is
//! serialized.

use std::convert::TryFrom;

/// Index of a pad (sequence) within a bank
pub type PadIndex = usize;

/// How the host lays out the pads of the current bank on its logical grid.
pub trait PadGrid {
	/// The bank that is currently shown
	fn bank(&self) -> u8;

	/// The pad at the given grid position, if there is one
	fn get_pad_from_xy(&self, x: u32, y: u32) -> Option<PadIndex>;

	/// The grid position `(column, row)` of a pad, or `None` if the bank has no such pad
	fn get_xy_from_pad(&self, pad: PadIndex) -> Option<(u32, u32)>;
}

/// The sequencer engine.
pub trait Sequencer {
	/// Start a stopped pad, or stop a playing one. The engine decides whether that happens
	/// immediately or at the next sync point.
	fn toggle_play_state(&self, bank: u8, pad: PadIndex);

	/// The mutually exclusive group a pad belongs to
	fn get_group(&self, bank: u8, pad: PadIndex) -> u8;

	/// The raw play state, see [`PlayState::from_raw`]
	fn play_state(&self, bank: u8, pad: PadIndex) -> u8;

	fn play_mode(&self, bank: u8, pad: PadIndex) -> PlayMode;
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Where a pad is in the sequencer's play state machine
pub enum PlayState {
	Stopped,
	Playing,
	/// Will stop at the next sync point
	Stopping,
	/// Will start at the next sync point
	Starting,
	Restarting,
	StoppingSync,
}

impl PlayState {
	/// Interpret the sequencer's numeric play state. Returns `None` for values the sequencer
	/// doesn't define.
	pub fn from_raw(raw: u8) -> Option<Self> {
		match raw {
			0 => Some(Self::Stopped),
			1 => Some(Self::Playing),
			2 => Some(Self::Stopping),
			3 => Some(Self::Starting),
			4 => Some(Self::Restarting),
			5 => Some(Self::StoppingSync),
			_ => None,
		}
	}

	pub fn as_raw(self) -> u8 {
		match self {
			Self::Stopped => 0,
			Self::Playing => 1,
			Self::Stopping => 2,
			Self::Starting => 3,
			Self::Restarting => 4,
			Self::StoppingSync => 5,
		}
	}
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A pad's play mode (one-shot, loop, ...). Only "disabled" means anything to a controller.
pub struct PlayMode(pub u8);

impl PlayMode {
	pub const DISABLED: PlayMode = PlayMode(0);

	pub fn is_disabled(self) -> bool {
		self == Self::DISABLED
	}
}

impl From<u8> for PlayMode {
	fn from(raw: u8) -> Self {
		Self(raw)
	}
}

/// The zynpad layout: the pads of a bank fill a square grid column by column.
///
/// ```text
/// 0 3 6
/// 1 4 7
/// 2 5 8
/// ```
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct SquareLayout {
	bank: u8,
	columns: u32,
}

impl SquareLayout {
	/// A layout for a bank holding `pad_count` pads. Pads that don't fill a complete square are
	/// not shown.
	pub fn new(bank: u8, pad_count: usize) -> Self {
		// integer square root; the float estimate is off by at most one near 2^64
		let count = pad_count as u128;
		let mut columns = (pad_count as f64).sqrt() as u128;
		while columns * columns > count {
			columns -= 1;
		}
		while (columns + 1) * (columns + 1) <= count {
			columns += 1;
		}
		Self { bank, columns: columns as u32 }
	}

	/// Columns and rows of the square
	pub fn columns(&self) -> u32 { self.columns }

	/// Show another bank with the same pad count
	pub fn set_bank(&mut self, bank: u8) {
		self.bank = bank;
	}
}

impl PadGrid for SquareLayout {
	fn bank(&self) -> u8 { self.bank }

	fn get_pad_from_xy(&self, x: u32, y: u32) -> Option<PadIndex> {
		if x >= self.columns || y >= self.columns {
			return None;
		}
		PadIndex::try_from(x as u64 * self.columns as u64 + y as u64).ok()
	}

	fn get_xy_from_pad(&self, pad: PadIndex) -> Option<(u32, u32)> {
		let pad = u64::try_from(pad).ok()?;
		let side = self.columns as u64;
		if pad >= side * side {
			return None;
		}
		Some(((pad / side) as u32, (pad % side) as u32))
	}
}
