use std::cell::RefCell;
use std::collections::HashMap;

use apc40_zynpad::apc40::{Apc40, Color};
use apc40_zynpad::host::{PadGrid, PadIndex, PlayMode, PlayState, Sequencer, SquareLayout};
use apc40_zynpad::prelude::*;
use apc40_zynpad::protocols::Event;
use apc40_zynpad::MidiError;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pads at arbitrary positions, including ones the APC40 can't show
struct SparseGrid {
    bank: u8,
    pads: HashMap<(u32, u32), PadIndex>,
}

impl SparseGrid {
    fn new(bank: u8, pads: &[((u32, u32), PadIndex)]) -> Self {
        Self { bank, pads: pads.iter().cloned().collect() }
    }
}

impl PadGrid for SparseGrid {
    fn bank(&self) -> u8 { self.bank }

    fn get_pad_from_xy(&self, x: u32, y: u32) -> Option<PadIndex> {
        self.pads.get(&(x, y)).copied()
    }

    fn get_xy_from_pad(&self, pad: PadIndex) -> Option<(u32, u32)> {
        self.pads.iter().find(|(_, p)| **p == pad).map(|(xy, _)| *xy)
    }
}

#[derive(Default)]
struct RecordingSequencer {
    toggles: RefCell<Vec<(u8, PadIndex)>>,
    group_lookups: RefCell<usize>,
    states: HashMap<PadIndex, u8>,
    modes: HashMap<PadIndex, PlayMode>,
}

impl Sequencer for RecordingSequencer {
    fn toggle_play_state(&self, bank: u8, pad: PadIndex) {
        self.toggles.borrow_mut().push((bank, pad));
    }

    fn get_group(&self, _bank: u8, pad: PadIndex) -> u8 {
        *self.group_lookups.borrow_mut() += 1;
        (pad % 4) as u8
    }

    fn play_state(&self, _bank: u8, pad: PadIndex) -> u8 {
        self.states.get(&pad).copied().unwrap_or(0)
    }

    fn play_mode(&self, _bank: u8, pad: PadIndex) -> PlayMode {
        self.modes.get(&pad).copied().unwrap_or(PlayMode(1))
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: Vec<(u8, u8, u8, u8)>,
    broken: bool,
}

impl NoteSender for RecordingSender {
    fn send_note_on(&mut self, device_index: u8, channel: u8, note: u8, velocity: u8)
            -> Result<(), MidiError> {
        if self.broken {
            return Err(MidiError::NoPortFound { keywords: &["Akai_APC40"] });
        }
        self.sent.push((device_index, channel, note, velocity));
        Ok(())
    }
}

fn note_on(channel: u8, note: u8) -> Event {
    Event::from_bytes(0, &[0x90 | (channel - 1), note, 0x7F]).unwrap()
}

#[test]
fn press_toggles_the_pad_under_the_button() {
    init_logging();
    let grid = SparseGrid::new(3, &[((2, 2), 17)]);
    let sequencer = RecordingSequencer::default();
    let mut sender = RecordingSender::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, &mut sender);

    assert!(apc.midi_event(note_on(3, 0x37)));
    assert_eq!(*sequencer.toggles.borrow(), vec![(3, 17)]);
    drop(apc);
    assert!(sender.sent.is_empty());
}

#[test]
fn press_without_a_pad_is_still_handled() {
    init_logging();
    let grid = SparseGrid::new(0, &[]);
    let sequencer = RecordingSequencer::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, RecordingSender::default());

    assert!(apc.midi_event(note_on(3, 0x37)));
    assert!(sequencer.toggles.borrow().is_empty());
}

#[test]
fn press_on_a_non_grid_note_is_handled_without_toggling() {
    let grid = SquareLayout::new(0, 64);
    let sequencer = RecordingSequencer::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, RecordingSender::default());

    assert!(apc.midi_event(note_on(1, 0x30)));
    assert!(apc.midi_event(note_on(8, 0x3A)));
    assert!(sequencer.toggles.borrow().is_empty());
}

#[test]
fn non_note_on_events_are_not_handled() {
    let grid = SquareLayout::new(0, 64);
    let sequencer = RecordingSequencer::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, RecordingSender::default());

    // control change on the first channel, note-off on the grid
    assert!(!apc.midi_event(Event(0x00B0_3540)));
    assert!(!apc.midi_event(Event(0x0082_3700)));
    assert!(sequencer.toggles.borrow().is_empty());
}

#[test]
fn channels_past_the_grid_are_not_handled() {
    let grid = SquareLayout::new(0, 64);
    let sequencer = RecordingSequencer::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, RecordingSender::default());

    assert!(!apc.midi_event(note_on(9, 0x35)));
    assert!(!apc.midi_event(note_on(16, 0x37)));
    assert!(sequencer.toggles.borrow().is_empty());
}

#[test]
fn every_grid_button_reaches_its_pad() {
    let grid = SquareLayout::new(1, 64);
    let sequencer = RecordingSequencer::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, RecordingSender::default());

    for channel in 1..=8u8 {
        for note in 0x35..=0x39u8 {
            assert!(apc.midi_event(note_on(channel, note)));
        }
    }

    let toggles = sequencer.toggles.borrow();
    assert_eq!(toggles.len(), 40);
    // column-major layout with 8 rows
    assert_eq!(toggles[0], (1, 0));
    assert_eq!(toggles[1], (1, 1));
    assert_eq!(toggles[5], (1, 8));
    assert_eq!(toggles[39], (1, 7 * 8 + 4));
}

#[test]
fn update_pad_lights_the_button_with_the_state_colour() {
    init_logging();
    let grid = SparseGrid::new(0, &[((2, 4), 5), ((7, 0), 6)]);
    let sequencer = RecordingSequencer::default();
    let mut sender = RecordingSender::default();
    let mut apc = Apc40::new(4, &grid, &sequencer, &mut sender);

    assert!(apc.update_pad(5, PlayState::Playing.as_raw(), PlayMode(2)));
    assert!(apc.update_pad(6, PlayState::Starting.as_raw(), PlayMode(2)));
    assert!(apc.update_pad(6, PlayState::Stopping.as_raw(), PlayMode::DISABLED));
    drop(apc);

    assert_eq!(sender.sent, vec![
        (4, 2, 0x39, Color::Green.velocity()),
        (4, 7, 0x35, Color::GreenBlink.velocity()),
        (4, 7, 0x35, Color::Red.velocity()),
    ]);
    assert_eq!(*sequencer.group_lookups.borrow(), 3);
}

#[test]
fn off_device_pads_are_skipped() {
    let grid = SparseGrid::new(0, &[((8, 0), 1), ((0, 5), 2), ((9, 9), 3)]);
    let sequencer = RecordingSequencer::default();
    let mut sender = RecordingSender::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, &mut sender);

    for pad in 1..=3 {
        assert!(!apc.update_pad(pad, 1, PlayMode(1)));
    }
    // unknown pad
    assert!(!apc.update_pad(99, 1, PlayMode(1)));
    drop(apc);

    assert!(sender.sent.is_empty());
    assert_eq!(*sequencer.group_lookups.borrow(), 0);
}

#[test]
fn unknown_play_state_shows_red() {
    let grid = SparseGrid::new(0, &[((0, 0), 0)]);
    let sequencer = RecordingSequencer::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, RecordingSender::default());

    assert!(apc.update_pad(0, 200, PlayMode(1)));
    assert_eq!(apc.output().sent, vec![(0, 0, 0x35, Color::Red.velocity())]);
}

#[test]
fn failed_sends_are_reported_not_raised() {
    init_logging();
    let grid = SparseGrid::new(0, &[((0, 0), 0)]);
    let sequencer = RecordingSequencer::default();
    let sender = RecordingSender { broken: true, ..Default::default() };
    let mut apc = Apc40::new(0, &grid, &sequencer, sender);

    assert!(!apc.update_pad(0, 1, PlayMode(1)));
    assert_eq!(apc.refresh_pad_bank(), 0);
    apc.end();
}

#[test]
fn refresh_lights_the_bank_and_clears_the_rest() {
    init_logging();
    let grid = SquareLayout::new(0, 9);
    let mut sequencer = RecordingSequencer::default();
    sequencer.states.insert(4, PlayState::Playing.as_raw());
    sequencer.modes.insert(8, PlayMode::DISABLED);
    let mut apc = Apc40::new(1, &grid, &sequencer, RecordingSender::default());

    assert_eq!(apc.refresh_pad_bank(), 9);

    let sent = apc.into_output().sent;
    assert_eq!(sent.len(), 40);
    let off = sent.iter().filter(|&&(_, _, _, v)| v == Color::Off.velocity()).count();
    assert_eq!(off, 31);
    // pad 4 sits in the middle of the 3x3 square
    assert!(sent.contains(&(1, 1, 0x36, Color::Green.velocity())));
    assert!(sent.contains(&(1, 2, 0x37, Color::Red.velocity())));
    assert!(sent.contains(&(1, 7, 0x39, Color::Off.velocity())));
}

#[test]
fn bank_switch_redraws_and_retargets_presses() {
    let mut grid = SquareLayout::new(0, 4);
    let mut sequencer = RecordingSequencer::default();
    sequencer.states.insert(3, PlayState::Playing.as_raw());

    {
        let mut apc = Apc40::new(2, &grid, &sequencer, RecordingSender::default());
        assert_eq!(apc.device_index(), 2);
        assert!(apc.midi_event(note_on(2, 0x36)));
    }

    grid.set_bank(7);
    let mut apc = Apc40::new(2, &grid, &sequencer, RecordingSender::default());
    assert_eq!(apc.refresh_pad_bank(), 4);
    assert!(apc.midi_event(note_on(2, 0x36)));

    assert_eq!(*sequencer.toggles.borrow(), vec![(0, 3), (7, 3)]);
    let sent = apc.into_output().sent;
    assert!(sent.contains(&(2, 1, 0x36, Color::Green.velocity())));
    assert!(sent.iter().all(|&(device, _, _, _)| device == 2));
}

#[test]
fn init_shows_the_current_bank() {
    let grid = SquareLayout::new(0, 4);
    let sequencer = RecordingSequencer::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, RecordingSender::default());

    apc.init();
    let lit = apc.output().sent.iter().filter(|&&(_, _, _, v)| v != 0).count();
    assert_eq!(lit, 4);
}

#[test]
fn end_turns_every_led_off() {
    let grid = SquareLayout::new(0, 64);
    let sequencer = RecordingSequencer::default();
    let mut apc = Apc40::new(0, &grid, &sequencer, RecordingSender::default());

    apc.end();
    let sent = &apc.output().sent;
    assert_eq!(sent.len(), 40);
    assert!(sent.iter().all(|&(_, channel, note, v)| v == 0 && channel < 8 && (0x35..=0x39).contains(&note)));
}

#[test]
fn identifies_apc40_ports() {
    type Driver<'a> = Apc40<'a, SquareLayout, RecordingSequencer, RecordingSender>;

    assert!(Driver::IS_PAD_TRIGGER);
    assert_eq!(Driver::DEVICE_IDS, &["Akai_APC40", "Akai_APC40_MIDI_1"]);
    assert!(Driver::matches("Akai_APC40"));
    assert!(Driver::matches("Akai_APC40_MIDI_1 20:0"));
    assert!(!Driver::matches("Launchpad S"));
}
