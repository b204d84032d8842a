/*!
Drive a pad-based step sequencer from the clip launch grid of an Akai APC40 (Mk1).

Pressing a grid button toggles the pad at that position of the sequencer's current bank, and the
sequencer's play states are shown as button colours: red for stopped or disabled pads, green for
playing ones, blinking green while a pad waits to start and orange while it waits to stop.

The sequencer itself stays on the other side of two small traits, [`host::PadGrid`] and
[`host::Sequencer`]. The driver, [`apc40::Apc40`], borrows both and implements
[`ControlDevice`], the interface a device manager uses to talk to any controller.

# Wiring it up

```no_run
use apc40_zynpad::prelude::*;
use apc40_zynpad::apc40::{self, Apc40};
use apc40_zynpad::host::{PadIndex, PlayMode, Sequencer, SquareLayout};

struct Engine;

impl Sequencer for Engine {
    fn toggle_play_state(&self, bank: u8, pad: PadIndex) { println!("toggle {}:{}", bank, pad) }
    fn get_group(&self, _bank: u8, _pad: PadIndex) -> u8 { 0 }
    fn play_state(&self, _bank: u8, _pad: PadIndex) -> u8 { 0 }
    fn play_mode(&self, _bank: u8, _pad: PadIndex) -> PlayMode { PlayMode(1) }
}

let (sender, receiver) = std::sync::mpsc::channel();
let _input = apc40::Input::guess(0, move |event| { let _ = sender.send(event); })?;

let layout = SquareLayout::new(1, 16);
let engine = Engine;
let mut apc = Apc40::new(0, &layout, &engine, apc40::Output::guess()?);
apc.init();

for event in receiver.iter() {
    if !apc.midi_event(event) {
        // not a grid press, hand it to someone else
    }
}
# Ok::<(), apc40_zynpad::MidiError>(())
```

# Low-level access

[`apc40::Output`] lights single buttons with exactly one note-on per call, and
[`protocols::Event`] decodes the packed event word the host passes around.
*/

pub mod util;

pub mod protocols;

pub mod host;

mod device;
pub use device::*;

mod midi_io;
pub use midi_io::*;

mod errors;
pub use errors::*;

pub mod apc40;

pub mod prelude {
    pub use crate::device::ControlDevice;
    pub use crate::midi_io::{InputDevice, NoteSender, OutputDevice};
}

/// Identifier used for e.g. the midi port names etc.
const APPLICATION_NAME: &str = "apc40-zynpad";
