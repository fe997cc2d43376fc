//! Combiner register word layout
//!
//! The alpha and color combiner registers share one layout: four 8-bit
//! input fields followed by a 3-bit output map.
//!
//! ```text
//!  31  29 28    26 25 24 23 ...  8 7    5 4    2 1  0
//! [ map ][ src3  ][A3][I3]  ...   [ ---- ][ src0 ][A0][I0]
//! ```

use std::fmt;

use super::types::{HwSource, OutputMap, SlotInput, SlotModifiers, SLOT_COUNT};

const SLOT_BITS: u32 = 8;
const INVERSE_BIT: u32 = 1 << 0;
const ALPHA_BIT: u32 = 1 << 1;
const SOURCE_SHIFT: u32 = 2;
const SOURCE_MASK: u32 = 0x7;
const MAP_SHIFT: u32 = 29;
const MAP_MASK: u32 = 0x7;

const fn slot_shift(slot: usize) -> u32 {
    slot as u32 * SLOT_BITS
}

/// A packed combiner register value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CombinerWord(pub u32);

impl CombinerWord {
    /// Pack four inputs and an output map
    pub fn from_parts(slots: [SlotInput; SLOT_COUNT], map: OutputMap) -> Self {
        let mut bits = (map as u32) << MAP_SHIFT;
        for (i, input) in slots.iter().enumerate() {
            bits |= encode_slot(input) << slot_shift(i);
        }
        Self(bits)
    }

    /// Raw register value
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Decode input `slot`, or `None` if its source field is not a valid selector
    pub fn slot(self, slot: usize) -> Option<SlotInput> {
        if slot >= SLOT_COUNT {
            return None;
        }
        let field = (self.0 >> slot_shift(slot)) & 0xFF;
        let source = HwSource::from_bits(((field >> SOURCE_SHIFT) & SOURCE_MASK) as u8)?;
        let mut modifiers = SlotModifiers::empty();
        if field & INVERSE_BIT != 0 {
            modifiers |= SlotModifiers::INVERT;
        }
        if field & ALPHA_BIT != 0 {
            modifiers |= SlotModifiers::ALPHA;
        }
        Some(SlotInput::new(source, modifiers))
    }

    /// Decode all four inputs
    pub fn slots(self) -> [Option<SlotInput>; SLOT_COUNT] {
        [self.slot(0), self.slot(1), self.slot(2), self.slot(3)]
    }

    /// Decode the output map field
    pub fn output_map(self) -> Option<OutputMap> {
        OutputMap::from_bits(((self.0 >> MAP_SHIFT) & MAP_MASK) as u8)
    }
}

fn encode_slot(input: &SlotInput) -> u32 {
    let mut field = (input.source as u32) << SOURCE_SHIFT;
    if input.modifiers.contains(SlotModifiers::INVERT) {
        field |= INVERSE_BIT;
    }
    if input.modifiers.contains(SlotModifiers::ALPHA) {
        field |= ALPHA_BIT;
    }
    field
}

impl fmt::Display for CombinerWord {
    /// e.g. `TEXTURE0 * PRIMARY_COLOR + ZERO * ZERO [IDENTITY]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots();
        for (i, slot) in slots.iter().enumerate() {
            if i == 1 || i == 3 {
                write!(f, " * ")?;
            } else if i == 2 {
                write!(f, " + ")?;
            }
            match slot {
                Some(input) => {
                    let name = input.source.name();
                    match (input.is_inverted(), input.is_alpha()) {
                        (false, false) => write!(f, "{}", name)?,
                        (false, true) => write!(f, "{}.a", name)?,
                        (true, false) => write!(f, "(1-{})", name)?,
                        (true, true) => write!(f, "(1-{}.a)", name)?,
                    }
                }
                None => write!(f, "?")?,
            }
        }
        match self.output_map() {
            Some(map) => write!(f, " [{}]", map.name()),
            None => write!(f, " [?]"),
        }
    }
}
