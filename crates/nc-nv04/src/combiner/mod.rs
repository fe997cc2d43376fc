//! NV04 register combiner synthesis
//!
//! A GL combine request is turned into a combiner word in three steps:
//! the mode picks a fixed wiring of the four inputs, each argument input is
//! resolved to a hardware source plus modifier bits, and the mode's output
//! map family is narrowed by the scale flag.

pub mod operand;
pub mod request;
pub mod source;
pub mod types;
pub mod wiring;
pub mod word;

use nc_core::CombinerError;

pub use operand::map_operand;
pub use request::CombinerRequest;
pub use source::resolve_source;
pub use types::{
    Arg, ArgOperand, ArgSource, Channel, CombineMode, HwSource, OutputMap, SlotInput,
    SlotModifiers, MAX_ARGS, SLOT_COUNT,
};
pub use wiring::{MapFamily, SlotBinding, Wiring};
pub use word::CombinerWord;

/// Build the combiner word for `request`
pub fn synthesize(request: &CombinerRequest) -> Result<CombinerWord, CombinerError> {
    let wiring = wiring::table(request.mode);

    let mut slots = [SlotInput::zero(false); SLOT_COUNT];
    for (slot, binding) in slots.iter_mut().zip(wiring.slots.iter()) {
        *slot = match *binding {
            SlotBinding::Arg { index, invert } => bind_arg(request, index, invert)?,
            SlotBinding::Zero { invert } => SlotInput::zero(invert),
        };
    }

    let word = CombinerWord::from_parts(slots, wiring.family.select(request.double_scale));
    tracing::trace!(
        "Combiner unit {} {:?}: {:?} -> 0x{:08X} ({})",
        request.unit,
        request.channel,
        request.mode,
        word.bits(),
        word
    );
    Ok(word)
}

/// Combiner word of a disabled unit.
///
/// Unit 0 passes the fragment color through; later units pass the previous
/// unit's result. Scale flags are ignored.
pub fn passthrough(unit: usize) -> CombinerWord {
    let wiring = &wiring::PASSTHROUGH;

    let mut slots = [SlotInput::zero(false); SLOT_COUNT];
    for (slot, binding) in slots.iter_mut().zip(wiring.slots.iter()) {
        *slot = match *binding {
            SlotBinding::Arg { invert, .. } | SlotBinding::Zero { invert } => {
                SlotInput::zero(invert)
            }
        };
    }
    slots[0].source = resolve_source(ArgSource::Previous, unit);

    CombinerWord::from_parts(slots, wiring.family.select(false))
}

fn bind_arg(request: &CombinerRequest, index: usize, invert: bool) -> Result<SlotInput, CombinerError> {
    let arg = request.arg(index)?;
    Ok(SlotInput::new(
        resolve_source(arg.source, request.unit),
        map_operand(arg.operand, request.channel, invert),
    ))
}
