//! Operand to modifier mapping

use super::types::{ArgOperand, Channel, SlotModifiers};

/// Modifier bits for reading an argument through `operand`.
///
/// The hardware has one invert bit per input, so a `ONE_MINUS_*` operand
/// and an inversion requested by the wiring cancel out.
pub fn map_operand(operand: ArgOperand, channel: Channel, invert: bool) -> SlotModifiers {
    let mut modifiers = SlotModifiers::empty();

    // The alpha combiner is already scalar.
    if operand.is_alpha() && !channel.is_alpha() {
        modifiers |= SlotModifiers::ALPHA;
    }

    if invert ^ operand.is_one_minus() {
        modifiers |= SlotModifiers::INVERT;
    }

    modifiers
}
