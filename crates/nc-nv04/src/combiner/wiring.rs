//! Per-mode wiring of the four combiner inputs
//!
//! The combiner computes `in0 * in1 + in2 * in3` followed by an output map.
//! Each GL mode is expressed by tying inputs either to one of its arguments
//! or to constant zero (inverted zero being one).

use super::types::{CombineMode, OutputMap, SLOT_COUNT};

/// What a combiner input is tied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotBinding {
    /// Combine argument `index`, optionally inverted
    Arg { index: usize, invert: bool },
    /// Constant zero, optionally inverted
    Zero { invert: bool },
}

/// Output map family of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFamily {
    /// IDENTITY, or SCALE2 when the output is doubled
    Unsigned,
    /// BIAS, or BIAS_SCALE2 when the output is doubled
    Signed,
}

impl MapFamily {
    pub fn select(self, double_scale: bool) -> OutputMap {
        match (self, double_scale) {
            (MapFamily::Unsigned, false) => OutputMap::Identity,
            (MapFamily::Unsigned, true) => OutputMap::Scale2,
            (MapFamily::Signed, false) => OutputMap::Bias,
            (MapFamily::Signed, true) => OutputMap::BiasScale2,
        }
    }
}

/// Input bindings and output map family of one combine mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring {
    pub slots: [SlotBinding; SLOT_COUNT],
    pub family: MapFamily,
}

const fn arg(index: usize) -> SlotBinding {
    SlotBinding::Arg {
        index,
        invert: false,
    }
}

const fn arg_inv(index: usize) -> SlotBinding {
    SlotBinding::Arg {
        index,
        invert: true,
    }
}

const ZERO: SlotBinding = SlotBinding::Zero { invert: false };
const ONE: SlotBinding = SlotBinding::Zero { invert: true };

/// arg0 * 1
const REPLACE: Wiring = Wiring {
    slots: [arg(0), ONE, ZERO, ZERO],
    family: MapFamily::Unsigned,
};

/// arg0 * arg1
const MODULATE: Wiring = Wiring {
    slots: [arg(0), arg(1), ZERO, ZERO],
    family: MapFamily::Unsigned,
};

/// arg0 * 1 + arg1 * 1
const ADD: Wiring = Wiring {
    slots: [arg(0), ONE, arg(1), ONE],
    family: MapFamily::Unsigned,
};

/// arg0 + arg1 - 0.5
const ADD_SIGNED: Wiring = Wiring {
    slots: [arg(0), ONE, arg(1), ONE],
    family: MapFamily::Signed,
};

/// arg0 * arg2 + arg1 * (1 - arg2)
const INTERPOLATE: Wiring = Wiring {
    slots: [arg(0), arg(2), arg(1), arg_inv(2)],
    family: MapFamily::Unsigned,
};

/// Wiring of `mode`
pub fn table(mode: CombineMode) -> &'static Wiring {
    match mode {
        CombineMode::Replace => &REPLACE,
        CombineMode::Modulate => &MODULATE,
        CombineMode::Add => &ADD,
        CombineMode::AddSigned => &ADD_SIGNED,
        CombineMode::Interpolate => &INTERPOLATE,
    }
}

/// Wiring of a disabled unit: pass the incoming color through unchanged
pub const PASSTHROUGH: Wiring = REPLACE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_stay_within_arity() {
        for mode in CombineMode::ALL {
            for slot in table(mode).slots {
                if let SlotBinding::Arg { index, .. } = slot {
                    assert!(index < mode.arity(), "{:?} reads argument {}", mode, index);
                }
            }
        }
    }

    #[test]
    fn test_every_argument_is_used() {
        for mode in CombineMode::ALL {
            for index in 0..mode.arity() {
                let used = table(mode)
                    .slots
                    .iter()
                    .any(|s| matches!(s, SlotBinding::Arg { index: i, .. } if *i == index));
                assert!(used, "{:?} never reads argument {}", mode, index);
            }
        }
    }

    #[test]
    fn test_only_add_signed_is_signed() {
        for mode in CombineMode::ALL {
            let signed = table(mode).family == MapFamily::Signed;
            assert_eq!(signed, mode == CombineMode::AddSigned);
        }
    }

    #[test]
    fn test_interpolate_inverts_selector_once() {
        let w = table(CombineMode::Interpolate);
        assert_eq!(w.slots[1], SlotBinding::Arg { index: 2, invert: false });
        assert_eq!(w.slots[3], SlotBinding::Arg { index: 2, invert: true });
    }

    #[test]
    fn test_map_family_select() {
        assert_eq!(MapFamily::Unsigned.select(false), OutputMap::Identity);
        assert_eq!(MapFamily::Unsigned.select(true), OutputMap::Scale2);
        assert_eq!(MapFamily::Signed.select(false), OutputMap::Bias);
        assert_eq!(MapFamily::Signed.select(true), OutputMap::BiasScale2);
    }
}
