//! Texture environment emission
//!
//! Each texture unit owns a pair of combiner registers laid out as
//! `COMBINE_ALPHA(unit)`, `COMBINE_COLOR(unit)`, so both are written with
//! one two-word method. The shared combine factor register follows.

use nc_core::{CombinerError, Result};

use crate::combiner::{self, Channel, CombinerRequest, CombinerWord};
use crate::format::pack_argb8888;
use crate::methods::{combine_alpha, NV04_MULTITEX_TRIANGLE_COMBINE_FACTOR, TEXTURE_UNITS};
use crate::pushbuf::PushBuffer;
use crate::state::{Context, DirtyState, TexUnitState};

/// Result of emitting one unit's texture environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexEnvOutcome {
    /// Combiner registers and combine factor were written
    Emitted {
        alpha: CombinerWord,
        color: CombinerWord,
    },
    /// No multitexture engine; the blend state path takes over
    DeferredToBlend,
}

/// Compute both combiner words of a unit without touching any state
pub fn combiner_words(
    state: &TexUnitState,
    unit: usize,
) -> std::result::Result<(CombinerWord, CombinerWord), CombinerError> {
    if unit >= TEXTURE_UNITS {
        return Err(CombinerError::InvalidUnit(unit));
    }
    if !state.enabled {
        let word = combiner::passthrough(unit);
        return Ok((word, word));
    }

    let alpha = combiner::synthesize(&CombinerRequest::build(state, unit, Channel::Alpha)?)?;
    let color = combiner::synthesize(&CombinerRequest::build(state, unit, Channel::Color)?)?;
    Ok((alpha, color))
}

/// Emit the texture environment of `unit`
pub fn emit_tex_env<P: PushBuffer + ?Sized>(
    ctx: &mut Context,
    push: &mut P,
    unit: usize,
) -> Result<TexEnvOutcome> {
    if unit >= TEXTURE_UNITS {
        return Err(CombinerError::InvalidUnit(unit).into());
    }

    if !ctx.engine.has_multitex() {
        tracing::warn!(
            "Engine class 0x{:04X} has no register combiners, deferring unit {} to blend state",
            ctx.engine.class,
            unit
        );
        ctx.mark_dirty(DirtyState::BLEND);
        return Ok(TexEnvOutcome::DeferredToBlend);
    }

    let (alpha, color) = combiner_words(&ctx.tex_units[unit], unit).map_err(|e| {
        tracing::error!("Texture unit {}: {}", unit, e);
        e
    })?;
    let factor = pack_argb8888(ctx.tex_units[0].env_color);

    push.begin_method(&ctx.engine, combine_alpha(unit), 2)?;
    push.out(alpha.bits())?;
    push.out(color.bits())?;

    push.begin_method(&ctx.engine, NV04_MULTITEX_TRIANGLE_COMBINE_FACTOR, 1)?;
    push.out(factor)?;

    tracing::debug!(
        "Texture unit {}: alpha 0x{:08X} color 0x{:08X} factor 0x{:08X}",
        unit,
        alpha.bits(),
        color.bits(),
        factor
    );
    Ok(TexEnvOutcome::Emitted { alpha, color })
}

/// Emit every texture unit in order, stopping at the first failure
pub fn emit_tex_envs<P: PushBuffer + ?Sized>(ctx: &mut Context, push: &mut P) -> Result<Vec<TexEnvOutcome>> {
    let mut outcomes = Vec::with_capacity(TEXTURE_UNITS);
    for unit in 0..TEXTURE_UNITS {
        let outcome = emit_tex_env(ctx, push, unit)?;
        ctx.dirty.remove(DirtyState::tex_env(unit));
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
