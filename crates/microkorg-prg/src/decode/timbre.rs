//! Timbre decoder shared by the synth and vocoder engines.
//!
//! Both engines are decoded by the same interpreter; only the layout
//! differs.

use super::field::{decode_section, FieldContext, Region, SectionSpec};
use super::general::VoiceMode;
use super::layout;
use crate::error::Result;
use crate::model::Section;
use crate::wavetable::WaveNameResolver;
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Voice control byte (timbre byte 1). Bits 6-7 hold the voice assign.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VoiceFlags: u8 {
        /// Multi trigger (single trigger when clear)
        const TRIGGER_MULTI = 0x08;
        /// Filter EG reset on note on
        const FILTER_EG_RESET = 0x10;
        /// Amp EG reset on note on
        const AMP_EG_RESET = 0x20;
    }
}

/// Sound engine a timbre region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// Synth timbre (108-byte region).
    Synth,
    /// Vocoder (104-byte region).
    Vocoder,
}

impl Engine {
    /// Section layout of this engine.
    pub fn layout(self) -> &'static [SectionSpec] {
        match self {
            Engine::Synth => &layout::SYNTH,
            Engine::Vocoder => &layout::VOCODER,
        }
    }
}

/// Decode one timbre region into its fifteen sections.
///
/// `base` is the record offset of the region and only feeds error offsets.
pub fn decode_timbre(
    engine: Engine,
    bytes: &[u8],
    base: usize,
    voice_mode: VoiceMode,
    names: &dyn WaveNameResolver,
) -> Result<Vec<Section>> {
    let region = Region::new(bytes, base);
    let ctx = FieldContext { voice_mode, names };
    let sections = engine
        .layout()
        .iter()
        .map(|spec| decode_section(spec, &region, &ctx))
        .collect::<Result<Vec<_>>>()?;
    log::debug!(
        "decoded {:?} region at {base}: {} sections",
        engine,
        sections.len()
    );
    Ok(sections)
}
