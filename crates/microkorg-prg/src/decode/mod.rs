//! Record decoders.
//!
//! [`general`] handles the program-wide region, [`timbre`] the synth and
//! vocoder regions. Both are driven by the static tables in [`layout`] and
//! interpreted by [`field`].

pub mod field;
pub mod general;
pub mod layout;
pub mod tables;
pub mod timbre;

pub use general::{decode_general, ArpFlags, GeneralData, VoiceMode};
pub use timbre::{decode_timbre, Engine, VoiceFlags};
