//! Byte layouts of the general, synth and vocoder regions.
//!
//! Offsets are relative to the start of each region.

use super::field::{param, Field, SectionSpec};
use super::general::ArpFlags;
use super::tables;
use super::timbre::VoiceFlags;
use crate::bits::Bitmask;
use crate::model::SLOT_COUNT;

macro_rules! section {
    ($name:expr, [$($field:expr),+ $(,)?] $(,)?) => {
        SectionSpec {
            name: $name,
            fields: &[$($field),+],
        }
    };
}

/// Length of the general region.
pub const GENERAL_LEN: usize = 38;
/// Length of a synth timbre region.
pub const SYNTH_LEN: usize = 108;
/// Length of the vocoder region.
pub const VOCODER_LEN: usize = 104;

const fn byte(offset: usize) -> Field {
    Field::Byte(offset)
}

const fn norm(offset: usize) -> Field {
    Field::normalized(offset)
}

const fn norm_to(offset: usize, limit: i32) -> Field {
    Field::Normalized { offset, limit }
}

const fn flag(offset: usize, mask: u8) -> Field {
    Field::Flag {
        offset,
        mask: Bitmask::Bits(mask),
    }
}

const fn choice(offset: usize, options: &'static [&'static str]) -> Field {
    Field::choice(offset, options)
}

const fn masked(
    offset: usize,
    shift: i8,
    mask: u8,
    options: &'static [&'static str],
) -> Field {
    Field::Choice {
        offset,
        shift,
        mask: Bitmask::Bits(mask),
        options,
    }
}

/// The five general sections.
pub const GENERAL: [SectionSpec; 5] = [
    section!(
        "MOD FX",
        [
            param("TYPE", choice(25, tables::MOD_FX_TYPES)),
            param("LFO SPEED", byte(23)),
            param("DEPTH", byte(24)),
        ],
    ),
    section!(
        "DELAY",
        [
            param("TYPE", choice(22, tables::DELAY_TYPES)),
            param(
                "TEMPO SYNC",
                Field::Flag {
                    offset: 19,
                    mask: Bitmask::Msb,
                },
            ),
            param(
                "DELAY TIME / SYNC NOTE",
                Field::TempoSynced {
                    sync: 19,
                    value: 20,
                    notes: tables::DELAY_TIMEBASES,
                },
            ),
            param("DELAY DEPTH", byte(21)),
        ],
    ),
    section!(
        "EQ",
        [
            param("LO EQ FREQ", choice(28, tables::LO_EQ_FREQS)),
            param("LO EQ GAIN", norm_to(29, 12)),
            param("HI EQ FREQ", choice(26, tables::HI_EQ_FREQS)),
            param("HI EQ GAIN", norm_to(27, 12)),
        ],
    ),
    section!(
        "ARPEG. A",
        [
            param("TEMPO", Field::Word { high: 30, low: 31 }),
            param("RESOLUTION", choice(35, tables::ARP_RESOLUTIONS)),
            param(
                "GATE",
                Field::Percent {
                    offset: 34,
                    max: 100,
                },
            ),
            param("TYPE", masked(33, 0, 0x0F, tables::ARP_TYPES)),
            param(
                "RANGE",
                Field::Counter {
                    offset: 33,
                    shift: -4,
                    mask: Bitmask::Bits(0x03),
                    base: 1,
                },
            ),
        ],
    ),
    section!(
        "ARPEG. B",
        [
            param("LATCH", flag(32, ArpFlags::LATCH.bits())),
            param("SWING", Field::SignedPercent(36)),
            param("KEY SYNC", flag(32, ArpFlags::KEY_SYNC.bits())),
            param(
                "LAST STEP",
                Field::Counter {
                    offset: 14,
                    shift: 0,
                    mask: Bitmask::Bits(0x07),
                    base: 1,
                },
            ),
            param("TARGET TIMBRE", masked(32, -4, 0x03, tables::ARP_TARGETS)),
        ],
    ),
];

const VOICE: SectionSpec = section!(
    "VOICE",
    [
        param("SYNTH/VOCODER", Field::EngineLabel),
        param("SINGLE/LAYER", Field::LayerLabel),
        param("VOICE ASSIGN", Field::VoiceAssign(1)),
        param("TRIGGER MODE", Field::TriggerMode(1)),
        param(
            "UNISON DETUNE",
            Field::UnisonDetune {
                assign: 1,
                value: 2,
            },
        ),
    ],
);

const PITCH: SectionSpec = section!(
    "PITCH",
    [
        param("TRANSPOSE", norm_to(5, 24)),
        param("TUNE", norm_to(3, 50)),
        param("PORTAMENTO", byte(15)),
        param("BEND RANGE", norm_to(4, 12)),
        param("VIBRATO INT", norm(6)),
    ],
);

const OSC1: SectionSpec = section!(
    "OSC 1",
    [
        param("WAVE", masked(7, 0, 0x07, tables::OSC1_WAVES)),
        param("CONTROL 1", Field::Osc1Control1 { wave: 7, value: 8 }),
        param(
            "CONTROL 2",
            Field::Osc1Control2 {
                wave: 7,
                value: 9,
                wavetable: 10,
            },
        ),
    ],
);

macro_rules! lfo_section {
    ($name:literal, $waves:expr, $base:literal) => {
        section!(
            $name,
            [
                param("WAVE", masked($base, 0, 0x03, $waves)),
                param("KEY SYNC", masked($base, -4, 0x03, tables::LFO_KEY_SYNCS)),
                param(
                    "TEMPO SYNC",
                    Field::Flag {
                        offset: $base + 2,
                        mask: Bitmask::Msb,
                    },
                ),
                param(
                    "FREQUENCY / SYNC NOTE",
                    Field::TempoSynced {
                        sync: $base + 2,
                        value: $base + 1,
                        notes: tables::LFO_SYNC_NOTES,
                    },
                ),
            ],
        )
    };
}

macro_rules! patch_section {
    ($name:literal, $base:literal) => {
        section!(
            $name,
            [
                param("SOURCE", masked($base, 0, 0x0F, tables::PATCH_SOURCES)),
                param("DEST", masked($base, -4, 0x0F, tables::PATCH_DESTINATIONS)),
                param("MOD INT", norm($base + 1)),
            ],
        )
    };
}

/// Synth timbre sections (used for timbre 1 and timbre 2).
pub const SYNTH: [SectionSpec; 15] = [
    VOICE,
    PITCH,
    OSC1,
    section!(
        "OSC 2",
        [
            param("WAVE", masked(12, 0, 0x03, tables::OSC2_WAVES)),
            param("OSC MOD", masked(12, -4, 0x03, tables::OSC2_MODS)),
            param("SEMITONE", norm_to(13, 24)),
            param("TUNE", norm(14)),
        ],
    ),
    section!(
        "MIXER",
        [
            param("OSC 1 LEVEL", byte(16)),
            param("OSC 2 LEVEL", byte(17)),
            param("NOISE LEVEL", byte(18)),
        ],
    ),
    section!(
        "FILTER",
        [
            param("TYPE", choice(19, tables::FILTER_TYPES)),
            param("CUTOFF", byte(20)),
            param("RESONANCE", byte(21)),
            param("FILTER EG INT", norm(22)),
            param("FILTER KEY TRACK", norm(24)),
        ],
    ),
    section!(
        "FILTER EG",
        [
            param("ATTACK", byte(30)),
            param("DECAY", byte(31)),
            param("SUSTAIN", byte(32)),
            param("RELEASE", byte(33)),
            param("EG RESET", flag(1, VoiceFlags::FILTER_EG_RESET.bits())),
        ],
    ),
    section!(
        "AMP",
        [
            param("LEVEL", byte(25)),
            param("PANPOT", Field::Panpot(26)),
            param(
                "DISTORTION",
                Field::Flag {
                    offset: 27,
                    mask: Bitmask::Lsb,
                },
            ),
            param("KBD TRACK", norm(29)),
        ],
    ),
    section!(
        "AMP EG",
        [
            param("ATTACK", byte(34)),
            param("DECAY", byte(35)),
            param("SUSTAIN", byte(36)),
            param("RELEASE", byte(37)),
            param("EG RESET", flag(1, VoiceFlags::AMP_EG_RESET.bits())),
        ],
    ),
    lfo_section!("LFO 1", tables::LFO1_WAVES, 38),
    lfo_section!("LFO 2", tables::LFO2_WAVES, 41),
    patch_section!("PATCH 1", 44),
    patch_section!("PATCH 2", 46),
    patch_section!("PATCH 3", 48),
    patch_section!("PATCH 4", 50),
];

/// Vocoder sections.
pub const VOCODER: [SectionSpec; 15] = [
    VOICE,
    PITCH,
    OSC1,
    section!(
        "AUDIO IN 1",
        [
            param("GATE SENSE", byte(19)),
            param("THRESHOLD", byte(20)),
            param("HPF LEVEL", byte(18)),
            param(
                "HPF GATE",
                Field::Flag {
                    offset: 12,
                    mask: Bitmask::Lsb,
                },
            ),
        ],
    ),
    section!(
        "MIXER",
        [
            param("OSC 1 LEVEL", byte(15)),
            param("INST LEVEL", byte(16)),
            param("NOISE LEVEL", byte(17)),
        ],
    ),
    section!(
        "FILTER",
        [
            param(
                "FORMANT SHIFT",
                Field::IntChoice {
                    offset: 21,
                    values: tables::FORMANT_SHIFTS,
                },
            ),
            param("CUTOFF", norm(22)),
            param("RESONANCE", byte(23)),
            param(
                "E.F. SENSE",
                Field::HoldOrByte {
                    offset: 26,
                    hold: 127,
                },
            ),
        ],
    ),
    section!(
        "FC MOD",
        [
            param("SOURCE", choice(24, tables::FC_MOD_SOURCES)),
            param("INTENSITY", norm(25)),
        ],
    ),
    section!(
        "AMP",
        [
            param("LEVEL", byte(27)),
            param("DIRECT LEVEL", byte(28)),
            param(
                "DISTORTION",
                Field::Flag {
                    offset: 29,
                    mask: Bitmask::Lsb,
                },
            ),
            param("KBD TRACK", norm(31)),
        ],
    ),
    section!(
        "AMP EG",
        [
            param("ATTACK", byte(36)),
            param("DECAY", byte(37)),
            param("SUSTAIN", byte(38)),
            param("RELEASE", byte(39)),
            param("EG RESET", flag(1, VoiceFlags::AMP_EG_RESET.bits())),
        ],
    ),
    lfo_section!("LFO 1", tables::LFO1_WAVES, 40),
    lfo_section!("LFO 2", tables::LFO2_WAVES, 43),
    section!(
        "CH LEVEL A",
        [
            param("CH 1 LEVEL", byte(46)),
            param("CH 2 LEVEL", byte(48)),
            param("CH 3 LEVEL", byte(50)),
            param("CH 4 LEVEL", byte(52)),
        ],
    ),
    section!(
        "CH LEVEL B",
        [
            param("CH 5 LEVEL", byte(54)),
            param("CH 6 LEVEL", byte(56)),
            param("CH 7 LEVEL", byte(58)),
            param("CH 8 LEVEL", byte(60)),
        ],
    ),
    section!(
        "CH PAN A",
        [
            param("CH 1 PAN", Field::Panpot(62)),
            param("CH 2 PAN", Field::Panpot(64)),
            param("CH 3 PAN", Field::Panpot(66)),
            param("CH 4 PAN", Field::Panpot(68)),
        ],
    ),
    section!(
        "CH PAN B",
        [
            param("CH 5 PAN", Field::Panpot(70)),
            param("CH 6 PAN", Field::Panpot(72)),
            param("CH 7 PAN", Field::Panpot(74)),
            param("CH 8 PAN", Field::Panpot(76)),
        ],
    ),
];

const fn fits_panel(sections: &[SectionSpec]) -> bool {
    let mut i = 0;
    while i < sections.len() {
        if sections[i].fields.len() > SLOT_COUNT {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    fits_panel(&GENERAL) && fits_panel(&SYNTH) && fits_panel(&VOCODER),
    "a section has at most five knobs"
);
