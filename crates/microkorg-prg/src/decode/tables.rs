//! Option tables, in device index order.

/// MOD FX type (general byte 25).
pub const MOD_FX_TYPES: &[&str] = &["Flanger/Chorus", "Ensemble", "Phaser"];

/// DELAY type (general byte 22).
pub const DELAY_TYPES: &[&str] = &["Stereo Delay", "Cross Delay", "L/R Delay"];

/// Delay time base when tempo synced (general byte 19, low nibble).
pub const DELAY_TIMEBASES: &[&str] = &[
    "1/32", "1/24", "1/16", "1/12", "3/32", "1/8", "1/6", "3/16", "1/4", "1/3", "3/8", "1/2",
    "2/3", "3/4", "1/1",
];

/// Low EQ band frequency (general byte 28).
pub const LO_EQ_FREQS: &[&str] = &[
    "40 Hz", "50 Hz", "60 Hz", "80 Hz", "100 Hz", "120 Hz", "140 Hz", "160 Hz", "180 Hz",
    "200 Hz", "220 Hz", "240 Hz", "260 Hz", "280 Hz", "300 Hz", "320 Hz", "340 Hz", "360 Hz",
    "380 Hz", "400 Hz", "420 Hz", "440 Hz", "460 Hz", "480 Hz", "500 Hz", "600 Hz", "700 Hz",
    "800 Hz", "900 Hz", "1000 Hz",
];

/// High EQ band frequency (general byte 26).
pub const HI_EQ_FREQS: &[&str] = &[
    "1 kHz", "1.25 kHz", "1.5 kHz", "1.75 kHz", "2 kHz", "2.25 kHz", "2.5 kHz", "2.75 kHz",
    "3 kHz", "3.25 kHz", "3.5 kHz", "3.75 kHz", "4 kHz", "4.25 kHz", "4.5 kHz", "4.75 kHz",
    "5 kHz", "5.25 kHz", "5.5 kHz", "5.75 kHz", "6 kHz", "7 kHz", "8 kHz", "9 kHz", "10 kHz",
    "11 kHz", "12 kHz", "14 kHz", "16 kHz", "18 kHz",
];

/// Arpeggiator resolution (general byte 35).
pub const ARP_RESOLUTIONS: &[&str] = &["1/24", "1/16", "1/12", "1/8", "1/6", "1/4"];

/// Arpeggiator type (general byte 33, low nibble).
pub const ARP_TYPES: &[&str] = &["Up", "Down", "Alternate 1", "Alternate 2", "Random", "Trigger"];

/// Arpeggiator target timbre (general byte 32, bits 4-5).
pub const ARP_TARGETS: &[&str] = &["Both", "Timbre 1", "Timbre 2"];

/// Voice assign (timbre byte 1, bits 6-7).
pub const VOICE_ASSIGNS: &[&str] = &["Mono", "Poly", "Unison"];

/// Index of `"Poly"` in [`VOICE_ASSIGNS`].
pub const VOICE_ASSIGN_POLY: u8 = 1;

/// Index of `"Unison"` in [`VOICE_ASSIGNS`].
pub const VOICE_ASSIGN_UNISON: u8 = 2;

/// Trigger mode (timbre byte 1, bit 3).
pub const TRIGGER_MODES: &[&str] = &["Single", "Multi"];

/// OSC 1 waveform (timbre byte 7).
pub const OSC1_WAVES: &[&str] = &[
    "Saw", "Square", "Triangle", "Sine", "Vox", "DWGS", "Noise", "Audio In",
];

/// Index of `"DWGS"` in [`OSC1_WAVES`].
pub const OSC1_WAVE_DWGS: u8 = 5;

/// OSC 2 waveform (synth byte 12, bits 0-1).
pub const OSC2_WAVES: &[&str] = &["Saw", "Square", "Triangle"];

/// OSC 2 modulation (synth byte 12, bits 4-5).
pub const OSC2_MODS: &[&str] = &["OFF", "Ring", "Sync", "Ring-Sync"];

/// Synth filter type (synth byte 19).
pub const FILTER_TYPES: &[&str] = &["-24 dB LPF", "-12 dB LPF", "-12 dB BPF", "-12 dB HPF"];

/// LFO 1 waveform.
pub const LFO1_WAVES: &[&str] = &["Saw", "Square 1", "Triangle", "Sample & Hold"];

/// LFO 2 waveform.
pub const LFO2_WAVES: &[&str] = &["Saw", "Square 2", "Sine", "Sample & Hold"];

/// LFO key sync.
pub const LFO_KEY_SYNCS: &[&str] = &["OFF", "Timbre", "Voice"];

/// LFO sync note. Runs in the opposite order to [`DELAY_TIMEBASES`].
pub const LFO_SYNC_NOTES: &[&str] = &[
    "1/1", "3/4", "2/3", "1/2", "3/8", "1/3", "1/4", "3/16", "1/6", "1/8", "3/32", "1/12",
    "1/16", "1/24", "1/32",
];

/// Virtual patch source (low nibble).
pub const PATCH_SOURCES: &[&str] = &[
    "Filter EG",
    "Amp EG",
    "LFO 1",
    "LFO 2",
    "Velocity",
    "Keyboard Track",
    "Pitch Bend",
    "Mod. Wheel",
];

/// Virtual patch destination (high nibble).
pub const PATCH_DESTINATIONS: &[&str] = &[
    "Pitch",
    "OSC 2 Tune",
    "OSC 1 Control 1",
    "Noise Level",
    "Cutoff",
    "Amp Level",
    "Pan",
    "LFO 2 Frequency",
];

/// Vocoder formant shift (vocoder byte 21).
pub const FORMANT_SHIFTS: &[i32] = &[0, 1, 2, -1, -2];

/// Vocoder FC modulation source (vocoder byte 24).
pub const FC_MOD_SOURCES: &[&str] = &[
    "Amp EG",
    "LFO 1",
    "LFO 2",
    "Velocity",
    "Keyboard Track",
    "Pitch Bend",
    "Mod. Wheel",
];
