//! Note name codec
//!
//! Converts between human note names ("C", "C#5", "Db", "Bb2") and MIDI-style
//! pitch values, where C4 (middle C) is 60.
//!
//! Names are `<letter>[#|b][<octave>]`. The octave is a single digit 0-8 and
//! defaults to 4 when omitted. Decoding always uses sharp spelling and drops
//! the octave suffix for octave 4, so `decode(encode("C")) == "C"`.

use std::fmt;

/// Number of chromatic steps in one octave
pub const NOTES_PER_OCTAVE: u8 = 12;

/// Pitch value of C in octave 1
pub const C1_BASE_OFFSET: i32 = 24;

/// Octave implied when a note name has no octave digit
pub const DEFAULT_OCTAVE: u8 = 4;

/// Highest octave digit accepted by [`encode`]
pub const MAX_OCTAVE: u8 = 8;

/// Longest note name accepted by [`encode`] (e.g. "C#5")
pub const MAX_NAME_LEN: usize = 3;

/// The 12 chromatic pitch classes, indexed 0 (C) to 11 (B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    const SHARP_LABELS: [&'static str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];

    const FLAT_LABELS: [&'static str; 12] = [
        "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
    ];

    /// Chromatic index (0-11)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pitch class for a chromatic index, or `None` above 11
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Label in sharp spelling ("C#")
    pub fn sharp_name(self) -> &'static str {
        Self::SHARP_LABELS[self as usize]
    }

    /// Label in flat spelling ("Db")
    pub fn flat_name(self) -> &'static str {
        Self::FLAT_LABELS[self as usize]
    }

    /// Look a label up in the sharp table only
    pub fn from_sharp_name(label: &str) -> Option<Self> {
        Self::SHARP_LABELS
            .iter()
            .position(|l| *l == label)
            .map(|i| Self::ALL[i])
    }

    /// Look a label up in the flat table only
    pub fn from_flat_name(label: &str) -> Option<Self> {
        Self::FLAT_LABELS
            .iter()
            .position(|l| *l == label)
            .map(|i| Self::ALL[i])
    }

    /// Parse a note name without octave.
    ///
    /// A two-character name ending in `#` is looked up in the sharp table;
    /// anything else goes to the flat table. Naturals appear identically in
    /// both, so "C" resolves either way while "C##" or "Cb" are rejected.
    pub fn parse(label: &str) -> Option<Self> {
        if label.chars().count() == 2 && label.ends_with('#') {
            Self::from_sharp_name(label)
        } else {
            Self::from_flat_name(label)
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sharp_name())
    }
}

/// Return the pitch value for a note name, or `None` if it is not recognised.
///
/// The computed value is not clamped to any output range: octave 0 is valid
/// and yields pitches below C1.
pub fn encode(name: &str) -> Option<u8> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return None;
    }

    // A trailing digit is the octave, unless it is the whole name.
    // ASCII digits are one byte, so slicing off the last byte is safe.
    let (label, octave) = match name.chars().last().and_then(|c| c.to_digit(10)) {
        Some(digit) if len > 1 => (&name[..name.len() - 1], digit as u8),
        _ => (name, DEFAULT_OCTAVE),
    };

    let class = PitchClass::parse(label)?;
    if octave > MAX_OCTAVE {
        return None;
    }

    let pitch =
        C1_BASE_OFFSET + NOTES_PER_OCTAVE as i32 * (octave as i32 - 1) + class.index() as i32;
    u8::try_from(pitch).ok()
}

/// Return the note name for a pitch value, in sharp spelling.
///
/// Octave 4 is written without a suffix ("C#"), every other octave with one
/// ("C#5", "C-1").
pub fn decode(pitch: u8) -> String {
    let octave = (pitch / NOTES_PER_OCTAVE) as i32 - 1;
    let class = PitchClass::ALL[(pitch % NOTES_PER_OCTAVE) as usize];

    if octave == DEFAULT_OCTAVE as i32 {
        class.sharp_name().to_string()
    } else {
        format!("{}{}", class.sharp_name(), octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reference_pitches() {
        assert_eq!(encode("C4"), Some(60));
        assert_eq!(encode("A4"), Some(69));
        assert_eq!(encode("C1"), Some(24));
        assert_eq!(encode("C5"), Some(72));
        assert_eq!(encode("B3"), Some(59));
        assert_eq!(encode("C#5"), Some(73));
    }

    #[test]
    fn test_default_octave() {
        assert_eq!(encode("C"), encode("C4"));
        assert_eq!(encode("F#"), encode("F#4"));
        assert_eq!(encode("Bb"), Some(70));
    }

    #[test]
    fn test_flat_sharp_equivalence() {
        let pairs = [("C#", "Db"), ("D#", "Eb"), ("F#", "Gb"), ("G#", "Ab"), ("A#", "Bb")];
        for (sharp, flat) in pairs {
            assert_eq!(encode(sharp), encode(flat), "{} vs {}", sharp, flat);
            for octave in 0..=8 {
                let s = format!("{}{}", sharp, octave);
                let f = format!("{}{}", flat, octave);
                assert!(encode(&s).is_some());
                assert_eq!(encode(&s), encode(&f), "{} vs {}", s, f);
            }
        }
    }

    #[test]
    fn test_octave_zero_is_permitted() {
        assert_eq!(encode("C0"), Some(12));
        assert_eq!(encode("B0"), Some(23));
    }

    #[test]
    fn test_highest_octave() {
        assert_eq!(encode("C8"), Some(108));
        assert_eq!(encode("B8"), Some(119));
        assert_eq!(encode("C9"), None);
    }

    #[test]
    fn test_invalid_shapes() {
        assert_eq!(encode(""), None);
        assert_eq!(encode("Hb"), None);
        assert_eq!(encode("C##"), None);
        assert_eq!(encode("C#45"), None);
        assert_eq!(encode("H"), None);
        assert_eq!(encode("4"), None);
        assert_eq!(encode("c"), None);
        assert_eq!(encode("db"), None);
    }

    #[test]
    fn test_missing_enharmonics_are_rejected() {
        // Only the listed spellings exist in either table
        assert_eq!(encode("E#"), None);
        assert_eq!(encode("B#"), None);
        assert_eq!(encode("Cb"), None);
        assert_eq!(encode("Fb"), None);
        assert_eq!(encode("Db#"), None);
    }

    #[test]
    fn test_sharp_table_only_for_two_char_names() {
        assert_eq!(PitchClass::parse("C#"), Some(PitchClass::CSharp));
        assert_eq!(PitchClass::parse("Db"), Some(PitchClass::CSharp));
        assert_eq!(PitchClass::parse("C"), Some(PitchClass::C));
        assert_eq!(PitchClass::parse("#"), None);
        assert_eq!(PitchClass::parse("C##"), None);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(60), "C");
        assert_eq!(decode(61), "C#");
        assert_eq!(decode(72), "C5");
        assert_eq!(decode(59), "B3");
        assert_eq!(decode(12), "C0");
        assert_eq!(decode(0), "C-1");
        assert_eq!(decode(127), "G9");
    }

    #[test]
    fn test_decode_never_uses_flats() {
        assert_eq!(decode(encode("Db").unwrap()), "C#");
        assert_eq!(decode(encode("Bb2").unwrap()), "A#2");
    }

    #[test]
    fn test_round_trip_sharp_spelling() {
        for octave in 0..=8u8 {
            for class in PitchClass::ALL {
                let name = if octave == DEFAULT_OCTAVE {
                    class.sharp_name().to_string()
                } else {
                    format!("{}{}", class.sharp_name(), octave)
                };
                let pitch = encode(&name).unwrap();
                assert_eq!(decode(pitch), name);
            }
        }
    }

    #[test]
    fn test_explicit_octave_four_loses_suffix() {
        assert_eq!(decode(encode("C4").unwrap()), "C");
        assert_eq!(decode(encode("C5").unwrap()), "C5");
    }

    #[test]
    fn test_pitch_class_labels() {
        assert_eq!(PitchClass::from_index(1), Some(PitchClass::CSharp));
        assert_eq!(PitchClass::from_index(12), None);
        assert_eq!(PitchClass::GSharp.sharp_name(), "G#");
        assert_eq!(PitchClass::GSharp.flat_name(), "Ab");
        assert_eq!(PitchClass::E.flat_name(), PitchClass::E.sharp_name());
        assert_eq!(PitchClass::ASharp.to_string(), "A#");
    }
}
