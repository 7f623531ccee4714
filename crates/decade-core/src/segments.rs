use std::fmt;

use crate::digit::{Digit, DIGIT_COUNT};
use crate::fault::Fault;

/// Mask covering the seven segment bits of an output byte.
pub const SEGMENT_MASK: u8 = 0x7F;

/// One segment of the display, named per the usual clockwise convention:
/// `A` is the top bar, `G` the middle bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Segment {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
}

impl Segment {
    /// All seven segments in bus bit order, `A` (bit 0) first.
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// Bit position of this segment within a pattern byte.
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Single-bit mask for this segment.
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }
}

/// A 7-bit segment pattern as driven on the display bus.
///
/// Bit order is `G,F,E,D,C,B,A` from most to least significant; bit 7 is
/// never set. Construction from raw bytes is masked at the boundary, so a
/// pattern can never carry the decimal point bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// Builds a pattern from raw bits, keeping only the seven segment bits.
    #[must_use]
    pub const fn from_bits_truncated(bits: u8) -> Self {
        Self(bits & SEGMENT_MASK)
    }

    /// Raw pattern value with bit 7 always clear.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` when `segment` is lit in this pattern.
    #[must_use]
    pub const fn contains(self, segment: Segment) -> bool {
        self.0 & segment.mask() != 0
    }

    /// Number of lit segments.
    #[must_use]
    pub const fn lit_count(self) -> u32 {
        self.0.count_ones()
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07b}", self.0)
    }
}

/// Digit-to-pattern decoder table, one row per counter state.
///
/// Row values read `G,F,E,D,C,B,A` from most to least significant bit.
pub const SEGMENT_PATTERNS: [SegmentPattern; DIGIT_COUNT] = [
    SegmentPattern(0b0011_1111), // 0
    SegmentPattern(0b0000_0110), // 1
    SegmentPattern(0b0101_1011), // 2
    SegmentPattern(0b0100_1111), // 3
    SegmentPattern(0b0110_0110), // 4
    SegmentPattern(0b0110_1101), // 5
    SegmentPattern(0b0111_1101), // 6
    SegmentPattern(0b0000_0111), // 7
    SegmentPattern(0b0111_1111), // 8
    SegmentPattern(0b0110_1111), // 9
];

/// Decodes a digit into its display pattern.
///
/// Total over [`Digit`]: the table holds a row for every representable value,
/// so the lookup cannot fail. The decoder keeps no state; callers recompute
/// the pattern at every observation point.
#[must_use]
pub const fn decode(digit: Digit) -> SegmentPattern {
    SEGMENT_PATTERNS[digit.index()]
}

/// Decodes a raw byte, rejecting values without a table row.
///
/// # Errors
///
/// Returns [`Fault::SegmentLookupOutOfRange`] when `value` is not a decimal
/// digit.
pub const fn decode_value(value: u8) -> Result<SegmentPattern, Fault> {
    match Digit::from_u8(value) {
        Some(digit) => Ok(decode(digit)),
        None => Err(Fault::SegmentLookupOutOfRange { value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{decode, decode_value, Segment, SegmentPattern, SEGMENT_MASK, SEGMENT_PATTERNS};
    use crate::digit::Digit;
    use crate::fault::Fault;

    #[test]
    fn segment_masks_are_disjoint_and_cover_the_low_seven_bits() {
        let mut combined = 0_u8;
        for segment in Segment::ALL {
            assert_eq!(combined & segment.mask(), 0);
            combined |= segment.mask();
        }
        assert_eq!(combined, SEGMENT_MASK);
    }

    #[test]
    fn every_digit_has_a_unique_pattern() {
        let patterns: HashSet<u8> = SEGMENT_PATTERNS.iter().map(|p| p.bits()).collect();
        assert_eq!(patterns.len(), SEGMENT_PATTERNS.len());
    }

    #[test]
    fn patterns_never_set_the_top_bit() {
        for digit in Digit::ALL {
            assert_eq!(decode(digit).bits() & !SEGMENT_MASK, 0);
        }
        assert_eq!(SegmentPattern::from_bits_truncated(0xFF).bits(), SEGMENT_MASK);
    }

    #[test]
    fn table_rows_match_display_conventions() {
        let eight = decode(Digit::from_u8(8).expect("digit"));
        assert_eq!(eight.lit_count(), 7);

        let one = decode(Digit::from_u8(1).expect("digit"));
        assert!(one.contains(Segment::B));
        assert!(one.contains(Segment::C));
        assert_eq!(one.lit_count(), 2);

        let zero = decode(Digit::ZERO);
        assert!(!zero.contains(Segment::G));
        assert_eq!(zero.lit_count(), 6);
    }

    #[test]
    fn decode_value_accepts_exactly_the_decimal_digits() {
        for value in 0_u8..=9 {
            let pattern = decode_value(value).expect("decimal digit decodes");
            let digit = Digit::from_u8(value).expect("digit");
            assert_eq!(pattern, decode(digit));
        }

        assert_eq!(
            decode_value(10),
            Err(Fault::SegmentLookupOutOfRange { value: 10 })
        );
        assert_eq!(
            decode_value(0xFE),
            Err(Fault::SegmentLookupOutOfRange { value: 0xFE })
        );
    }

    #[test]
    fn display_formats_patterns_as_seven_binary_digits() {
        assert_eq!(decode(Digit::ZERO).to_string(), "0111111");
        let seven = decode(Digit::from_u8(7).expect("digit"));
        assert_eq!(seven.to_string(), "0000111");
    }
}
