use decade_core::{Segment, SegmentPattern};

/// Renders a pattern as a three-line glyph drawn with `_` and `|` strokes.
///
/// Layout follows the display: segment `A` is the top bar, `F` and `B` the
/// upper verticals, `G` the middle bar, `E` and `C` the lower verticals and
/// `D` the bottom bar.
#[must_use]
pub fn glyph(pattern: SegmentPattern) -> String {
    let stroke = |segment: Segment, lit: &'static str| {
        if pattern.contains(segment) {
            lit
        } else {
            " "
        }
    };

    format!(
        " {} \n{}{}{}\n{}{}{}",
        stroke(Segment::A, "_"),
        stroke(Segment::F, "|"),
        stroke(Segment::G, "_"),
        stroke(Segment::B, "|"),
        stroke(Segment::E, "|"),
        stroke(Segment::D, "_"),
        stroke(Segment::C, "|"),
    )
}
