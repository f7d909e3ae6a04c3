//! Horizontal advance between letters.

use crate::api::config::SpacingTable;

/// Extra room after 'S' when followed by 'a'.
pub const S_A_KERNING: f32 = 7.0;

const NARROW: &[char] = &['i', 'j', 'l', '.', ',', '!'];
const WIDE: &[char] = &['m', 'w', 'W'];

/// Unscaled advance after `ch`, given the character that follows it.
///
/// Width category picks the base value; everything outside the narrow and
/// wide sets (digits, other punctuation, non-Latin) is standard. The single
/// kerning pair 'S' → 'a' adds [`S_A_KERNING`].
pub fn advance(ch: char, next: Option<char>, table: &SpacingTable) -> f32 {
    let mut spacing = if NARROW.contains(&ch) {
        table.narrow
    } else if WIDE.contains(&ch) {
        table.wide
    } else {
        table.standard
    };

    if ch == 'S' && next == Some('a') {
        spacing += S_A_KERNING;
    }

    spacing
}
