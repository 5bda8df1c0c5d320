//! Nord colour scheme.
//!
//! Entries are referenced by their position in [`PALETTE`] from the bar and
//! layout definitions, so the order here matters.

/// A gradient pair. Both ends are the same colour for a flat fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair(pub &'static str, pub &'static str);

pub const PALETTE: [ColorPair; 18] = [
    ColorPair("#d8dee9", "#d8dee9"), // 0  default light
    ColorPair("#2e3440", "#2e3440"), // 1  default bolt
    ColorPair("#3b4252", "#3b4252"), // 2  dark grey
    ColorPair("#bf616a", "#bf616a"), // 3  light pink
    ColorPair("#a3be8c", "#a3be8c"), // 4  light green
    ColorPair("#ebcb8b", "#ebcb8b"), // 5  yellow
    ColorPair("#81a1c1", "#81a1c1"), // 6
    ColorPair("#b48ead", "#b48ead"), // 7  purple
    ColorPair("#88c0d0", "#88c0d0"), // 8  light blue
    ColorPair("#e5e9f0", "#e5e9f0"), // 9
    ColorPair("#4c566a", "#4c566a"), // 10
    ColorPair("#bf616a", "#bf616a"), // 11
    ColorPair("#a3be8c", "#a3be8c"), // 12
    ColorPair("#ebcb8b", "#ebcb8b"), // 13
    ColorPair("#81a1c1", "#81a1c1"), // 14
    ColorPair("#b48ead", "#b48ead"), // 15
    ColorPair("#8fbcbb", "#8fbcbb"), // 16
    ColorPair("#eceff4", "#eceff4"), // 17
];

/// The flat colour stored at `index` in the palette.
///
/// Panics if `index` is out of range: palette indices are compile time
/// constants in this crate.
pub fn color(index: usize) -> &'static str {
    PALETTE[index].0
}

/// Prefix an `#rrggbb` colour with an alpha channel derived from `opacity`
/// (clamped to `0.0..=1.0`), giving `#aarrggbb`.
pub fn with_alpha(hex: &str, opacity: f64) -> String {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{}", alpha, hex.trim_start_matches('#'))
}

/// Border and gap settings shared by the themed layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTheme {
    pub border_width: u32,
    pub margin: u32,
    pub border_focus: &'static str,
    pub border_normal: &'static str,
}

// Literal values rather than palette lookups so the theme stays a const.
pub const LAYOUT_THEME: LayoutTheme = LayoutTheme {
    border_width: 2,
    margin: 10,
    border_focus: "#bf616a",
    border_normal: "#2e3440",
};

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex(s: &str) -> bool {
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn palette_pairs_are_flat_hex_colours() {
        for (i, ColorPair(a, b)) in PALETTE.iter().enumerate() {
            assert_eq!(a, b, "entry {} is not a flat colour", i);
            assert!(is_hex(a), "entry {} is not a hex colour: {}", i, a);
        }
    }

    #[test]
    fn theme_matches_palette() {
        assert_eq!(LAYOUT_THEME.border_focus, color(3));
        assert_eq!(LAYOUT_THEME.border_normal, color(1));
    }

    #[test]
    fn alpha_is_prefixed() {
        assert_eq!(with_alpha("#2e3440", 0.9), "#e62e3440");
        assert_eq!(with_alpha("#2e3440", 1.0), "#ff2e3440");
        assert_eq!(with_alpha("2e3440", 2.0), "#ff2e3440");
        assert_eq!(with_alpha("#2e3440", 0.0), "#002e3440");
    }
}
