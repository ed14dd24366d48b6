//! Series colours: parsed once from type tables, then handed to plotters
//! (image output) or turned into a true-colour escape (terminal preview).

use plotters::style::RGBColor;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex colour digit in '{0}'")]
    InvalidHexDigit(String),
    #[error("unknown colour '{0}' (use a name or #RRGGBB)")]
    InvalidHexLength(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> SeriesColor {
    SeriesColor { r, g, b }
}

/// Ten-colour cycle used for series without an explicit colour.
pub const DEFAULT_CYCLE: [SeriesColor; 10] = [
    rgb(0x1f, 0x77, 0xb4),
    rgb(0xff, 0x7f, 0x0e),
    rgb(0x2c, 0xa0, 0x2c),
    rgb(0xd6, 0x27, 0x28),
    rgb(0x94, 0x67, 0xbd),
    rgb(0x8c, 0x56, 0x4b),
    rgb(0xe3, 0x77, 0xc2),
    rgb(0x7f, 0x7f, 0x7f),
    rgb(0xbc, 0xbd, 0x22),
    rgb(0x17, 0xbe, 0xcf),
];

/// Names accepted in type tables besides `#RRGGBB`.
pub const NAMED_COLORS: [(&str, SeriesColor); 16] = [
    ("black", rgb(0, 0, 0)),
    ("red", rgb(0xff, 0, 0)),
    ("green", rgb(0, 0x80, 0)),
    ("yellow", rgb(0xff, 0xff, 0)),
    ("blue", rgb(0, 0, 0xff)),
    ("magenta", rgb(0xff, 0, 0xff)),
    ("cyan", rgb(0, 0xff, 0xff)),
    ("white", rgb(0xff, 0xff, 0xff)),
    ("orange", rgb(0xff, 0xa5, 0)),
    ("purple", rgb(0x80, 0, 0x80)),
    ("brown", rgb(0xa5, 0x2a, 0x2a)),
    ("pink", rgb(0xff, 0xc0, 0xcb)),
    ("gray", rgb(0x80, 0x80, 0x80)),
    ("olive", rgb(0x80, 0x80, 0)),
    ("navy", rgb(0, 0, 0x80)),
    ("teal", rgb(0, 0x80, 0x80)),
];

impl SeriesColor {
    /// Colour `index` of the default cycle (wraps around).
    #[inline]
    #[must_use]
    pub fn cycle(index: usize) -> Self {
        DEFAULT_CYCLE[index % DEFAULT_CYCLE.len()]
    }

    /// Parse colour names or `#rrggbb`.  Falls back to hex parser on miss.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        let key = s.trim().to_ascii_lowercase();
        let key = match key.as_str() {
            "k" => "black",
            "r" => "red",
            "g" => "green",
            "y" => "yellow",
            "b" => "blue",
            "m" => "magenta",
            "c" => "cyan",
            "w" => "white",
            "grey" => "gray",
            other => other,
        };
        if let Some((_, c)) = NAMED_COLORS.iter().find(|(name, _)| *name == key) {
            return Ok(*c);
        }
        if let Some(i) = key
            .strip_prefix("tab:")
            .and_then(|n| TAB_NAMES.iter().position(|t| *t == n))
        {
            return Ok(DEFAULT_CYCLE[i]);
        }
        Self::from_hex(s.trim())
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let Some(h) = hex.strip_prefix('#') else {
            return Err(ColorError::InvalidHexLength(hex.to_owned()));
        };
        if h.len() != 6 || !h.is_ascii() {
            return Err(ColorError::InvalidHexLength(hex.to_owned()));
        }
        // from_str_radix would accept a sign
        if !h.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHexDigit(hex.to_owned()));
        }
        let byte = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit(hex.to_owned()))
        };
        Ok(rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    #[inline]
    #[must_use]
    pub fn to_rgb(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    #[must_use]
    pub fn ansi(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

const TAB_NAMES: [&str; 10] = [
    "blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan",
];

pub const ANSI_RESET: &str = "\x1b[0m";

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: SeriesColor, text: &str) -> String {
    format!("{}{text}{ANSI_RESET}", c.ansi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_written_by_the_simulation() {
        assert_eq!(
            SeriesColor::from_name("#1F77B4").unwrap(),
            rgb(0x1f, 0x77, 0xb4)
        );
    }

    #[test]
    fn parses_names_and_shorthands() {
        assert_eq!(SeriesColor::from_name("Red").unwrap(), rgb(0xff, 0, 0));
        assert_eq!(SeriesColor::from_name("k").unwrap(), rgb(0, 0, 0));
        assert_eq!(SeriesColor::from_name("tab:orange").unwrap(), DEFAULT_CYCLE[1]);
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(
            SeriesColor::from_name("#12345"),
            Err(ColorError::InvalidHexLength("#12345".into()))
        );
        assert_eq!(
            SeriesColor::from_name("#12345g"),
            Err(ColorError::InvalidHexDigit("#12345g".into()))
        );
        assert!(SeriesColor::from_name("chartreuse").is_err());
    }

    #[test]
    fn rejects_signed_hex_pairs() {
        assert_eq!(
            SeriesColor::from_name("#+1+1+1"),
            Err(ColorError::InvalidHexDigit("#+1+1+1".into()))
        );
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(SeriesColor::cycle(10), SeriesColor::cycle(0));
    }

    #[test]
    fn colorize_resets() {
        let s = colorize(rgb(1, 2, 3), "x");
        assert_eq!(s, "\x1b[38;2;1;2;3mx\x1b[0m");
    }
}
