// Tint colors for the layers, written as hex triples ("#112233").

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for HexColor {
    type Err = Error;

    /// Accepts "#RRGGBB" or "RRGGBB"; anything else is rejected with the
    /// offending text in the error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| Error::ColorParse { value: s.to_string(), reason };
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());

        if digits.len() != 6 {
            return Err(fail("expected exactly six hex digits"));
        }
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(fail("contains a non-hex character"));
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| fail("bad channel"));
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        let a: HexColor = "#112233".parse().unwrap();
        let b: HexColor = "112233".parse().unwrap();
        assert_eq!(a, HexColor::new(17, 34, 51));
        assert_eq!(a, b);
    }

    #[test]
    fn parses_mixed_case() {
        let c: HexColor = "#FfA0c1".parse().unwrap();
        assert_eq!(c, HexColor::new(0xFF, 0xA0, 0xC1));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "#", "#fff", "#12345", "#1234567", "#12345g", "red", "+#112233"] {
            let err = bad.parse::<HexColor>().unwrap_err();
            assert!(matches!(err, Error::ColorParse { .. }), "{bad:?} should not parse");
        }
    }

    #[test]
    fn error_names_the_value() {
        let err = "#zzzzzz".parse::<HexColor>().unwrap_err();
        assert!(err.to_string().contains("#zzzzzz"));
    }

    #[test]
    fn display_round_trips() {
        let c = HexColor::new(17, 34, 51);
        assert_eq!(c.to_string(), "#112233");
        assert_eq!(c.to_string().parse::<HexColor>().unwrap(), c);
    }

    #[test]
    fn deserializes_through_parser() {
        let c: HexColor = serde_json::from_str("\"#0a0b0c\"").unwrap();
        assert_eq!(c, HexColor::new(10, 11, 12));
        assert!(serde_json::from_str::<HexColor>("\"#0a0b\"").is_err());
    }
}
