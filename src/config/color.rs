use core::fmt;
use core::str::FromStr;
use ohno::{AppError, IntoAppError};
use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color, written as `#rrggbb` in configuration files and in chart output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub Srgb<u8>);

impl Color {
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl FromStr for Color {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.starts_with('#') {
            return Err(ohno::app_err!("invalid color '{s}', expected '#rrggbb'"));
        }

        let rgb = trimmed.parse::<Srgb<u8>>().into_app_err_with(|| format!("invalid color '{s}', expected '#rrggbb'"))?;
        Ok(Self(rgb))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
