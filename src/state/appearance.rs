//! Font and accent colour choices exposed to the presentation layer

use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Body font the front end renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Font {
    #[default]
    KumbhSans,
    RobotoSlab,
    SpaceMono,
}

impl Font {
    pub fn id(self) -> &'static str {
        match self {
            Font::KumbhSans => "kumbh-sans",
            Font::RobotoSlab => "roboto-slab",
            Font::SpaceMono => "space-mono",
        }
    }

    /// CSS custom property holding the font stack
    pub fn css_var(self) -> &'static str {
        match self {
            Font::KumbhSans => "--font-kumbh",
            Font::RobotoSlab => "--font-roboto",
            Font::SpaceMono => "--font-space-mono",
        }
    }
}

impl FromStr for Font {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Font::KumbhSans, Font::RobotoSlab, Font::SpaceMono]
            .into_iter()
            .find(|font| font.id() == s)
            .ok_or_else(|| format!("Unknown font: {}", s))
    }
}

/// Accent colour used for the progress ring and selected tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccentColor {
    #[default]
    Coral,
    Cyan,
    Purple,
}

impl AccentColor {
    pub fn id(self) -> &'static str {
        match self {
            AccentColor::Coral => "coral",
            AccentColor::Cyan => "cyan",
            AccentColor::Purple => "purple",
        }
    }

    pub fn css_var(self) -> &'static str {
        match self {
            AccentColor::Coral => "--clr-coral-pink",
            AccentColor::Cyan => "--clr-cyan",
            AccentColor::Purple => "--clr-purple",
        }
    }
}

impl FromStr for AccentColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [AccentColor::Coral, AccentColor::Cyan, AccentColor::Purple]
            .into_iter()
            .find(|color| color.id() == s)
            .ok_or_else(|| format!("Unknown accent color: {}", s))
    }
}
