use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic icon for a category. Unrecognized names map to `Unknown`
/// instead of failing, so datasets written by older versions still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Home,
    Hospital,
    Doctor,
    School,
    Bus,
    Courier,
    Store,
    Office,
    Phone,
    Map,
    #[serde(other)]
    #[default]
    Unknown,
}

impl Icon {
    /// Parses a symbolic name, falling back to `Unknown` for anything
    /// unrecognized. Never fails.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "home" => Icon::Home,
            "hospital" => Icon::Hospital,
            "doctor" => Icon::Doctor,
            "school" => Icon::School,
            "bus" => Icon::Bus,
            "courier" => Icon::Courier,
            "store" => Icon::Store,
            "office" => Icon::Office,
            "phone" => Icon::Phone,
            "map" => Icon::Map,
            _ => Icon::Unknown,
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Icon::Home => write!(f, "home"),
            Icon::Hospital => write!(f, "hospital"),
            Icon::Doctor => write!(f, "doctor"),
            Icon::School => write!(f, "school"),
            Icon::Bus => write!(f, "bus"),
            Icon::Courier => write!(f, "courier"),
            Icon::Store => write!(f, "store"),
            Icon::Office => write!(f, "office"),
            Icon::Phone => write!(f, "phone"),
            Icon::Map => write!(f, "map"),
            Icon::Unknown => write!(f, "unknown"),
        }
    }
}

/// Symbolic accent color for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Teal,
    Amber,
    #[default]
    Slate,
    #[serde(other)]
    Unknown,
}

impl Color {
    /// Parses a symbolic name, falling back to `Unknown`. Never fails.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "blue" => Color::Blue,
            "green" => Color::Green,
            "purple" => Color::Purple,
            "orange" => Color::Orange,
            "red" => Color::Red,
            "teal" => Color::Teal,
            "amber" => Color::Amber,
            "slate" => Color::Slate,
            _ => Color::Unknown,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Blue => write!(f, "blue"),
            Color::Green => write!(f, "green"),
            Color::Purple => write!(f, "purple"),
            Color::Orange => write!(f, "orange"),
            Color::Red => write!(f, "red"),
            Color::Teal => write!(f, "teal"),
            Color::Amber => write!(f, "amber"),
            Color::Slate => write!(f, "slate"),
            Color::Unknown => write!(f, "unknown"),
        }
    }
}
