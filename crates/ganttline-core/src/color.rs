//! Fixed colour palette for timeline items.

use serde::{Deserialize, Serialize};

/// Cosmetic colour tag from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Primary,
    Secondary,
    Tertiary,
}

/// Paint values for a colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorProperties {
    pub background: &'static str,
    pub border: &'static str,
    pub hover_shadow: &'static str,
}

impl ColorScheme {
    /// Palette in round-robin order.
    pub const PALETTE: [ColorScheme; 3] = [Self::Primary, Self::Secondary, Self::Tertiary];

    /// Round-robin pick by position, e.g. the number of existing items.
    pub fn round_robin(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// The scheme following this one, wrapping around.
    pub fn next(&self) -> Self {
        let index = Self::PALETTE
            .iter()
            .position(|scheme| scheme == self)
            .unwrap_or(0);
        Self::round_robin(index + 1)
    }

    pub fn properties(&self) -> ColorProperties {
        match self {
            Self::Primary => ColorProperties {
                background: "#e3f2fd",
                border: "#b3e5fc",
                hover_shadow: "0 2px 6px rgba(33, 150, 243, 0.3)",
            },
            Self::Secondary => ColorProperties {
                background: "#e1f5fe",
                border: "#81d4fa",
                hover_shadow: "0 2px 6px rgba(3, 169, 244, 0.3)",
            },
            Self::Tertiary => ColorProperties {
                background: "#e8eaf6",
                border: "#9fa8da",
                hover_shadow: "0 2px 6px rgba(63, 81, 181, 0.3)",
            },
        }
    }
}
