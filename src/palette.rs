//! Fill colors for emitted cells.

use serde::Deserialize;

pub const PALETTE: [&str; 5] = ["#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e"];

/// How a cell's position in the output picks its palette entry.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorRule {
    /// Divisibility chain: 5 first, then 4, 3, 2, otherwise the last color.
    /// Position 0 is divisible by 5, so it takes the first color.
    #[default]
    Composite,
    /// Plain `position % 5`.
    Cyclic,
}

impl ColorRule {
    pub fn palette_index(self, position: usize) -> usize {
        match self {
            ColorRule::Composite => {
                if position % 5 == 0 {
                    0
                } else if position % 4 == 0 {
                    1
                } else if position % 3 == 0 {
                    2
                } else if position % 2 == 0 {
                    3
                } else {
                    4
                }
            }
            ColorRule::Cyclic => position % PALETTE.len(),
        }
    }

    pub fn color(self, position: usize) -> &'static str {
        PALETTE[self.palette_index(position)]
    }
}
