use core::fmt;

use serde::{Deserialize, Serialize};

/// Fixed label of a grid cell, assigned at generation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellLabel {
    Mine,
    /// Number of mines among the clamped 8-neighborhood.
    Count(u8),
}

impl CellLabel {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Count(count) => Some(count),
        }
    }
}

impl Default for CellLabel {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mine => f.pad("*"),
            Self::Count(count) => fmt::Display::fmt(count, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn labels_render_as_text() {
        assert_eq!(format!("{}", CellLabel::Mine), "*");
        assert_eq!(format!("{}", CellLabel::Count(3)), "3");
        assert_eq!(format!("{:<2}|", CellLabel::Mine), "* |");
    }
}
