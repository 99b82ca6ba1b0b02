use serde::{Deserialize, Serialize};

/// Display color attached to a status level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Blue,
    Yellow,
    Red,
}

impl StatusColor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Hex code used by chat webhooks.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Green => "#2ECC71",
            Self::Blue => "#3498DB",
            Self::Yellow => "#F1C40F",
            Self::Red => "#E74C3C",
        }
    }

    #[must_use]
    pub const fn decimal(self) -> u32 {
        match self {
            Self::Green => 0x00_2E_CC_71,
            Self::Blue => 0x00_34_98_DB,
            Self::Yellow => 0x00_F1_C4_0F,
            Self::Red => 0x00_E7_4C_3C,
        }
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
