use serde::{Deserialize, Serialize};

/// Stored display preference of a group.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CollapseMode {
    /// Always shown open
    #[default]
    Expanded,
    /// Always shown folded
    Collapsed,
    /// Folded while every direct component is operational
    Auto,
}

impl CollapseMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::Collapsed => "collapsed",
            Self::Auto => "auto",
        }
    }
}

impl std::fmt::Display for CollapseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CollapseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expanded" | "0" => Ok(Self::Expanded),
            "collapsed" | "1" => Ok(Self::Collapsed),
            "auto" | "2" => Ok(Self::Auto),
            other => Err(format!(
                "unknown collapse mode '{other}' (expected expanded, collapsed, auto)"
            )),
        }
    }
}
