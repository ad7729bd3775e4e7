use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page surface a block collection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
    /// Transparent browser-source document for streaming software
    Overlay,
    TipPage,
    LinkTree,
}

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::Overlay, Surface::TipPage, Surface::LinkTree];

    /// Path segment of the remote document API
    pub fn path(&self) -> &'static str {
        match self {
            Surface::Overlay => "overlay",
            Surface::TipPage => "tip-page",
            Surface::LinkTree => "link-tree",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Surface {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overlay" => Ok(Surface::Overlay),
            "tip-page" | "tip_page" => Ok(Surface::TipPage),
            "link-tree" | "link_tree" => Ok(Surface::LinkTree),
            other => Err(SchemaError::UnknownSurface(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trips_through_from_str() {
        for surface in Surface::ALL {
            assert_eq!(surface.path().parse::<Surface>().unwrap(), surface);
        }
    }

    #[test]
    fn test_unknown_surface() {
        assert!(matches!(
            "dashboard".parse::<Surface>(),
            Err(SchemaError::UnknownSurface(_))
        ));
    }
}
