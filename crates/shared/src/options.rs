//! Remesh options shown in the tools panel and the popup dialog.

use serde::{Deserialize, Serialize};

/// Target face count used when nothing else is chosen
pub const DEFAULT_RESOLUTION: u32 = 1000;

/// Options passed to QuadriFlow for one remesh.
///
/// These live for the editing session only; the executable path is a
/// preference and is stored elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemeshOptions {
    /// Use the minimum-cost-flow solver (`-mcf`)
    pub min_cost_flow: bool,
    /// Detect and preserve sharp edges (`-sharp`)
    pub sharp_preserving: bool,
    /// Remove integer offset flips with the SAT solver (`-sat`, Linux only)
    pub flip_removal: bool,
    /// Refuse to remesh a mesh that is not manifold
    pub require_manifold: bool,
    /// Target face count (`-f`), at least 1
    pub resolution: u32,
}

impl Default for RemeshOptions {
    fn default() -> Self {
        Self {
            min_cost_flow: false,
            sharp_preserving: false,
            flip_removal: false,
            require_manifold: false,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl RemeshOptions {
    /// Resolution must stay a positive integer
    pub fn has_valid_resolution(&self) -> bool {
        self.resolution >= 1
    }

    /// Clamp the resolution into its valid range (used after UI edits).
    pub fn clamp_resolution(&mut self) {
        if self.resolution < 1 {
            self.resolution = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = RemeshOptions::default();
        assert!(!o.min_cost_flow);
        assert!(!o.sharp_preserving);
        assert!(!o.flip_removal);
        assert!(!o.require_manifold);
        assert_eq!(o.resolution, 1000);
        assert!(o.has_valid_resolution());
    }

    #[test]
    fn test_clamp_resolution() {
        let mut o = RemeshOptions {
            resolution: 0,
            ..Default::default()
        };
        assert!(!o.has_valid_resolution());
        o.clamp_resolution();
        assert_eq!(o.resolution, 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let o: RemeshOptions = serde_json::from_str(r#"{"min_cost_flow": true}"#).unwrap();
        assert!(o.min_cost_flow);
        assert_eq!(o.resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_options_serde_roundtrip() {
        let o = RemeshOptions {
            min_cost_flow: true,
            sharp_preserving: true,
            flip_removal: false,
            require_manifold: true,
            resolution: 4,
        };
        let json = serde_json::to_string(&o).unwrap();
        assert!(json.contains(r#""resolution":4"#));
        let back: RemeshOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(o, back);
    }
}
