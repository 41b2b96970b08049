//! Most-strained side selection
//!
//! The sign of the bending moment decides which edge is assumed to carry
//! the maximum compression. That choice fixes the sign factor used by every
//! moment-dependent term and how a rebar ordinate maps to its distance from
//! the compressed face.

use serde::{Deserialize, Serialize};

/// Edge of the section assumed to be most compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrainedSide {
    /// Lower edge (`y = +h/2`), selected for `M >= 0`
    #[serde(rename = "LOWER_EDGE")]
    Lower,
    /// Upper edge (`y = -h/2`), selected for `M < 0`
    #[serde(rename = "UPPER_EDGE")]
    Upper,
}

impl StrainedSide {
    /// Select the most compressed edge from the bending moment.
    ///
    /// ```rust
    /// use rc_core::analysis::StrainedSide;
    ///
    /// assert_eq!(StrainedSide::from_moment(450.0e6), StrainedSide::Lower);
    /// assert_eq!(StrainedSide::from_moment(0.0), StrainedSide::Lower);
    /// assert_eq!(StrainedSide::from_moment(-1.0), StrainedSide::Upper);
    /// ```
    pub fn from_moment(moment_nmm: f64) -> Self {
        if moment_nmm >= 0.0 {
            StrainedSide::Lower
        } else {
            StrainedSide::Upper
        }
    }

    /// +1 for the lower edge, -1 for the upper edge
    pub fn sign_factor(&self) -> f64 {
        match self {
            StrainedSide::Lower => 1.0,
            StrainedSide::Upper => -1.0,
        }
    }

    /// Distance d (mm) from the compressed face to a fibre at ordinate `y_mm`.
    pub fn distance_from_compressed_face(&self, y_mm: f64, height_mm: f64) -> f64 {
        let half = height_mm / 2.0;
        match self {
            StrainedSide::Lower if y_mm >= 0.0 => half - y_mm,
            StrainedSide::Lower => half + y_mm.abs(),
            StrainedSide::Upper => half + y_mm,
        }
    }

    /// Name used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            StrainedSide::Lower => "lower edge",
            StrainedSide::Upper => "upper edge",
        }
    }
}

impl std::fmt::Display for StrainedSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_moment() {
        assert_eq!(StrainedSide::from_moment(450.0e6), StrainedSide::Lower);
        assert_eq!(StrainedSide::from_moment(-1.0), StrainedSide::Upper);
        assert_eq!(StrainedSide::from_moment(0.0), StrainedSide::Lower);
    }

    #[test]
    fn test_sign_factor() {
        assert_eq!(StrainedSide::Lower.sign_factor(), 1.0);
        assert_eq!(StrainedSide::Upper.sign_factor(), -1.0);
    }

    #[test]
    fn test_distance_lower_edge() {
        let side = StrainedSide::Lower;
        assert_eq!(side.distance_from_compressed_face(340.0, 800.0), 60.0);
        assert_eq!(side.distance_from_compressed_face(-340.0, 800.0), 740.0);
        assert_eq!(side.distance_from_compressed_face(0.0, 800.0), 400.0);
    }

    #[test]
    fn test_distance_upper_edge() {
        let side = StrainedSide::Upper;
        assert_eq!(side.distance_from_compressed_face(-340.0, 800.0), 60.0);
        assert_eq!(side.distance_from_compressed_face(340.0, 800.0), 740.0);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&StrainedSide::Lower).unwrap(), "\"LOWER_EDGE\"");
        assert_eq!(serde_json::to_string(&StrainedSide::Upper).unwrap(), "\"UPPER_EDGE\"");
    }
}
