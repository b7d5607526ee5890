//! The `Cluster` is one reconstructed hit on a detector layer.

use std::f64::consts::PI;

use crate::constants::FLOAT_MIN_THRESHOLD;
use crate::error::TrackerError;
use crate::geometry;

/// One hit, as reconstructed on a detector layer.
///
/// Immutable once built: `r`, `phi` and `index_table_bin_index` are derived
/// at construction and sort time, never recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cluster {
    /// Stable, event-wide cluster id.
    pub cluster_id: i32,
    /// Detector-frame x coordinate.
    pub x: f64,
    /// Detector-frame y coordinate.
    pub y: f64,
    /// Detector-frame z coordinate.
    pub z: f64,
    /// `sqrt(x^2 + y^2)`.
    pub r: f64,
    /// Azimuthal angle, normalized to `[0, 2*pi)`.
    pub phi: f64,
    /// Sensor rotation angle.
    pub alpha: f64,
    /// Monte-Carlo truth id.
    pub mc_id: i32,
    /// `(phiBin, zBin)` flattened, assigned once the owning layer sorts its
    /// clusters. Zero until then.
    pub index_table_bin_index: usize,
}

impl Cluster {
    /// Builds a `Cluster` from a raw `(clusterId, x, y, z, alpha, mcId)`
    /// record, deriving `r` and `phi`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::DegenerateCluster`] if `r` is at or below the
    /// numerical floor (§7): such a cluster has no well-defined `phi` and
    /// indicates malformed input, not an algorithmic no-op.
    pub fn new(cluster_id: i32, x: f64, y: f64, z: f64, alpha: f64, mc_id: i32) -> Result<Self, TrackerError> {
        let r = (x * x + y * y).sqrt();
        if r < FLOAT_MIN_THRESHOLD {
            return Err(TrackerError::DegenerateCluster { cluster_id });
        }
        let phi = geometry::phi_normalized(y.atan2(x) + PI);
        Ok(Self {
            cluster_id,
            x,
            y,
            z,
            r,
            phi,
            alpha,
            mc_id,
            index_table_bin_index: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn derives_r_and_phi() {
        let c = Cluster::new(7, 3.0, 4.0, 1.5, 0.0, 42).unwrap();
        assert!(approx_eq!(f64, c.r, 5.0, epsilon = 1e-12));
        assert!((0.0..crate::constants::TWO_PI).contains(&c.phi));
    }

    #[test]
    fn rejects_zero_radius() {
        let err = Cluster::new(1, 0.0, 0.0, 0.0, 0.0, 0).unwrap_err();
        assert_eq!(err, TrackerError::DegenerateCluster { cluster_id: 1 });
    }
}
