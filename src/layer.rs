//! Per-layer cluster storage, phi/z sorted and index-table ready.

use crate::cluster::Cluster;
use crate::error::TrackerError;
use crate::geometry;

/// One concentric cylindrical detector surface: a radius, a z half-extent,
/// and the clusters hit on it, sorted by `(phiBin, zBin)`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    radius: f64,
    z_half_extent: f64,
    clusters: Vec<Cluster>,
    min_z: f64,
    max_z: f64,
}

impl Layer {
    /// Builds a `Layer` from raw `(clusterId, x, y, z, alpha, mcId)` records,
    /// deriving and stably sorting by each cluster's index-table bin.
    ///
    /// Sorting here is a prerequisite for the index-table invariant (§4.3):
    /// the table is only valid once clusters are laid out bin-ascending.
    pub fn build(
        radius: f64,
        z_half_extent: f64,
        raw_clusters: impl IntoIterator<Item = (i32, f64, f64, f64, f64, i32)>,
    ) -> Result<Self, TrackerError> {
        let inverse_z_bin_size = geometry::inverse_z_bin_size(z_half_extent);

        let mut clusters = raw_clusters
            .into_iter()
            .map(|(cluster_id, x, y, z, alpha, mc_id)| {
                let mut cluster = Cluster::new(cluster_id, x, y, z, alpha, mc_id)?;
                let zb = geometry::z_bin(z_half_extent, inverse_z_bin_size, z);
                let pb = geometry::phi_bin(cluster.phi);
                cluster.index_table_bin_index = geometry::bin_index(zb, pb);
                Ok(cluster)
            })
            .collect::<Result<Vec<_>, TrackerError>>()?;

        clusters.sort_by_key(|c| c.index_table_bin_index);

        let mut min_z = f64::MAX;
        let mut max_z = f64::MIN;
        for c in &clusters {
            min_z = min_z.min(c.z);
            max_z = max_z.max(c.z);
        }
        if clusters.is_empty() {
            min_z = 0.0;
            max_z = 0.0;
        }

        Ok(Self {
            radius,
            z_half_extent,
            clusters,
            min_z,
            max_z,
        })
    }

    /// The layer's radius, `R_L`.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The layer's z half-extent, `Z_L`.
    pub fn z_half_extent(&self) -> f64 {
        self.z_half_extent
    }

    /// The smallest z among this layer's clusters (0 if empty).
    pub fn min_z(&self) -> f64 {
        self.min_z
    }

    /// The largest z among this layer's clusters (0 if empty).
    pub fn max_z(&self) -> f64 {
        self.max_z
    }

    /// The phi/z-bin-sorted clusters.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Number of clusters on this layer.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether this layer has no clusters.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
