//! Flat 2-D `(zBin, phiBin)` bin to cluster-range lookup, built as a
//! prefix-sum over one layer's sorted clusters.

use crate::constants::{PHI_BINS, Z_BINS};
use crate::error::TrackerError;
use crate::geometry;
use crate::layer::Layer;

/// Total number of `(zBin, phiBin)` bins in one layer's table.
const TOTAL_BINS: usize = Z_BINS * PHI_BINS;

/// A monotone prefix-sum array of length `ZBins*PhiBins + 1`: `table[b]` is
/// the offset of the first cluster whose bin index is `>= b`.
///
/// Cluster `k` lies in bin `b` iff `table[b] <= k < table[b+1]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexTable {
    table: Vec<u32>,
    z_half_extent: f64,
    min_z: f64,
    max_z: f64,
}

impl IndexTable {
    /// Builds the index table for a layer whose clusters are already sorted
    /// by `index_table_bin_index` (as [`Layer::build`] guarantees).
    pub fn build(layer: &Layer) -> Self {
        let mut table = vec![0u32; TOTAL_BINS + 1];
        let mut filled_up_to = 0usize;

        for (idx, cluster) in layer.clusters().iter().enumerate() {
            let b = cluster.index_table_bin_index;
            while filled_up_to <= b {
                table[filled_up_to] = idx as u32;
                filled_up_to += 1;
            }
        }

        let n = layer.len() as u32;
        while filled_up_to <= TOTAL_BINS {
            table[filled_up_to] = n;
            filled_up_to += 1;
        }

        Self {
            table,
            z_half_extent: layer.z_half_extent(),
            min_z: layer.min_z(),
            max_z: layer.max_z(),
        }
    }

    /// Builds a table directly from a raw prefix-sum array, validating its
    /// length.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MalformedIndexTable`] if `table.len() !=
    /// ZBins*PhiBins + 1`.
    pub fn from_raw(table: Vec<u32>, z_half_extent: f64, min_z: f64, max_z: f64) -> Result<Self, TrackerError> {
        if table.len() != TOTAL_BINS + 1 {
            return Err(TrackerError::MalformedIndexTable {
                got: table.len(),
                expected: TOTAL_BINS + 1,
            });
        }
        Ok(Self {
            table,
            z_half_extent,
            min_z,
            max_z,
        })
    }

    /// The raw prefix-sum array.
    pub fn table(&self) -> &[u32] {
        &self.table
    }

    /// The cluster-index offset at the given bin, i.e. `table[bin]`.
    pub fn offset(&self, bin: usize) -> u32 {
        self.table[bin]
    }

    /// Returns the bin indices intersecting `[zMin, zMax] x [phiMin, phiMax]`
    /// that contain at least one cluster.
    pub fn select_bins(&self, z_min: f64, z_max: f64, phi_min: f64, phi_max: f64) -> Vec<usize> {
        if z_max < -self.z_half_extent || z_min > self.z_half_extent || z_min > z_max {
            return Vec::new();
        }

        let inverse_z_bin_size = geometry::inverse_z_bin_size(self.z_half_extent);
        let zb_min = geometry::z_bin(self.z_half_extent, inverse_z_bin_size, z_min);
        let zb_max = geometry::z_bin(self.z_half_extent, inverse_z_bin_size, z_max);
        let pb_min = geometry::phi_bin(phi_min);
        let pb_max = geometry::phi_bin(phi_max);

        let mut pb_count = pb_max as i64 - pb_min as i64 + 1;
        if pb_count < 0 {
            pb_count += PHI_BINS as i64;
        }
        // A query spanning a full turn (or more) degenerates to pbCount == 1
        // under the formula above whenever phi_max lands in the same bin as
        // phi_min, since phi_bin() is taken mod PhiBins. Treat it as "every
        // phi bin" instead, so a caller can search the entire ring by
        // passing [phi, phi + 2*pi).
        if phi_max - phi_min >= crate::constants::TWO_PI {
            pb_count = PHI_BINS as i64;
        }

        let mut bins = Vec::new();
        let mut pb = pb_min;
        for _ in 0..pb_count {
            let first_bin = geometry::bin_index(zb_min, pb);
            let max_bin = first_bin + (zb_max - zb_min);
            for b in first_bin..=max_bin {
                if self.table[b] != self.table[b + 1] {
                    bins.push(b);
                }
            }
            pb = (pb + 1) % PHI_BINS;
        }
        bins
    }

    /// Returns the cluster indices intersecting the given rectangle.
    pub fn select_clusters(&self, z_min: f64, z_max: f64, phi_min: f64, phi_max: f64) -> Vec<usize> {
        self.select_bins(z_min, z_max, phi_min, phi_max)
            .into_iter()
            .flat_map(|b| (self.table[b] as usize)..(self.table[b + 1] as usize))
            .collect()
    }

    /// The layer's minimum cluster z, as tracked at construction.
    pub fn min_z(&self) -> f64 {
        self.min_z
    }

    /// The layer's maximum cluster z, as tracked at construction.
    pub fn max_z(&self) -> f64 {
        self.max_z
    }
}
