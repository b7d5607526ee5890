//! The parsed input the core consumes: per-layer clusters plus one or more
//! primary-vertex candidates. Parsing an event file into this shape is an
//! external collaborator's job (§6); this module only holds the result.

use crate::constants::{Constants, NUM_LAYERS};
use crate::error::TrackerError;
use crate::index_table::IndexTable;
use crate::layer::Layer;

/// One raw cluster record as read off the wire: `(clusterId, x, y, z, alpha,
/// mcId)`.
pub type RawCluster = (i32, f64, f64, f64, f64, i32);

/// A fully parsed event: seven layers of clusters, each with its index
/// table built once, plus the event's primary-vertex candidates.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Event {
    layers: Vec<Layer>,
    index_tables: Vec<IndexTable>,
    vertices: Vec<[f64; 3]>,
}

impl Event {
    /// Builds an `Event` from seven layers' worth of raw cluster records and
    /// the event's primary-vertex candidates.
    ///
    /// Index tables are built here, once per layer, so that every
    /// [`PrimaryVertexContext`](crate::context::PrimaryVertexContext) built
    /// against this event can borrow them read-only instead of rebuilding
    /// them per vertex.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::WrongLayerCount`] if `raw_layers.len() !=
    /// 7`, or propagates [`TrackerError::DegenerateCluster`] from a
    /// malformed cluster record.
    pub fn build(
        raw_layers: Vec<Vec<RawCluster>>,
        constants: &Constants,
        vertices: Vec<[f64; 3]>,
    ) -> Result<Self, TrackerError> {
        if raw_layers.len() != NUM_LAYERS {
            return Err(TrackerError::WrongLayerCount {
                got: raw_layers.len(),
            });
        }

        let layers = raw_layers
            .into_iter()
            .enumerate()
            .map(|(l, raw)| Layer::build(constants.layer_radii[l], constants.layer_z_half_extent[l], raw))
            .collect::<Result<Vec<_>, TrackerError>>()?;

        let index_tables = layers.iter().map(IndexTable::build).collect();

        Ok(Self {
            layers,
            index_tables,
            vertices,
        })
    }

    /// The event's seven layers, innermost first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The index table for each layer, parallel to [`Event::layers`].
    pub fn index_tables(&self) -> &[IndexTable] {
        &self.index_tables
    }

    /// The event's primary-vertex candidates.
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }
}

/// Monte-Carlo truth for one simulated particle, keyed by `mcId` in an
/// event's label table.
///
/// The core never reads this directly — only the `mc_id` already attached
/// to each [`Cluster`](crate::cluster::Cluster) feeds the majority vote of
/// C8 — but a [`Road`](crate::road::Road)'s `mc_label` is meant to be
/// looked up here by an external reporter, so the type is part of the
/// public data model.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Label {
    /// Monte-Carlo id this label describes.
    pub mc_id: i32,
    /// Transverse momentum.
    pub pt: f64,
    /// Azimuthal angle at production.
    pub phi: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// PDG particle code.
    pub pdg_code: i32,
    /// Number of clusters this particle left in the detector.
    pub n_clusters: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_layer(n: usize, radius: f64) -> Vec<RawCluster> {
        (0..n)
            .map(|i| {
                let phi = crate::constants::TWO_PI * (i as f64) / (n as f64).max(1.0);
                (i as i32, radius * phi.cos(), radius * phi.sin(), 0.0, 0.0, 0)
            })
            .collect()
    }

    #[test]
    fn build_rejects_wrong_layer_count() {
        let constants = Constants::default();
        let raw_layers = vec![raw_layer(1, 10.0); 3];
        let err = Event::build(raw_layers, &constants, vec![[0.0, 0.0, 0.0]]).unwrap_err();
        assert_eq!(err, TrackerError::WrongLayerCount { got: 3 });
    }

    #[test]
    fn build_produces_one_index_table_per_layer() {
        let constants = Constants::default();
        let raw_layers: Vec<_> = constants.layer_radii.iter().map(|&r| raw_layer(5, r)).collect();
        let event = Event::build(raw_layers, &constants, vec![[0.0, 0.0, 0.0]]).unwrap();
        assert_eq!(event.layers().len(), NUM_LAYERS);
        assert_eq!(event.index_tables().len(), NUM_LAYERS);
    }
}
