use crate::error::{CoreError, IndexKind};

use super::SpatialLayout;

pub const DEFAULT_VENT_OFFSET: usize = 3;

/// Total mapping from each vent index to one destination vent index.
///
/// Built as `i -> (i + offset) % count`, so the mapping is generally not an
/// involution: following a vent twice does not lead back to the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VentGraph {
    destinations: Vec<usize>,
}

impl VentGraph {
    pub fn with_offset(vent_count: usize, offset: usize) -> Self {
        let destinations = (0..vent_count)
            .map(|index| (index + offset) % vent_count)
            .collect();
        Self { destinations }
    }

    pub fn for_layout(layout: &SpatialLayout) -> Self {
        Self::with_offset(layout.vents().len(), DEFAULT_VENT_OFFSET)
    }

    pub fn destination_of(&self, vent_index: usize) -> Result<usize, CoreError> {
        self.destinations
            .get(vent_index)
            .copied()
            .ok_or(CoreError::OutOfRange {
                kind: IndexKind::Vent,
                index: vent_index,
                len: self.destinations.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn routes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.destinations.iter().copied().enumerate()
    }
}
