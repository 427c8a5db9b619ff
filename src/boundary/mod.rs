//! Boundary conditions as ghost states.
//!
//! Each exterior facet marker maps to one policy. The numerical flux at
//! the boundary is then the ordinary interior flux between the interior
//! trace and the policy's ghost state, so boundaries need no dedicated
//! flux code. Unspecified markers default to reflective walls.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::mesh::{Marker, Mesh1D, Mesh2D, MARKERS_1D, MARKERS_2D};
use crate::state::{Flow1D, Flow2D};

/// Run configuration failure, detected before time stepping starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("boundary marker {0} does not exist on this mesh")]
    UnknownMarker(Marker),

    #[error("boundary marker {0} specified more than once")]
    DuplicateMarker(Marker),

    #[error("mesh has degenerate minimum edge length {min_edge}")]
    DegenerateMesh { min_edge: f64 },

    #[error("dump interval must be positive, got {t_dump}")]
    InvalidDumpInterval { t_dump: f64 },
}

/// Boundary policy attached to a marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BcOption {
    /// Reflective wall: depth mirrored, normal momentum reversed.
    Wall,
    /// Transmissive: the ghost repeats the interior trace.
    Open,
    /// Fully prescribed exterior state.
    Prescribed,
    /// Inflow with prescribed momentum; depth follows the interior trace
    /// so the discharge adapts to the local water level.
    River,
}

/// One marker's boundary condition on the interval mesh.
#[derive(Debug, Clone, Copy)]
pub struct BoundarySpec1D {
    pub marker: Marker,
    pub option: BcOption,
    pub value: Flow1D,
}

impl BoundarySpec1D {
    pub fn wall(marker: Marker) -> Self {
        Self {
            marker,
            option: BcOption::Wall,
            value: Flow1D::dry(),
        }
    }

    pub fn open(marker: Marker) -> Self {
        Self {
            marker,
            option: BcOption::Open,
            value: Flow1D::dry(),
        }
    }

    pub fn prescribed(marker: Marker, value: Flow1D) -> Self {
        Self {
            marker,
            option: BcOption::Prescribed,
            value,
        }
    }

    pub fn river(marker: Marker, value: Flow1D) -> Self {
        Self {
            marker,
            option: BcOption::River,
            value,
        }
    }
}

/// One marker's boundary condition on the rectangle mesh.
#[derive(Debug, Clone, Copy)]
pub struct BoundarySpec2D {
    pub marker: Marker,
    pub option: BcOption,
    pub value: Flow2D,
}

impl BoundarySpec2D {
    pub fn wall(marker: Marker) -> Self {
        Self {
            marker,
            option: BcOption::Wall,
            value: Flow2D::dry(),
        }
    }

    pub fn open(marker: Marker) -> Self {
        Self {
            marker,
            option: BcOption::Open,
            value: Flow2D::dry(),
        }
    }

    pub fn prescribed(marker: Marker, value: Flow2D) -> Self {
        Self {
            marker,
            option: BcOption::Prescribed,
            value,
        }
    }

    pub fn river(marker: Marker, value: Flow2D) -> Self {
        Self {
            marker,
            option: BcOption::River,
            value,
        }
    }
}

/// Resolved marker table for the interval mesh.
#[derive(Debug, Clone)]
pub struct BoundaryTable1D {
    policies: BTreeMap<Marker, (BcOption, Flow1D)>,
}

impl BoundaryTable1D {
    /// Validate the specs against the mesh markers and fill every
    /// unspecified marker with a wall.
    pub fn resolve(_mesh: &Mesh1D, specs: &[BoundarySpec1D]) -> Result<Self, ConfigError> {
        let mut policies = BTreeMap::new();
        for spec in specs {
            if !MARKERS_1D.contains(&spec.marker) {
                return Err(ConfigError::UnknownMarker(spec.marker));
            }
            if policies.insert(spec.marker, (spec.option, spec.value)).is_some() {
                return Err(ConfigError::DuplicateMarker(spec.marker));
            }
        }
        for marker in MARKERS_1D {
            policies
                .entry(marker)
                .or_insert((BcOption::Wall, Flow1D::dry()));
        }
        Ok(Self { policies })
    }

    /// Ghost state seen through an exterior facet. Reversing the full
    /// momentum mirrors the normal component for either face normal.
    pub fn ghost_state(&self, marker: Marker, interior: &Flow1D) -> Flow1D {
        // every mesh marker is present after resolve
        let (option, value) = self.policies[&marker];
        match option {
            BcOption::Wall => Flow1D::new(interior.h, -interior.mu),
            BcOption::Open => *interior,
            BcOption::Prescribed => value,
            BcOption::River => Flow1D::new(interior.h, value.mu),
        }
    }
}

/// Resolved marker table for the rectangle mesh.
#[derive(Debug, Clone)]
pub struct BoundaryTable2D {
    policies: BTreeMap<Marker, (BcOption, Flow2D)>,
}

impl BoundaryTable2D {
    /// Validate the specs against the mesh markers and fill every
    /// unspecified marker with a wall.
    pub fn resolve(_mesh: &Mesh2D, specs: &[BoundarySpec2D]) -> Result<Self, ConfigError> {
        let mut policies = BTreeMap::new();
        for spec in specs {
            if !MARKERS_2D.contains(&spec.marker) {
                return Err(ConfigError::UnknownMarker(spec.marker));
            }
            if policies.insert(spec.marker, (spec.option, spec.value)).is_some() {
                return Err(ConfigError::DuplicateMarker(spec.marker));
            }
        }
        for marker in MARKERS_2D {
            policies
                .entry(marker)
                .or_insert((BcOption::Wall, Flow2D::dry()));
        }
        Ok(Self { policies })
    }

    /// Ghost state seen through an exterior facet with outward unit
    /// normal `normal`.
    pub fn ghost_state(&self, marker: Marker, interior: &Flow2D, normal: (f64, f64)) -> Flow2D {
        let (option, value) = self.policies[&marker];
        match option {
            BcOption::Wall => {
                let m_n = interior.mu * normal.0 + interior.mv * normal.1;
                Flow2D::new(
                    interior.h,
                    interior.mu - 2.0 * m_n * normal.0,
                    interior.mv - 2.0 * m_n * normal.1,
                )
            }
            BcOption::Open => *interior,
            BcOption::Prescribed => value,
            BcOption::River => Flow2D::new(interior.h, value.mu, value.mv),
        }
    }
}
