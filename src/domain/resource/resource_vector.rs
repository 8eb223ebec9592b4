use serde::Serialize;
use std::fmt;

use crate::domain::EPSILON;

/// The four resource dimensions tracked per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    Storage,
    Compute,
    Uplink,
    Downlink,
}

impl Dimension {
    /// Fixed iteration order for all per-dimension loops.
    pub const ALL: [Dimension; 4] = [Dimension::Storage, Dimension::Compute, Dimension::Uplink, Dimension::Downlink];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Storage => write!(f, "storage"),
            Dimension::Compute => write!(f, "compute"),
            Dimension::Uplink => write!(f, "uplink"),
            Dimension::Downlink => write!(f, "downlink"),
        }
    }
}

/// One scalar per resource dimension.
///
/// Used both for fixed capacities and for requirement/usage accounting, so all
/// arithmetic helpers keep the four dimensions in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResourceVector {
    pub storage: f64,
    pub compute: f64,
    pub uplink: f64,
    pub downlink: f64,
}

impl ResourceVector {
    pub fn new(storage: f64, compute: f64, uplink: f64, downlink: f64) -> Self {
        Self { storage, compute, uplink, downlink }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Storage => self.storage,
            Dimension::Compute => self.compute,
            Dimension::Uplink => self.uplink,
            Dimension::Downlink => self.downlink,
        }
    }

    fn get_mut(&mut self, dimension: Dimension) -> &mut f64 {
        match dimension {
            Dimension::Storage => &mut self.storage,
            Dimension::Compute => &mut self.compute,
            Dimension::Uplink => &mut self.uplink,
            Dimension::Downlink => &mut self.downlink,
        }
    }

    /// Returns true if every dimension is non-negative.
    pub fn is_non_negative(&self) -> bool {
        Dimension::ALL.iter().all(|&d| self.get(d) >= 0.0)
    }

    /// Sum over all four dimensions. Used as the "declared capacity" sort key
    /// during the deterministic rounding scan.
    pub fn total(&self) -> f64 {
        Dimension::ALL.iter().map(|&d| self.get(d)).sum()
    }

    pub fn add(&self, other: &ResourceVector) -> ResourceVector {
        let mut out = *self;
        for d in Dimension::ALL {
            *out.get_mut(d) += other.get(d);
        }
        out
    }

    /// Per-dimension subtraction, floored at zero.
    pub fn saturating_sub(&self, other: &ResourceVector) -> ResourceVector {
        let mut out = *self;
        for d in Dimension::ALL {
            *out.get_mut(d) = (out.get(d) - other.get(d)).max(0.0);
        }
        out
    }

    pub fn scaled(&self, factor: f64) -> ResourceVector {
        let mut out = *self;
        for d in Dimension::ALL {
            *out.get_mut(d) *= factor;
        }
        out
    }

    /// Returns true if `self` fits within `bound` in every dimension, with an
    /// epsilon margin absorbing floating-point drift.
    pub fn fits_within(&self, bound: &ResourceVector) -> bool {
        Dimension::ALL.iter().all(|&d| self.get(d) <= bound.get(d) + EPSILON)
    }

    /// The largest fraction of `requirement` that fits into `self`, clamped to [0, 1].
    ///
    /// Dimensions with a zero requirement do not constrain the fraction. A zero
    /// requirement vector always fits entirely.
    pub fn headroom_fraction(&self, requirement: &ResourceVector) -> f64 {
        let mut fraction: f64 = 1.0;
        for d in Dimension::ALL {
            let req = requirement.get(d);
            if req > 0.0 {
                fraction = fraction.min(self.get(d) / req);
            }
        }
        fraction.clamp(0.0, 1.0)
    }
}
