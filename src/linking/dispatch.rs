//! Enum-based linker dispatch for static (non-virtual) function calls.
//!
//! `LinkingMethod` is the configuration-level choice of strategy; `Linker`
//! wraps the strategy implementations and dispatches without vtable lookups.

use std::fmt;
use std::str::FromStr;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use super::hungarian::HungarianLinker;
use super::nearest_neighbor::NearestNeighborLinker;
use super::traits::PointSetLinker;
use super::LinkResult;
use crate::Error;

/// Frame-to-frame linking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkingMethod {
    /// Globally optimal assignment (Hungarian algorithm).
    #[default]
    #[serde(alias = "exact")]
    Hungarian,
    /// Greedy nearest-neighbor assignment.
    #[serde(alias = "greedy", alias = "nearestneighbor", alias = "nearest-neighbor")]
    NearestNeighbor,
}

impl LinkingMethod {
    /// Build the linker implementing this method.
    pub fn linker(self) -> Linker {
        match self {
            LinkingMethod::Hungarian => Linker::Hungarian(HungarianLinker::new()),
            LinkingMethod::NearestNeighbor => Linker::NearestNeighbor(NearestNeighborLinker::new()),
        }
    }
}

impl FromStr for LinkingMethod {
    type Err = Error;

    /// Parse a method name, ignoring case.
    ///
    /// Supported names:
    /// - "hungarian", "exact"
    /// - "nearestneighbor", "nearest_neighbor", "nearest-neighbor", "greedy"
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hungarian" | "exact" => Ok(LinkingMethod::Hungarian),
            "nearestneighbor" | "nearest_neighbor" | "nearest-neighbor" | "greedy" => {
                Ok(LinkingMethod::NearestNeighbor)
            }
            _ => Err(Error::UnknownMethod(name.to_string())),
        }
    }
}

impl fmt::Display for LinkingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkingMethod::Hungarian => write!(f, "hungarian"),
            LinkingMethod::NearestNeighbor => write!(f, "nearest_neighbor"),
        }
    }
}

/// Enum-based linker for static dispatch.
#[derive(Debug, Clone, Copy)]
pub enum Linker {
    Hungarian(HungarianLinker),
    NearestNeighbor(NearestNeighborLinker),
}

impl Linker {
    /// Get a linker by method name.
    pub fn by_name(name: &str) -> crate::Result<Self> {
        Ok(name.parse::<LinkingMethod>()?.linker())
    }
}

impl From<LinkingMethod> for Linker {
    fn from(method: LinkingMethod) -> Self {
        method.linker()
    }
}

impl PointSetLinker for Linker {
    #[inline(always)]
    fn link(&self, sources: &DMatrix<f64>, targets: &DMatrix<f64>, max_distance: f64) -> LinkResult {
        match self {
            Linker::Hungarian(l) => l.link(sources, targets, max_distance),
            Linker::NearestNeighbor(l) => l.link(sources, targets, max_distance),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Linker::Hungarian(l) => l.name(),
            Linker::NearestNeighbor(l) => l.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!("Hungarian".parse::<LinkingMethod>().unwrap(), LinkingMethod::Hungarian);
        assert_eq!("exact".parse::<LinkingMethod>().unwrap(), LinkingMethod::Hungarian);
        assert_eq!(
            "NearestNeighbor".parse::<LinkingMethod>().unwrap(),
            LinkingMethod::NearestNeighbor
        );
        assert_eq!(" greedy ".parse::<LinkingMethod>().unwrap(), LinkingMethod::NearestNeighbor);
    }

    #[test]
    fn test_method_from_str_unknown() {
        let err = "munkres-ish".parse::<LinkingMethod>().unwrap_err();
        assert!(matches!(err, Error::UnknownMethod(ref name) if name == "munkres-ish"));
    }

    #[test]
    fn test_display_round_trips() {
        for method in [LinkingMethod::Hungarian, LinkingMethod::NearestNeighbor] {
            assert_eq!(method.to_string().parse::<LinkingMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_linker_by_name() {
        assert_eq!(Linker::by_name("hungarian").unwrap().name(), "hungarian");
        assert_eq!(Linker::by_name("nearest_neighbor").unwrap().name(), "nearest-neighbor");
        assert!(Linker::by_name("simulated-annealing").is_err());
    }

    #[test]
    fn test_dispatch_delegates() {
        let sources = DMatrix::from_row_slice(2, 1, &[0.0, 2.5]);
        let targets = DMatrix::from_row_slice(2, 1, &[1.0, -2.0]);

        let exact = Linker::from(LinkingMethod::Hungarian).link(&sources, &targets, f64::INFINITY);
        let greedy =
            Linker::from(LinkingMethod::NearestNeighbor).link(&sources, &targets, f64::INFINITY);

        assert!(exact.total_cost() < greedy.total_cost());
    }

    #[test]
    fn test_serde_accepts_from_str_aliases() {
        for (name, method) in [
            ("hungarian", LinkingMethod::Hungarian),
            ("exact", LinkingMethod::Hungarian),
            ("nearest_neighbor", LinkingMethod::NearestNeighbor),
            ("nearestneighbor", LinkingMethod::NearestNeighbor),
            ("nearest-neighbor", LinkingMethod::NearestNeighbor),
            ("greedy", LinkingMethod::NearestNeighbor),
        ] {
            let parsed: LinkingMethod = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(parsed, method, "{}", name);
            assert_eq!(name.parse::<LinkingMethod>().unwrap(), method);
        }
        assert_eq!(serde_json::to_string(&LinkingMethod::NearestNeighbor).unwrap(), "\"nearest_neighbor\"");
    }
}
