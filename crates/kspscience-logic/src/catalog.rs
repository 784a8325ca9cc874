//! Catalog data — the bodies and experiments fed to the generator.
//!
//! A catalog is plain read-only configuration. It is loaded once (from the
//! embedded stock data or a user-supplied JSON file) and never mutated while
//! opportunities are enumerated.
//!
//! ```
//! use kspscience_logic::catalog::Catalog;
//!
//! let catalog = Catalog::from_json(r#"{
//!     "bodies": [{ "name": "Gilly", "biomes": [{ "name": "Lowlands" }] }],
//!     "experiments": [{ "name": "Seismic Scan", "situations": { "Landed": "LandBiomes" } }]
//! }"#).unwrap();
//! assert_eq!(catalog.bodies[0].biomes.len(), 1);
//! assert!(!catalog.bodies[0].atmosphere);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ScienceError;
use crate::opportunity::{GLOBAL, SEPARATOR};
use crate::situation::{RunType, Situation};

// ── Stock data (17 bodies, 15 experiments) ─────────────────────────────
const STOCK_CATALOG_JSON: &str = include_str!("../../../data/stock_catalog.json");

/// A named region of a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biome {
    pub name: String,
    /// Ocean, sea or lake.
    #[serde(default)]
    pub liquid: bool,
    /// Only exists for landed vessels (launch sites, KSC buildings).
    #[serde(default)]
    pub surface_only: bool,
}

impl Biome {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            liquid: false,
            surface_only: false,
        }
    }

    pub fn liquid(name: impl Into<String>) -> Self {
        Self {
            liquid: true,
            ..Self::new(name)
        }
    }

    pub fn surface_only(name: impl Into<String>) -> Self {
        Self {
            surface_only: true,
            ..Self::new(name)
        }
    }
}

/// A planet, moon or star.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    #[serde(default)]
    pub atmosphere: bool,
    /// Emission order follows this list.
    #[serde(default)]
    pub biomes: Vec<Biome>,
}

impl Body {
    pub fn new(name: impl Into<String>, atmosphere: bool, biomes: Vec<Biome>) -> Self {
        Self {
            name: name.into(),
            atmosphere,
            biomes,
        }
    }
}

/// A science instrument and the situations it can run in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    /// Declared by the stock data but not consulted when generating
    /// opportunities; flying situations are gated on the body instead.
    #[serde(default)]
    pub atmosphere_only: bool,
    /// Iterated in declaration order. A missing situation means the
    /// experiment cannot run there.
    pub situations: IndexMap<Situation, RunType>,
}

impl Experiment {
    pub fn new(
        name: impl Into<String>,
        situations: impl IntoIterator<Item = (Situation, RunType)>,
    ) -> Self {
        Self {
            name: name.into(),
            atmosphere_only: false,
            situations: situations.into_iter().collect(),
        }
    }

    pub fn run_type(&self, situation: Situation) -> Option<RunType> {
        self.situations.get(&situation).copied()
    }
}

/// The complete input to the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub bodies: Vec<Body>,
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

impl Catalog {
    /// The stock Kerbol system and stock experiments.
    pub fn stock() -> Result<Self, ScienceError> {
        Self::from_json(STOCK_CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ScienceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScienceError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScienceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn experiment(&self, name: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.name == name)
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// A data-quality problem in a catalog.
///
/// None of these stop generation; they explain why a count may be off or an
/// identifier ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogIssue {
    DuplicateBody(String),
    DuplicateExperiment(String),
    DuplicateBiome { body: String, biome: String },
    /// A `.` in a name splits the identifier into the wrong fields.
    NameContainsSeparator(String),
    /// Flagged both liquid and surface-only.
    LiquidSurfaceOnly { body: String, biome: String },
    /// Declares no situations, so it never produces an opportunity.
    EmptyExperiment(String),
    /// Named `global`, so its identifiers parse back as the global scope.
    ReservedBiomeName { body: String, biome: String },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateBody(name) => write!(f, "body '{}' is declared more than once", name),
            Self::DuplicateExperiment(name) => {
                write!(f, "experiment '{}' is declared more than once", name)
            }
            Self::DuplicateBiome { body, biome } => {
                write!(f, "biome '{}' appears more than once on {}", biome, body)
            }
            Self::NameContainsSeparator(name) => {
                write!(f, "name '{}' contains the identifier separator '.'", name)
            }
            Self::LiquidSurfaceOnly { body, biome } => write!(
                f,
                "biome '{}' on {} is flagged both liquid and surface-only",
                biome, body
            ),
            Self::EmptyExperiment(name) => write!(f, "experiment '{}' has no situations", name),
            Self::ReservedBiomeName { body, biome } => write!(
                f,
                "biome '{}' on {} uses the reserved global scope name",
                biome, body
            ),
        }
    }
}

/// Validate a catalog, returning all issues found.
pub fn validate_catalog(catalog: &Catalog) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    let mut seen_bodies = HashSet::new();
    for body in &catalog.bodies {
        if !seen_bodies.insert(body.name.as_str()) {
            issues.push(CatalogIssue::DuplicateBody(body.name.clone()));
        }
        if body.name.contains(SEPARATOR) {
            issues.push(CatalogIssue::NameContainsSeparator(body.name.clone()));
        }

        let mut seen_biomes = HashSet::new();
        for biome in &body.biomes {
            if !seen_biomes.insert(biome.name.as_str()) {
                issues.push(CatalogIssue::DuplicateBiome {
                    body: body.name.clone(),
                    biome: biome.name.clone(),
                });
            }
            if biome.name.contains(SEPARATOR) {
                issues.push(CatalogIssue::NameContainsSeparator(biome.name.clone()));
            }
            if biome.name == GLOBAL {
                issues.push(CatalogIssue::ReservedBiomeName {
                    body: body.name.clone(),
                    biome: biome.name.clone(),
                });
            }
            if biome.liquid && biome.surface_only {
                issues.push(CatalogIssue::LiquidSurfaceOnly {
                    body: body.name.clone(),
                    biome: biome.name.clone(),
                });
            }
        }
    }

    let mut seen_experiments = HashSet::new();
    for experiment in &catalog.experiments {
        if !seen_experiments.insert(experiment.name.as_str()) {
            issues.push(CatalogIssue::DuplicateExperiment(experiment.name.clone()));
        }
        if experiment.name.contains(SEPARATOR) {
            issues.push(CatalogIssue::NameContainsSeparator(experiment.name.clone()));
        }
        if experiment.situations.is_empty() {
            issues.push(CatalogIssue::EmptyExperiment(experiment.name.clone()));
        }
    }

    issues
}
