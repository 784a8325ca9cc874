//! Pure science-opportunity logic for KSP.
//!
//! Enumerates every science report a career can collect: for each body,
//! experiment and vehicle situation, how many distinct variants exist (once
//! globally, once per biome, once per land or liquid biome) and the
//! identifier of each. Functions take plain catalog data and return values;
//! nothing here does I/O beyond loading a catalog file on request.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Bodies, biomes, experiments; JSON loading and validation |
//! | [`error`] | Crate-wide error type |
//! | [`filter`] | Biome filter for biome-scoped run types |
//! | [`opportunity`] | Opportunity generator and identifier parsing |
//! | [`situation`] | Vehicle situations and run types |
//! | [`subject`] | Game science subject ids mapped to tracked locations |
//! | [`summary`] | Counts by body, experiment and situation |

pub mod catalog;
pub mod error;
pub mod filter;
pub mod opportunity;
pub mod situation;
pub mod subject;
pub mod summary;

pub use catalog::{Biome, Body, Catalog, Experiment};
pub use error::ScienceError;
pub use filter::filter_biomes;
pub use opportunity::{generate_opportunities, Opportunity};
pub use situation::{RunType, Situation};
pub use subject::{ScienceSubject, SubjectFilter};
