//! Science subjects reported by the game, mapped to tracked locations.
//!
//! The game names every collected result with a subject id of the form
//! `experiment@BodySituationBiome`, e.g. `crewReport@KerbinSrfLandedLaunchPad`.
//! The body is the leading capitalised word, the situation token (see
//! [`Situation::subject_token`]) follows it, and whatever remains is the
//! biome with its spaces removed. A subject without a biome is global.
//!
//! ```
//! use kspscience_logic::subject::SubjectFilter;
//!
//! let filter = SubjectFilter::new([("crewReport", true)], [("Kerbin", true)]);
//! let subject = filter.accept("crewReport@KerbinSrfLandedLaunchPad").unwrap();
//! assert_eq!(subject.location(), "Kerbin:crewReport:Landed");
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::catalog::{Biome, Body};
use crate::error::ScienceError;
use crate::situation::Situation;

/// Joins the fields of a location key.
pub const LOCATION_SEPARATOR: char = ':';

/// A parsed subject id, borrowing from the id string.
///
/// `Display` renders the location key `Body:experiment:Situation`. The biome
/// is not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScienceSubject<'a> {
    pub experiment: &'a str,
    pub body: &'a str,
    pub situation: Situation,
    pub biome: Option<&'a str>,
}

impl<'a> ScienceSubject<'a> {
    /// Parse a subject id without consulting any tracking tables.
    pub fn parse(id: &'a str) -> Result<Self, ScienceError> {
        let malformed = || ScienceError::MalformedSubject(id.to_string());

        let (experiment, location) = split_experiment(id).ok_or_else(malformed)?;
        let (body, rest) = split_body(location).ok_or_else(malformed)?;
        let (situation, biome) =
            split_situation(rest).ok_or_else(|| ScienceError::UnknownSituation(rest.to_string()))?;

        Ok(Self {
            experiment,
            body,
            situation,
            biome: (!biome.is_empty()).then_some(biome),
        })
    }

    pub fn location(&self) -> String {
        self.to_string()
    }

    /// The catalog biome this subject was collected in. Subject ids drop the
    /// spaces from biome names, so names are compared with spaces removed.
    pub fn catalog_biome<'c>(&self, body: &'c Body) -> Option<&'c Biome> {
        let wanted = self.biome?;
        body.biomes
            .iter()
            .find(|b| b.name.chars().filter(|c| *c != ' ').eq(wanted.chars()))
    }
}

impl fmt::Display for ScienceSubject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.body,
            self.experiment,
            self.situation,
            sep = LOCATION_SEPARATOR
        )
    }
}

/// Which experiments and bodies are tracked.
///
/// A name mapped to `false` is known but ignored: subjects naming it are
/// dropped quietly. Names missing from a table are unexpected and logged.
#[derive(Debug, Clone, Default)]
pub struct SubjectFilter {
    experiments: HashMap<String, bool>,
    bodies: HashMap<String, bool>,
}

impl SubjectFilter {
    pub fn new<E, B>(
        experiments: impl IntoIterator<Item = (E, bool)>,
        bodies: impl IntoIterator<Item = (B, bool)>,
    ) -> Self
    where
        E: Into<String>,
        B: Into<String>,
    {
        Self {
            experiments: experiments.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            bodies: bodies.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Map a subject id to a tracked subject.
    ///
    /// Returns `None` for ignored experiments or bodies, and logs a warning
    /// for anything malformed or unknown.
    pub fn accept<'s>(&self, id: &'s str) -> Option<ScienceSubject<'s>> {
        let Some((experiment, location)) = split_experiment(id) else {
            log::warn!("unknown science experiment format '{}'", id);
            return None;
        };
        if !is_tracked(&self.experiments, experiment, id, "science experiment") {
            return None;
        }

        let Some((body, rest)) = split_body(location) else {
            log::warn!("unknown body format '{}'", id);
            return None;
        };
        if !is_tracked(&self.bodies, body, id, "body") {
            return None;
        }

        let Some((situation, biome)) = split_situation(rest) else {
            log::warn!("unknown situation+biome value '{}' in '{}'", rest, id);
            return None;
        };

        Some(ScienceSubject {
            experiment,
            body,
            situation,
            biome: (!biome.is_empty()).then_some(biome),
        })
    }
}

fn is_tracked(table: &HashMap<String, bool>, name: &str, id: &str, kind: &str) -> bool {
    match table.get(name) {
        Some(true) => true,
        Some(false) => {
            log::debug!("ignoring {} '{}' in '{}'", kind, name, id);
            false
        }
        None => {
            log::warn!("unknown {} value '{}' in '{}'", kind, name, id);
            false
        }
    }
}

/// `experiment@location`, both halves non-empty and exactly one `@`.
fn split_experiment(id: &str) -> Option<(&str, &str)> {
    let (experiment, location) = id.split_once('@')?;
    if experiment.is_empty() || location.is_empty() || location.contains('@') {
        return None;
    }
    Some((experiment, location))
}

/// Split before the first uppercase letter after the start.
fn split_body(location: &str) -> Option<(&str, &str)> {
    let (at, _) = location
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_ascii_uppercase())?;
    Some(location.split_at(at))
}

fn split_situation(rest: &str) -> Option<(Situation, &str)> {
    Situation::ALL.into_iter().find_map(|situation| {
        rest.strip_prefix(situation.subject_token())
            .map(|biome| (situation, biome))
    })
}
