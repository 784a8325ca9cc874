//! Opportunity generator — every (body, experiment, situation, biome) worth
//! a science report.
//!
//! Enumeration walks bodies, then experiments, then each experiment's
//! situations in declaration order. The output order is part of the contract:
//! two runs over the same catalog produce the same sequence.
//!
//! ```
//! use kspscience_logic::catalog::{Body, Experiment};
//! use kspscience_logic::opportunity::opportunity_identifiers;
//! use kspscience_logic::situation::{RunType, Situation};
//!
//! let bodies = vec![Body::new("Kerbol", true, vec![])];
//! let experiments = vec![Experiment::new(
//!     "Infrared Telescope",
//!     [(Situation::SpaceHigh, RunType::Global)],
//! )];
//! let ids = opportunity_identifiers(&bodies, &experiments).unwrap();
//! assert_eq!(ids, vec!["Kerbol.Infrared Telescope.SpaceHigh.global"]);
//! ```

use std::fmt;

use serde::Serialize;

use crate::catalog::{Body, Experiment};
use crate::error::ScienceError;
use crate::filter::filter_biomes;
use crate::situation::{RunType, Situation};

/// Joins the four identifier fields. Names are not escaped.
pub const SEPARATOR: char = '.';

/// Fourth identifier field for opportunities that ignore biomes.
pub const GLOBAL: &str = "global";

/// One emitted opportunity, borrowing its names from the catalog.
///
/// `Display` renders the identifier `Body.Experiment.Situation.Biome`, with
/// `global` in place of the biome when `biome` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Opportunity<'a> {
    pub body: &'a str,
    pub experiment: &'a str,
    pub situation: Situation,
    pub biome: Option<&'a str>,
}

impl<'a> Opportunity<'a> {
    /// Parse an identifier back into its fields.
    ///
    /// A fourth field of `global` maps to `biome: None`.
    pub fn parse(id: &'a str) -> Result<Self, ScienceError> {
        let fields: Vec<&str> = id.split(SEPARATOR).collect();
        let &[body, experiment, situation, scope] = fields.as_slice() else {
            return Err(ScienceError::MalformedIdentifier(id.to_string()));
        };
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ScienceError::MalformedIdentifier(id.to_string()));
        }

        Ok(Self {
            body,
            experiment,
            situation: situation.parse()?,
            biome: (scope != GLOBAL).then_some(scope),
        })
    }

    pub fn is_global(&self) -> bool {
        self.biome.is_none()
    }
}

impl fmt::Display for Opportunity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.body,
            self.experiment,
            self.situation,
            self.biome.unwrap_or(GLOBAL),
            sep = SEPARATOR
        )
    }
}

/// Enumerate every opportunity in catalog order.
///
/// For each body, experiment and declared situation:
/// - flying situations are skipped on bodies without an atmosphere;
/// - `Global` run types emit exactly one opportunity;
/// - biome-scoped run types emit one per biome passing [`filter_biomes`].
///
/// `Experiment::atmosphere_only` is not consulted.
pub fn generate_opportunities<'a>(
    bodies: &'a [Body],
    experiments: &'a [Experiment],
) -> Result<Vec<Opportunity<'a>>, ScienceError> {
    let mut opportunities = Vec::new();

    for body in bodies {
        let before = opportunities.len();

        for experiment in experiments {
            for (&situation, &run_type) in &experiment.situations {
                if situation.is_flying() && !body.atmosphere {
                    log::trace!(
                        "{}: skipping {} {} (no atmosphere)",
                        body.name,
                        experiment.name,
                        situation
                    );
                    continue;
                }

                let opportunity = |biome| Opportunity {
                    body: body.name.as_str(),
                    experiment: experiment.name.as_str(),
                    situation,
                    biome,
                };

                match run_type {
                    RunType::Global => opportunities.push(opportunity(None)),
                    RunType::RealBiomes | RunType::LandBiomes | RunType::LiquidBiomes => {
                        for biome in filter_biomes(run_type, &body.biomes)? {
                            opportunities.push(opportunity(Some(biome.name.as_str())));
                        }
                    }
                }
            }
        }

        log::debug!(
            "{}: {} opportunities",
            body.name,
            opportunities.len() - before
        );
    }

    Ok(opportunities)
}

/// [`generate_opportunities`] rendered as identifier strings.
pub fn opportunity_identifiers(
    bodies: &[Body],
    experiments: &[Experiment],
) -> Result<Vec<String>, ScienceError> {
    Ok(generate_opportunities(bodies, experiments)?
        .iter()
        .map(ToString::to_string)
        .collect())
}

/// Number of opportunities [`generate_opportunities`] would emit, computed
/// without building them.
pub fn count_opportunities(
    bodies: &[Body],
    experiments: &[Experiment],
) -> Result<usize, ScienceError> {
    let mut total = 0;
    for body in bodies {
        for experiment in experiments {
            for (&situation, &run_type) in &experiment.situations {
                if situation.is_flying() && !body.atmosphere {
                    continue;
                }
                total += match run_type {
                    RunType::Global => 1,
                    RunType::RealBiomes | RunType::LandBiomes | RunType::LiquidBiomes => {
                        filter_biomes(run_type, &body.biomes)?.len()
                    }
                };
            }
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Biome;

    // ── Helpers ────────────────────────────────────────────────────────────

    fn gilly() -> Body {
        Body::new(
            "Gilly",
            false,
            vec![
                Biome::new("Lowlands"),
                Biome::new("Midlands"),
                Biome::new("Highlands"),
            ],
        )
    }

    fn eva_report() -> Experiment {
        Experiment::new(
            "EVA Report",
            [
                (Situation::Landed, RunType::LandBiomes),
                (Situation::Splashed, RunType::LiquidBiomes),
                (Situation::FlyingLow, RunType::RealBiomes),
                (Situation::FlyingHigh, RunType::Global),
                (Situation::SpaceLow, RunType::RealBiomes),
                (Situation::SpaceHigh, RunType::Global),
            ],
        )
    }

    // ── Scenarios ──────────────────────────────────────────────────────────

    #[test]
    fn test_seismic_scan_on_gilly() {
        let bodies = vec![gilly()];
        let experiments = vec![Experiment::new(
            "Seismic Scan",
            [(Situation::Landed, RunType::LandBiomes)],
        )];
        let ids = opportunity_identifiers(&bodies, &experiments).unwrap();
        assert_eq!(
            ids,
            vec![
                "Gilly.Seismic Scan.Landed.Lowlands",
                "Gilly.Seismic Scan.Landed.Midlands",
                "Gilly.Seismic Scan.Landed.Highlands",
            ]
        );
    }

    #[test]
    fn test_global_on_body_without_biomes() {
        let bodies = vec![Body::new("Kerbol", true, vec![])];
        let experiments = vec![Experiment::new(
            "Infrared Telescope",
            [(Situation::SpaceHigh, RunType::Global)],
        )];
        let ops = generate_opportunities(&bodies, &experiments).unwrap();
        assert_eq!(ops.len(), 1);
        assert!(ops[0].is_global());
        assert_eq!(ops[0].to_string(), "Kerbol.Infrared Telescope.SpaceHigh.global");
    }

    #[test]
    fn test_no_flying_without_atmosphere() {
        let bodies = vec![gilly()];
        let experiments = vec![eva_report()];
        let ops = generate_opportunities(&bodies, &experiments).unwrap();
        assert!(ops.iter().all(|o| !o.situation.is_flying()));
        // Landed 3 + Splashed 0 + SpaceLow 3 + SpaceHigh 1
        assert_eq!(ops.len(), 7);
    }

    #[test]
    fn test_flying_with_atmosphere() {
        let mut body = gilly();
        body.atmosphere = true;
        let bodies = vec![body];
        let experiments = vec![eva_report()];
        let ops = generate_opportunities(&bodies, &experiments).unwrap();
        let flying = ops.iter().filter(|o| o.situation.is_flying()).count();
        // FlyingLow 3 + FlyingHigh 1
        assert_eq!(flying, 4);
    }

    #[test]
    fn test_biome_scoped_run_type_without_biomes() {
        let bodies = vec![Body::new("Jool", true, vec![])];
        let experiments = vec![eva_report()];
        let ids = opportunity_identifiers(&bodies, &experiments).unwrap();
        assert_eq!(
            ids,
            vec!["Jool.EVA Report.FlyingHigh.global", "Jool.EVA Report.SpaceHigh.global"]
        );
    }

    #[test]
    fn test_splashed_without_liquid_emits_nothing() {
        let bodies = vec![gilly()];
        let experiments = vec![Experiment::new(
            "Surface Sample",
            [(Situation::Splashed, RunType::LiquidBiomes)],
        )];
        assert!(generate_opportunities(&bodies, &experiments)
            .unwrap()
            .is_empty());

        // A Global splashed entry still fires once.
        let experiments = vec![Experiment::new(
            "Surface Sample",
            [(Situation::Splashed, RunType::Global)],
        )];
        assert_eq!(generate_opportunities(&bodies, &experiments).unwrap().len(), 1);
    }

    #[test]
    fn test_atmosphere_only_is_not_consulted() {
        let mut analysis = Experiment::new(
            "Atmosphere Analysis",
            [
                (Situation::Landed, RunType::LandBiomes),
                (Situation::FlyingLow, RunType::RealBiomes),
            ],
        );
        analysis.atmosphere_only = true;

        // Gilly has no air, yet landed runs are still emitted.
        let bodies = vec![gilly()];
        let experiments = vec![analysis];
        let ops = generate_opportunities(&bodies, &experiments).unwrap();
        assert_eq!(ops.len(), 3);
        assert!(ops.iter().all(|o| o.situation == Situation::Landed));
    }

    #[test]
    fn test_order_is_body_experiment_situation() {
        let bodies = vec![
            Body::new("Mun", false, vec![Biome::new("Poles")]),
            Body::new("Minmus", false, vec![Biome::new("Flats")]),
        ];
        let experiments = vec![
            Experiment::new(
                "Crew Report",
                [
                    (Situation::SpaceHigh, RunType::Global),
                    (Situation::Landed, RunType::LandBiomes),
                ],
            ),
            Experiment::new("Goo", [(Situation::SpaceLow, RunType::Global)]),
        ];
        let ids = opportunity_identifiers(&bodies, &experiments).unwrap();
        assert_eq!(
            ids,
            vec![
                "Mun.Crew Report.SpaceHigh.global",
                "Mun.Crew Report.Landed.Poles",
                "Mun.Goo.SpaceLow.global",
                "Minmus.Crew Report.SpaceHigh.global",
                "Minmus.Crew Report.Landed.Flats",
                "Minmus.Goo.SpaceLow.global",
            ]
        );
    }

    #[test]
    fn test_count_matches_generation() {
        let mut kerbin = Body::new(
            "Kerbin",
            true,
            vec![
                Biome::new("Shores"),
                Biome::liquid("Water"),
                Biome::surface_only("LaunchPad"),
            ],
        );
        kerbin.biomes.push(Biome::new("Tundra"));
        let bodies = vec![kerbin, gilly()];
        let experiments = vec![eva_report()];

        let ops = generate_opportunities(&bodies, &experiments).unwrap();
        assert_eq!(count_opportunities(&bodies, &experiments).unwrap(), ops.len());
    }

    #[test]
    fn test_count_per_run_type() {
        let bodies = vec![Body::new(
            "Kerbin",
            true,
            vec![
                Biome::new("Shores"),
                Biome::liquid("Water"),
                Biome::surface_only("LaunchPad"),
            ],
        )];
        for (run_type, expected) in [
            (RunType::Global, 1),
            (RunType::RealBiomes, 2),
            (RunType::LandBiomes, 2),
            (RunType::LiquidBiomes, 1),
        ] {
            let experiments = vec![Experiment::new("Goo", [(Situation::Landed, run_type)])];
            assert_eq!(
                count_opportunities(&bodies, &experiments).unwrap(),
                expected,
                "{run_type}"
            );
        }
    }

    #[test]
    fn test_empty_catalog() {
        assert!(generate_opportunities(&[], &[]).unwrap().is_empty());
        assert_eq!(count_opportunities(&[gilly()], &[]).unwrap(), 0);
    }

    // ── Identifiers ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_biome_identifier() {
        let op = Opportunity::parse("Kerbin.Crew Report.Landed.R&D Side Lab").unwrap();
        assert_eq!(op.body, "Kerbin");
        assert_eq!(op.experiment, "Crew Report");
        assert_eq!(op.situation, Situation::Landed);
        assert_eq!(op.biome, Some("R&D Side Lab"));
    }

    #[test]
    fn test_parse_global_identifier() {
        let op = Opportunity::parse("Eve.Gravity Scan.SpaceHigh.global").unwrap();
        assert!(op.is_global());
    }

    #[test]
    fn test_parse_inverts_display() {
        let bodies = vec![gilly()];
        let experiments = vec![eva_report()];
        for op in generate_opportunities(&bodies, &experiments).unwrap() {
            let id = op.to_string();
            assert_eq!(Opportunity::parse(&id).unwrap(), op);
        }
    }

    #[test]
    fn test_parse_malformed() {
        for id in [
            "",
            "Mun.Crew Report.Landed",
            "Mun.Crew Report.Landed.Poles.Extra",
            "Mun..Landed.Poles",
        ] {
            assert!(
                matches!(
                    Opportunity::parse(id),
                    Err(ScienceError::MalformedIdentifier(_))
                ),
                "{id:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_unknown_situation() {
        let err = Opportunity::parse("Mun.Crew Report.Orbiting.global").unwrap_err();
        assert!(matches!(err, ScienceError::UnknownSituation(ref s) if s == "Orbiting"));
    }
}
