//! Biome filter — which biomes of a body count for a biome-scoped run type.

use crate::catalog::Biome;
use crate::error::ScienceError;
use crate::situation::RunType;

/// Select the biomes eligible for `run_type`, preserving their order.
///
/// - `RealBiomes` keeps everything that is not surface-only.
/// - `LandBiomes` keeps everything that is not liquid.
/// - `LiquidBiomes` keeps only liquid biomes.
///
/// `Global` has no biome concept and is rejected with
/// [`ScienceError::InvalidArgument`]; callers handle it before filtering.
/// Run types from outside the known set are rejected when they are parsed
/// ([`ScienceError::UnknownRunType`]) and never reach this function.
pub fn filter_biomes(run_type: RunType, biomes: &[Biome]) -> Result<Vec<&Biome>, ScienceError> {
    match run_type {
        RunType::Global => Err(ScienceError::InvalidArgument { run_type }),
        RunType::RealBiomes => Ok(biomes.iter().filter(|b| !b.surface_only).collect()),
        RunType::LandBiomes => Ok(biomes.iter().filter(|b| !b.liquid).collect()),
        RunType::LiquidBiomes => Ok(biomes.iter().filter(|b| b.liquid).collect()),
    }
}
