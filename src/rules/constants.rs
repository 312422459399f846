//! Adduct masses and other fixed values of the reference tables

/// Monoisotopic mass of a proton, [M+H]
pub const PROTON_MASS: f64 = 1.007825;

/// Monoisotopic mass of sodium
pub const SODIUM_MASS: f64 = 22.98977;

/// [(M+H)-18]: protonation with loss of water
pub const PROTONATED_WATER_LOSS: f64 = -17.0027;

/// [M+18]: ammonium adduct
pub const AMMONIUM_ADDUCT: f64 = 18.0344;

/// [M-97]: loss of phosphoric acid
pub const PHOSPHATE_LOSS: f64 = -96.9691;

/// [M-171]: loss of glycerophosphate
pub const GLYCEROPHOSPHATE_LOSS: f64 = -171.0059;

/// [M-2H+3Na]+
pub const TRISODIUM_ADDUCT: f64 = 3.0 * SODIUM_MASS - 2.0 * PROTON_MASS;

/// [M-H+2Na]+
pub const DISODIUM_ADDUCT: f64 = 2.0 * SODIUM_MASS - PROTON_MASS;

/// Upper bound used for open-ended m/z and RT ranges
pub const UNBOUNDED: f64 = f64::MAX;

/// Adduct label of the fallback rule
pub const FALLBACK_ADDUCT_LABEL: &str = "AUTO";

/// Expected class abbreviation of the fallback rule
pub const FALLBACK_CLASS_ABBREV: &str = "NOIDEA";

/// Class name of the fallback rule (matches any class)
pub const FALLBACK_CLASS_NAME: &str = "(.*)";
