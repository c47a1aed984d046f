//! Study file schema.

use cf_core::units::{AngularVelocity, rad_per_s, raw, rpm};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyDef {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub linkage: LinkageDef,
    #[serde(default)]
    pub sampling: SamplingDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkageDef {
    pub length_ab_m: f64,
    pub length_bc_m: f64,
    pub angular_speed: AngularSpeedDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum AngularSpeedDef {
    RadPerSec { value: f64 },
    Rpm { value: f64 },
}

impl AngularSpeedDef {
    /// Value as written, in its own unit.
    pub fn value(&self) -> f64 {
        match *self {
            AngularSpeedDef::RadPerSec { value } | AngularSpeedDef::Rpm { value } => value,
        }
    }

    pub fn to_quantity(&self) -> AngularVelocity {
        match *self {
            AngularSpeedDef::RadPerSec { value } => rad_per_s(value),
            AngularSpeedDef::Rpm { value } => rpm(value),
        }
    }

    pub fn rad_per_sec(&self) -> f64 {
        raw::radians_per_second(self.to_quantity())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplingDef {
    pub frame_count: usize,
    pub revolutions: f64,
    #[serde(default)]
    pub time_base: TimeBaseDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangent_tol: Option<f64>,
}

impl Default for SamplingDef {
    fn default() -> Self {
        Self {
            frame_count: 360,
            revolutions: 2.0,
            time_base: TimeBaseDef::default(),
            tangent_tol: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeBaseDef {
    #[default]
    Nominal,
    CrankPeriod,
}
