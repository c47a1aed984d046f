//! Turns a study definition into solver inputs.

use cf_core::units::m;
use cf_kinematics::{LinkageGeometry, SolverOptions};
use cf_project::{StudyDef, TimeBaseDef, validate_study};
use cf_sim::{SampleOptions, TimeBase};

use crate::error::AppResult;

/// Everything the sampler needs for one study.
#[derive(Debug, Clone, Copy)]
pub struct StudyRuntime {
    pub geometry: LinkageGeometry,
    pub options: SampleOptions,
}

pub fn compile_study(study: &StudyDef) -> AppResult<StudyRuntime> {
    validate_study(study)?;

    let linkage = &study.linkage;
    let geometry = LinkageGeometry::from_quantities(
        m(linkage.length_ab_m),
        m(linkage.length_bc_m),
        linkage.angular_speed.to_quantity(),
    )?;

    let sampling = &study.sampling;
    let time_base = match sampling.time_base {
        TimeBaseDef::Nominal => TimeBase::Nominal,
        TimeBaseDef::CrankPeriod => TimeBase::CrankPeriod,
    };
    let solver = match sampling.tangent_tol {
        Some(tangent_tol) => SolverOptions { tangent_tol },
        None => SolverOptions::default(),
    };

    Ok(StudyRuntime {
        geometry,
        options: SampleOptions {
            frame_count: sampling.frame_count,
            revolutions: sampling.revolutions,
            time_base,
            solver,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_project::{AngularSpeedDef, LinkageDef, SamplingDef};

    #[test]
    fn compiles_rpm_study() {
        let study = StudyDef {
            version: 1,
            name: "rpm".to_string(),
            description: None,
            linkage: LinkageDef {
                length_ab_m: 0.5,
                length_bc_m: 1.0,
                angular_speed: AngularSpeedDef::Rpm { value: 30.0 },
            },
            sampling: SamplingDef {
                tangent_tol: Some(1e-9),
                time_base: TimeBaseDef::CrankPeriod,
                ..SamplingDef::default()
            },
        };

        let runtime = compile_study(&study).unwrap();
        assert!((runtime.geometry.angular_speed() - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(runtime.geometry.length_ab(), 0.5);
        assert_eq!(runtime.options.frame_count, 360);
        assert_eq!(runtime.options.time_base, TimeBase::CrankPeriod);
        assert_eq!(runtime.options.solver.tangent_tol, 1e-9);
    }
}
