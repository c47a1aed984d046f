//! Study validation logic.

use crate::schema::{LinkageDef, SamplingDef, StudyDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Largest accepted `sampling.frame_count`; matches the sampler's limit.
pub const MAX_FRAME_COUNT: usize = 10_000_000;

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

pub fn validate_study(study: &StudyDef) -> Result<(), ValidationError> {
    if study.version == 0 || study.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: study.version,
        });
    }

    if study.name.trim().is_empty() {
        return Err(invalid("name", &study.name, "must not be empty"));
    }

    validate_linkage(&study.linkage)?;
    validate_sampling(&study.sampling)?;
    Ok(())
}

fn validate_linkage(linkage: &LinkageDef) -> Result<(), ValidationError> {
    require_positive("linkage.length_ab_m", linkage.length_ab_m)?;
    require_positive("linkage.length_bc_m", linkage.length_bc_m)?;

    let speed = linkage.angular_speed.value();
    if !speed.is_finite() || speed == 0.0 {
        return Err(invalid(
            "linkage.angular_speed.value",
            speed,
            "must be finite and nonzero",
        ));
    }
    Ok(())
}

fn validate_sampling(sampling: &SamplingDef) -> Result<(), ValidationError> {
    if sampling.frame_count == 0 {
        return Err(invalid(
            "sampling.frame_count",
            sampling.frame_count,
            "must be positive",
        ));
    }
    if sampling.frame_count > MAX_FRAME_COUNT {
        return Err(invalid(
            "sampling.frame_count",
            sampling.frame_count,
            "exceeds the maximum frame count",
        ));
    }
    require_positive("sampling.revolutions", sampling.revolutions)?;

    if let Some(tol) = sampling.tangent_tol {
        if !tol.is_finite() || tol < 0.0 {
            return Err(invalid(
                "sampling.tangent_tol",
                tol,
                "must be non-negative and finite",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AngularSpeedDef;

    fn reference() -> StudyDef {
        StudyDef {
            version: 1,
            name: "Reference".to_string(),
            description: None,
            linkage: LinkageDef {
                length_ab_m: 0.5,
                length_bc_m: 1.0,
                angular_speed: AngularSpeedDef::RadPerSec { value: 0.5 },
            },
            sampling: SamplingDef::default(),
        }
    }

    #[test]
    fn reference_is_valid() {
        validate_study(&reference()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut study = reference();
        study.version = 7;
        assert_eq!(
            validate_study(&study),
            Err(ValidationError::UnsupportedVersion { version: 7 })
        );
    }

    #[test]
    fn rejects_blank_name() {
        let mut study = reference();
        study.name = "  ".to_string();
        assert!(validate_study(&study).is_err());
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let mut study = reference();
        study.linkage.length_bc_m = 0.0;
        match validate_study(&study) {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "linkage.length_bc_m")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_speed() {
        let mut study = reference();
        study.linkage.angular_speed = AngularSpeedDef::Rpm { value: 0.0 };
        assert!(validate_study(&study).is_err());
    }

    #[test]
    fn negative_speed_is_allowed() {
        let mut study = reference();
        study.linkage.angular_speed = AngularSpeedDef::RadPerSec { value: -1.0 };
        validate_study(&study).unwrap();
    }

    #[test]
    fn rejects_bad_sampling() {
        let mut study = reference();
        study.sampling.frame_count = 0;
        assert!(validate_study(&study).is_err());

        let mut study = reference();
        study.sampling.revolutions = f64::INFINITY;
        assert!(validate_study(&study).is_err());

        let mut study = reference();
        study.sampling.tangent_tol = Some(-1.0);
        assert!(validate_study(&study).is_err());
    }

    #[test]
    fn rejects_huge_frame_count() {
        let mut study = reference();
        study.sampling.frame_count = usize::MAX / 2;
        match validate_study(&study) {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "sampling.frame_count")
            }
            other => panic!("unexpected: {other:?}"),
        }

        study.sampling.frame_count = MAX_FRAME_COUNT;
        validate_study(&study).unwrap();
    }
}
