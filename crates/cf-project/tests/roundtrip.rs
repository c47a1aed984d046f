use cf_project::schema::*;
use cf_project::{ProjectError, load_study, load_yaml, save_json, save_study, save_yaml};

fn reference_study() -> StudyDef {
    StudyDef {
        version: 1,
        name: "Reference slider crank".to_string(),
        description: Some("0.5 m crank, 1 m coupler".to_string()),
        linkage: LinkageDef {
            length_ab_m: 0.5,
            length_bc_m: 1.0,
            angular_speed: AngularSpeedDef::RadPerSec { value: 0.5 },
        },
        sampling: SamplingDef {
            frame_count: 360,
            revolutions: 2.0,
            time_base: TimeBaseDef::Nominal,
            tangent_tol: None,
        },
    }
}

#[test]
fn roundtrip_yaml_reference_study() {
    let study = reference_study();
    let path = std::env::temp_dir().join("cf_project_roundtrip_reference.yaml");

    save_yaml(&path, &study).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(study, loaded);
}

#[test]
fn roundtrip_json_by_extension() {
    let mut study = reference_study();
    study.linkage.angular_speed = AngularSpeedDef::Rpm { value: 30.0 };
    study.sampling.time_base = TimeBaseDef::CrankPeriod;
    study.sampling.tangent_tol = Some(1e-10);
    let path = std::env::temp_dir().join("cf_project_roundtrip_rpm.json");

    save_json(&path, &study).unwrap();
    let loaded = load_study(&path).unwrap();

    assert_eq!(study, loaded);
}

#[test]
fn load_handwritten_yaml_with_defaults() {
    let yaml = r#"
version: 1
name: Handwritten
linkage:
  length_ab_m: 0.5
  length_bc_m: 1.0
  angular_speed:
    unit: rpm
    value: 30.0
"#;
    let path = std::env::temp_dir().join("cf_project_handwritten.yml");
    std::fs::write(&path, yaml).unwrap();

    let study = load_study(&path).unwrap();
    assert_eq!(study.sampling, SamplingDef::default());
    assert!((study.linkage.angular_speed.rad_per_sec() - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn invalid_study_is_not_saved() {
    let mut study = reference_study();
    study.sampling.frame_count = 0;
    let path = std::env::temp_dir().join("cf_project_invalid.yaml");

    let err = save_study(&path, &study).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("cf_project_study.toml");
    let err = load_study(&path).unwrap_err();
    assert!(matches!(err, ProjectError::UnknownFormat { .. }));
}
