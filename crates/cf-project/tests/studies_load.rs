use std::path::PathBuf;

use cf_project::{AngularSpeedDef, TimeBaseDef, load_study};

fn studies_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../studies")
}

#[test]
fn all_bundled_studies_load() {
    let mut count = 0;
    for entry in std::fs::read_dir(studies_dir()).unwrap() {
        let path = entry.unwrap().path();
        load_study(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        count += 1;
    }
    assert!(count >= 3);
}

#[test]
fn reference_study_values() {
    let study = load_study(&studies_dir().join("reference.yaml")).unwrap();
    assert_eq!(study.linkage.length_ab_m, 0.5);
    assert_eq!(study.linkage.length_bc_m, 1.0);
    assert_eq!(
        study.linkage.angular_speed,
        AngularSpeedDef::RadPerSec { value: 0.5 }
    );
    assert_eq!(study.sampling.frame_count, 360);
    assert_eq!(study.sampling.revolutions, 2.0);
    assert_eq!(study.sampling.time_base, TimeBaseDef::Nominal);
}

#[test]
fn rpm_study_uses_crank_period() {
    let study = load_study(&studies_dir().join("rpm_full_turns.yaml")).unwrap();
    assert_eq!(study.sampling.time_base, TimeBaseDef::CrankPeriod);
    assert!((study.linkage.angular_speed.rad_per_sec() - std::f64::consts::PI).abs() < 1e-12);
}
