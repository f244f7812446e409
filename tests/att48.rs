//! Smoke runs on TSPLIB att48 (48 cities, pseudo-Euclidean distances).

use std::path::PathBuf;
use u_tspga::ga::{seed::nearest_neighbor, TspGaConfig, TspGaRunner};
use u_tspga::instance::Instance;
use u_tspga::TspError;

fn att48_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/att48.txt")
}

#[test]
fn test_loads_att48() {
    let instance = Instance::load(att48_path(), Some(48)).expect("att48 loads");
    assert_eq!(instance.len(), 48);
    let m = instance.matrix();
    for i in 0..48 {
        assert_eq!(m.get(i, i), 0);
        for j in 0..48 {
            assert_eq!(m.get(i, j), m.get(j, i));
        }
    }
}

#[test]
fn test_wrong_city_count_is_malformed() {
    let err = Instance::load(att48_path(), Some(50)).unwrap_err();
    assert!(matches!(err, TspError::MalformedInput { .. }), "got {err:?}");
}

#[test]
fn test_missing_file_is_unavailable() {
    let err = Instance::load(att48_path().with_extension("missing"), Some(48)).unwrap_err();
    assert!(matches!(err, TspError::UnavailableResource { .. }), "got {err:?}");
}

#[test]
fn test_short_run_improves_on_greedy() {
    let instance = Instance::load(att48_path(), Some(48)).expect("att48 loads");
    let (_, greedy) = nearest_neighbor(instance.matrix());

    let config = TspGaConfig::default()
        .with_city_count(48)
        .with_generations(300)
        .with_seed(42);
    let result = TspGaRunner::run(instance.matrix(), &config).expect("valid run");

    assert_eq!(result.seed_length, greedy);
    assert!(result.best.is_permutation());
    assert_eq!(instance.matrix().tour_length(&result.best), result.best_length);
    assert!(
        result.best_length < greedy,
        "expected improvement over greedy {greedy}, got {}",
        result.best_length
    );
}

#[test]
fn test_strict_run_keeps_every_pair() {
    let instance = Instance::load(att48_path(), None).expect("att48 loads");
    let config = TspGaConfig::fast()
        .with_generations(150)
        .with_strict_validation(true)
        .with_seed(9);
    let result = TspGaRunner::run(instance.matrix(), &config).expect("valid run");
    assert_eq!(result.unrepaired_pairs, 0);
    assert_eq!(result.restored_pairs, 0);
    assert!(result.best_length <= result.seed_length);
}
