//! End-to-end evaluation runs over word lists and synthetic items

use std::io::Write;
use std::sync::Arc;

use bloom_engine::domain::FilterConfig;
use bloom_engine::{
    EvaluationConfig, EvaluationService, HashFamily, Metrics, SequentialSource, WordListSource,
};

fn config(family: HashFamily, exponent: u32, hash_count: usize) -> EvaluationConfig {
    EvaluationConfig {
        filter: FilterConfig {
            exponent,
            hash_count,
            family,
            trace: false,
        },
        num_filters: 8,
        items_to_insert: 500,
        known_probes: 200,
        unknown_probes: 500,
        seed: 2024,
    }
}

#[test]
fn test_evaluation_over_word_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..2000 {
        writeln!(file, "word{i:04}").unwrap();
    }

    let source = WordListSource::new(file.path(), 9);
    let report = EvaluationService::new()
        .run(&config(HashFamily::Cryptographic, 14, 3), &source, &|| {})
        .unwrap();

    assert_eq!(report.false_negatives, 0);
    assert_eq!(report.items_inserted, 500);
    assert_eq!(report.unknown_probes, 8 * 500);
}

#[test]
fn test_crypto_rate_tracks_theory() {
    // m = 2^14, n = 500, k = 3 -> theoretical FPR ~ 0.00066
    let report = EvaluationService::new()
        .run(
            &config(HashFamily::Cryptographic, 14, 3),
            &SequentialSource::new("entry-"),
            &|| {},
        )
        .unwrap();

    assert!(report.theoretical_false_positive_rate < 0.001);
    assert!(
        report.false_positive_rate < 0.01,
        "measured {} vs theoretical {}",
        report.false_positive_rate,
        report.theoretical_false_positive_rate
    );
}

#[test]
fn test_more_inserts_never_lower_the_rate() {
    for family in [HashFamily::NonCryptographic, HashFamily::Cryptographic] {
        let points = EvaluationService::new()
            .sweep(
                &config(family, 10, 2),
                &SequentialSource::new("sweep-"),
                &[50, 100, 200, 400, 800],
            )
            .unwrap();

        assert_eq!(points.len(), 5);
        for pair in points.windows(2) {
            assert!(
                pair[0].false_positive_rate <= pair[1].false_positive_rate,
                "{family}: {pair:?}"
            );
        }
        assert!(points[4].false_positive_rate > points[0].false_positive_rate);
    }
}

#[test]
fn test_metrics_shared_across_parallel_trials() {
    let metrics = Arc::new(Metrics::new());
    let service = EvaluationService::with_metrics(metrics.clone());

    service
        .run(
            &config(HashFamily::NonCryptographic, 12, 5),
            &SequentialSource::new("m-"),
            &|| {},
        )
        .unwrap();

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.filters_created, 8);
    assert_eq!(snapshot.elements_inserted, 8 * 500);
    assert_eq!(snapshot.bytes_allocated, 8 * 512);
}

#[test]
fn test_report_serializes_to_json() {
    let report = EvaluationService::new()
        .run(
            &config(HashFamily::Cryptographic, 8, 1),
            &SequentialSource::new("j-"),
            &|| {},
        )
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["filters"], 8);
    assert_eq!(json["config"]["filter"]["family"], "cryptographic");
    assert!(json["false_positive_rate"].is_number());
}
