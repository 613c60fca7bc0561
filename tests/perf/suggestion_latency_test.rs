use std::time::Instant;

use crate::suggestions::{SuggestionEngine, SuggestionLimits};

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn catalog_match_p95_under_10ms() {
    let mut catalog: Vec<String> = (0..2_000)
        .map(|i| format!("Clinical trial outcomes for condition {i:05}"))
        .collect();
    catalog.push("Gestational diabetes screening guidelines".to_string());
    let engine = SuggestionEngine::new(catalog, SuggestionLimits::default());

    for _ in 0..30 {
        let _ = engine.matches("diabetes");
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(80);
        for _ in 0..80 {
            let start = Instant::now();
            let matches = engine.matches("diabetes");
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
            assert_eq!(matches.len(), 1);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 10.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 10.0ms); batches={batch_p95:?}",
    );
}
