use std::thread;

use ecopack_core::{MaterialCatalog, RecommendationInput, StandardEngine};
use serde_json::{json, Value};

fn request(name: &str, weight: f64, category: &str, fragility: f64, shipping: &str) -> Value {
    json!({
        "product_name": name,
        "product_weight_kg": weight,
        "category": category,
        "fragility_index": fragility,
        "shipping_type": shipping,
    })
}

#[test]
fn parallel_requests_against_one_catalog_match_sequential_results() {
    let catalog = MaterialCatalog::builtin();
    let engine = StandardEngine::default();
    let payloads = vec![
        request("Granola Box", 2.0, "Food", 0.5, "Road"),
        request("Headphones", 1.2, "Electronics", 0.8, "Air"),
        request("Serum Kit", 0.4, "Cosmetics", 0.3, "Sea"),
        request("Vial Tray", 25.0, "Pharmacy", 0.95, "Air"),
    ];

    let sequential: Vec<Value> = payloads
        .iter()
        .map(|payload| {
            let input = RecommendationInput { catalog: &catalog, payload, correlation_id: "seq" };
            serde_json::to_value(engine.recommend(input).expect("valid request"))
                .expect("serializable")
        })
        .collect();

    let parallel: Vec<Value> = thread::scope(|scope| {
        let handles: Vec<_> = payloads
            .iter()
            .map(|payload| {
                let catalog = &catalog;
                let engine = &engine;
                scope.spawn(move || {
                    let input = RecommendationInput { catalog, payload, correlation_id: "par" };
                    serde_json::to_value(engine.recommend(input).expect("valid request"))
                        .expect("serializable")
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().expect("worker finished")).collect()
    });

    assert_eq!(sequential, parallel);
    assert_eq!(catalog, MaterialCatalog::builtin(), "catalog is never mutated");
}

#[test]
fn heavy_fragile_request_falls_back_to_full_catalog() {
    let catalog = MaterialCatalog::builtin();
    let payload = request("Vial Tray", 25.0, "Pharmacy", 0.95, "Air");
    let input = RecommendationInput { catalog: &catalog, payload: &payload, correlation_id: "t" };

    let recommendation = StandardEngine::default().recommend(input).expect("valid request");

    assert!(recommendation.feasibility_relaxed);
    assert_eq!(recommendation.predictions.len(), catalog.len());
    let ranks: Vec<u32> = recommendation.predictions.iter().map(|result| result.rank).collect();
    assert_eq!(ranks, (1..=catalog.len() as u32).collect::<Vec<_>>());
}
