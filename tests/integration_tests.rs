//! Integration tests for the Entity Graph Engine

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use entity_graph::analytics::{analyze, degree_centrality, greedy_modularity_communities};
use entity_graph::assembler::build_graph;
use entity_graph::error::EngineError;
use entity_graph::inference::{ProximityTypePolicy, RelationPolicy, SharedTypePolicy};
use entity_graph::io::{load_records, parse_records, save_json};
use entity_graph::scoring::score;
use entity_graph::temporal::{filter_by_year_range, get_date_range, normalize_year};
use entity_graph::types::{Graph, NormalizedYear, Record};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_path(name: &str) -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "entity_graph_{}_{}_{}",
        std::process::id(),
        id,
        name
    ))
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_file(path);
}

/// Deterministic generator so property tests are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn random_records(rng: &mut Lcg, count: usize) -> Vec<Record> {
    let labels = ["PERSON", "ORG", "LOC", "EVENT"];
    (0..count)
        .map(|_| {
            let subject = format!("entity-{}", rng.below(count as u64));
            let label = labels[rng.below(labels.len() as u64) as usize];
            let start = rng.below(1000);
            let mut record = Record::new(subject, label).with_span(start, start + 5);
            if rng.below(3) > 0 {
                record = record.with_date(format!("{}", 1800 + rng.below(250)));
            }
            record
        })
        .collect()
}

fn ada_records() -> Vec<Record> {
    vec![
        Record::new("Ada Lovelace", "PERSON")
            .with_date("1843-12-10")
            .with_span(0, 12),
        Record::new("Analytical Engine", "EVENT")
            .with_date("1843")
            .with_span(40, 58),
    ]
}

// ---------------------------------------------------------------------------
// Temporal normalization
// ---------------------------------------------------------------------------

#[test]
fn test_year_found_regardless_of_surrounding_text() {
    let mut rng = Lcg(7);
    let noise = ["", "circa ", "?? ", "Q3/", "born in ", "ca."];
    let tails = ["", " AD", "-ish", " (approx)", "s", "/xx"];

    for _ in 0..200 {
        let year = 1000 + rng.below(9000) as i32;
        let prefix = noise[rng.below(noise.len() as u64) as usize];
        let suffix = tails[rng.below(tails.len() as u64) as usize];
        let text = format!("{}{}{}", prefix, year, suffix);
        assert_eq!(
            normalize_year(Some(&text)),
            NormalizedYear::Year(year),
            "failed on {:?}",
            text
        );
    }
}

#[test]
fn test_longer_digit_runs_are_not_years() {
    assert_eq!(normalize_year(Some("1234567")), NormalizedYear::Unknown);
    assert_eq!(normalize_year(Some("")), NormalizedYear::Unknown);
    assert_eq!(normalize_year(None), NormalizedYear::Unknown);
}

// ---------------------------------------------------------------------------
// Graph assembly
// ---------------------------------------------------------------------------

#[test]
fn test_node_count_equals_distinct_subjects_without_self_loops() {
    let mut rng = Lcg(42);
    let policies: Vec<Box<dyn RelationPolicy>> = vec![
        Box::new(SharedTypePolicy),
        Box::new(ProximityTypePolicy::new(100)),
    ];

    for size in [0, 1, 5, 30, 120] {
        let records = random_records(&mut rng, size);
        let distinct: HashSet<&str> = records.iter().map(|r| r.subject.as_str()).collect();

        for policy in &policies {
            let graph = build_graph(&records, policy.as_ref());
            assert_eq!(graph.node_count(), distinct.len());
            assert!(graph.edges().iter().all(|e| e.source != e.target));
        }
    }
}

#[test]
fn test_ada_lovelace_has_no_edges_under_either_policy() {
    let records = ada_records();

    let shared = build_graph(&records, &SharedTypePolicy);
    assert_eq!(shared.node_count(), 2);
    assert_eq!(shared.edge_count(), 0);

    let proximity = build_graph(&records, &ProximityTypePolicy::new(100));
    assert_eq!(proximity.node_count(), 2);
    assert_eq!(proximity.edge_count(), 0);
}

#[test]
fn test_close_same_label_records_get_one_edge() {
    let records = vec![
        Record::new("Alice", "PERSON").with_span(10, 15),
        Record::new("Bob", "PERSON").with_span(50, 53),
    ];
    let graph = build_graph(&records, &ProximityTypePolicy::new(100));

    assert_eq!(graph.edge_count(), 1);
    let relation = &graph.edges()[0].relation;
    assert!(relation.contains("Alice"));
    assert!(relation.contains("Bob"));
}

// ---------------------------------------------------------------------------
// Temporal filter
// ---------------------------------------------------------------------------

#[test]
fn test_filter_keeps_only_the_middle_year() {
    let records = vec![
        Record::new("A", "EVENT").with_date("1900"),
        Record::new("B", "EVENT").with_date("1950"),
        Record::new("C", "EVENT").with_date("2000"),
    ];
    let kept = filter_by_year_range(&records, 1940, 1960);
    assert_eq!(kept, vec![Record::new("B", "EVENT").with_date("1950")]);
}

#[test]
fn test_all_empty_dates_signal_no_valid_dates() {
    let records = vec![
        Record::new("A", "EVENT").with_date(""),
        Record::new("B", "EVENT").with_date("   "),
        Record::new("C", "EVENT"),
    ];
    assert!(matches!(
        get_date_range(&records),
        Err(EngineError::NoValidDates)
    ));
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

fn relabel(records: &[Record]) -> Vec<Record> {
    records
        .iter()
        .map(|r| Record {
            subject: format!("renamed::{}", r.subject.chars().rev().collect::<String>()),
            ..r.clone()
        })
        .collect()
}

fn sorted_values(map: &BTreeMap<String, f64>) -> Vec<f64> {
    let mut values: Vec<f64> = map.values().copied().collect();
    values.sort_by(f64::total_cmp);
    values
}

#[test]
fn test_degree_centrality_invariant_to_relabeling() {
    let mut rng = Lcg(99);
    for size in [3, 12, 40] {
        let records = random_records(&mut rng, size);
        let original = degree_centrality(&build_graph(&records, &SharedTypePolicy));
        let renamed = degree_centrality(&build_graph(&relabel(&records), &SharedTypePolicy));

        let sum_a: f64 = original.values().sum();
        let sum_b: f64 = renamed.values().sum();
        assert!((sum_a - sum_b).abs() < 1e-9);
        assert_eq!(sorted_values(&original), sorted_values(&renamed));
    }
}

#[test]
fn test_communities_partition_every_node() {
    let mut rng = Lcg(2024);
    for size in [1, 8, 25, 60] {
        let records = random_records(&mut rng, size);
        let graph = build_graph(&records, &ProximityTypePolicy::new(150));
        let communities = greedy_modularity_communities(&graph);

        let mut seen = HashSet::new();
        for member in communities.iter().flatten() {
            assert!(seen.insert(member.clone()), "{} in two communities", member);
        }
        assert_eq!(seen.len(), graph.node_count());
    }
}

#[test]
fn test_analysis_covers_every_node() {
    let mut rng = Lcg(5);
    let records = random_records(&mut rng, 30);
    let graph = build_graph(&records, &SharedTypePolicy);
    let result = analyze(&graph).unwrap();

    for node in graph.nodes() {
        assert!(result.degree_centrality.contains_key(&node.subject));
        assert!(result.betweenness_centrality.contains_key(&node.subject));
        assert!(result.eigenvector(&node.subject).is_some());
    }
    assert!(result.key_players.len() <= 5);
}

#[test]
fn test_concurrent_analysis_is_consistent() {
    let mut rng = Lcg(11);
    let graph = Arc::new(build_graph(&random_records(&mut rng, 50), &SharedTypePolicy));
    let expected = analyze(&graph).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || analyze(&graph).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[test]
fn test_self_score_and_empty_reference() {
    let mut rng = Lcg(3);
    let records = random_records(&mut rng, 20);
    assert_eq!(score(&records, &records), 100.0);
    assert_eq!(score(&records, &[]), 0.0);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn test_records_round_trip_through_disk() {
    let path = temp_path("records.json");
    let records = ada_records();

    save_json(&path, &records).unwrap();
    let loaded = load_records(&path).unwrap();
    assert_eq!(loaded, records);

    cleanup(&path);
}

#[test]
fn test_graph_round_trip_keeps_lookups() {
    let path = temp_path("graph.json");
    let records = vec![
        Record::new("Alice", "PERSON").with_date("1990"),
        Record::new("Bob", "PERSON"),
    ];
    let graph = build_graph(&records, &SharedTypePolicy);

    save_json(&path, &graph).unwrap();
    let loaded: Graph = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(loaded.node_count(), 2);
    assert!(loaded.edge("Bob", "Alice").is_some());
    assert_eq!(loaded.node("Alice").unwrap().year, NormalizedYear::Year(1990));

    cleanup(&path);
}

#[test]
fn test_extraction_output_to_analysis() {
    let output = r#"
{"entity": "PER", "word": "Grace Hopper", "start": 0, "end": 12}
{"entity": "PER", "word": "Howard Aiken", "start": 30, "end": 42}
{"entity": "ORG", "word": "Harvard", "start": 60, "end": 67}
"#;
    let records = parse_records(output);
    assert_eq!(records.len(), 3);

    let graph = build_graph(&records, &ProximityTypePolicy::new(100));
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.edge("Grace Hopper", "Howard Aiken").is_some());

    let result = analyze(&graph).unwrap();
    assert_eq!(result.communities.len(), 2);
    assert_eq!(result.key_players[0], "Grace Hopper");
}
