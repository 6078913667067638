use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gdlens::analyzers::patterns::PatternCensusEntry;
use gdlens::config::{Config, ExtractOptions};
use gdlens::core::{
    CallKind, CrossFileCall, FactExtractor, FileSet, MethodInfo, PropertyInfo, SignalInfo,
    StructuralRecord,
};
use gdlens::output::Format;
use gdlens::{BatchRunner, BatchStatus};

/// Extractor backed by a fixture map; unknown paths fail extraction.
struct MapExtractor {
    records: HashMap<String, StructuralRecord>,
}

impl MapExtractor {
    fn new(records: Vec<StructuralRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.path.clone(), r)).collect(),
        }
    }
}

impl FactExtractor for MapExtractor {
    fn extract(&self, path: &Path, _options: &ExtractOptions) -> StructuralRecord {
        let key = path.to_string_lossy();
        self.records.get(key.as_ref()).cloned().unwrap_or_else(|| {
            StructuralRecord::failed(key.as_ref(), "unexpected token at line 1")
        })
    }
}

fn script(path: &str) -> StructuralRecord {
    StructuralRecord::new(path)
}

fn with_methods(mut record: StructuralRecord, count: usize) -> StructuralRecord {
    for i in 0..count {
        record.methods.push(MethodInfo {
            name: format!("method_{i}"),
            ..Default::default()
        });
    }
    record
}

fn with_signals(mut record: StructuralRecord, count: usize) -> StructuralRecord {
    for i in 0..count {
        record.signals.push(SignalInfo {
            name: format!("signal_{i}"),
            ..Default::default()
        });
    }
    record
}

fn with_loads(mut record: StructuralRecord, target: &str, count: usize) -> StructuralRecord {
    for _ in 0..count {
        record.cross_file_calls.push(CrossFileCall {
            target: target.to_string(),
            kind: CallKind::Load,
            line: 1,
        });
    }
    record
}

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn run_batch(paths: &[&str], fixtures: Vec<StructuralRecord>) -> gdlens::BatchResult {
    init_tracing();
    let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
    let runner = BatchRunner::new(Config::default());
    runner
        .run(&paths, Arc::new(MapExtractor::new(fixtures)))
        .expect("batch runs")
}

#[test]
fn mixed_batch_tallies_failures_separately() {
    // 5 inputs, fixtures for 3: the other 2 fail extraction.
    let result = run_batch(
        &["a.gd", "b.gd", "c.gd", "d.gd", "e.gd"],
        vec![
            with_methods(script("a.gd"), 2),
            with_methods(script("c.gd"), 3),
            with_signals(script("e.gd"), 1),
        ],
    );

    assert_eq!(result.summary.status, BatchStatus::Complete);
    assert_eq!(result.summary.total, 5);
    assert_eq!(result.summary.successful, 3);
    assert_eq!(result.summary.failed, 2);
    // Aggregates cover exactly the successes.
    assert_eq!(result.summary.total_methods, 5);
    assert_eq!(result.summary.total_signals, 1);
    // Failed records stay in the itemization, in input order, with messages.
    assert_eq!(result.records.len(), 5);
    assert_eq!(result.records[1].path, "b.gd");
    assert!(result.records[1]
        .error
        .as_deref()
        .unwrap()
        .contains("unexpected token"));
}

#[test]
fn observer_census_counts_three_of_ten() {
    let mut fixtures = Vec::new();
    for i in 0..10 {
        let record = script(&format!("s{i}.gd"));
        fixtures.push(if i < 3 {
            with_signals(record, 3)
        } else {
            record
        });
    }
    let paths: Vec<String> = (0..10).map(|i| format!("s{i}.gd")).collect();
    let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    let result = run_batch(&path_refs, fixtures);

    assert_eq!(
        result.insights.pattern_census,
        vec![PatternCensusEntry {
            name: "observer".to_string(),
            count: 3,
            percentage: 30.0,
        }]
    );
}

#[test]
fn census_percentage_divides_by_full_batch_including_failures() {
    // 3 observers among 4 successes, plus 1 failed extraction: 3/5 = 60%.
    let fixtures = vec![
        with_signals(script("a.gd"), 3),
        with_signals(script("b.gd"), 3),
        with_signals(script("c.gd"), 4),
        script("d.gd"),
    ];
    let result = run_batch(&["a.gd", "b.gd", "c.gd", "d.gd", "broken.gd"], fixtures);

    let observer = &result.insights.pattern_census[0];
    assert_eq!(observer.count, 3);
    assert!((observer.percentage - 60.0).abs() < 1e-9);
}

#[test]
fn complexity_tie_breaks_to_first_input_order() {
    // Files at index 0 and 5 have identical scores.
    let mut fixtures = vec![with_methods(script("first.gd"), 4)];
    for i in 1..5 {
        fixtures.push(script(&format!("mid{i}.gd")));
    }
    fixtures.push(with_methods(script("last.gd"), 4));

    let result = run_batch(
        &["first.gd", "mid1.gd", "mid2.gd", "mid3.gd", "mid4.gd", "last.gd"],
        fixtures,
    );
    assert_eq!(result.insights.most_complex.as_deref(), Some("first.gd"));
}

#[test]
fn most_dependencies_uses_cross_file_calls() {
    let fixtures = vec![
        with_loads(script("a.gd"), "x.gd", 1),
        with_loads(script("b.gd"), "x.gd", 4),
        with_loads(script("c.gd"), "x.gd", 2),
    ];
    let result = run_batch(&["a.gd", "b.gd", "c.gd"], fixtures);
    assert_eq!(result.insights.most_dependencies.as_deref(), Some("b.gd"));
}

#[test]
fn cross_reference_asymmetry_end_to_end() {
    let result = run_batch(
        &["a.gd", "b.gd"],
        vec![with_loads(script("a.gd"), "b.gd", 3), script("b.gd")],
    );

    let a = result.cross_references.get("a.gd").expect("entry for a.gd");
    let b = result.cross_references.get("b.gd").expect("entry for b.gd");
    assert_eq!(a.references_to.len(), 3);
    assert_eq!(b.referenced_by.len(), 1);
    assert_eq!(b.referenced_by[0], "a.gd");
}

#[test]
fn empty_path_list_is_an_explicit_no_input_signal() {
    let result = run_batch(&[], Vec::new());
    assert_eq!(result.summary.status, BatchStatus::NoInput);
    assert_eq!(result.summary.total, 0);
    assert_eq!(result.summary.successful, 0);
    assert_eq!(result.summary.failed, 0);
    assert!(result.directory_stats.is_none());
}

#[test]
fn naming_issue_respects_strict_boundary() {
    // Exactly 30% unnamed: must not fire.
    let mut fixtures = Vec::new();
    for i in 0..10 {
        let mut record = script(&format!("s{i}.gd"));
        if i >= 3 {
            record.class_name = Some(format!("Class{i}"));
        }
        fixtures.push(record);
    }
    let paths: Vec<String> = (0..10).map(|i| format!("s{i}.gd")).collect();
    let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    let result = run_batch(&path_refs, fixtures.clone());
    assert!(result.insights.issues.is_empty());

    // One more unnamed file pushes the ratio strictly above 0.3.
    fixtures[3].class_name = None;
    let result = run_batch(&path_refs, fixtures);
    assert_eq!(result.insights.issues.len(), 1);
    assert!(result.insights.issues[0].message.contains("4 of 10"));
}

#[test]
fn scan_and_analyze_real_tree() {
    /// Extractor deriving a minimal record from the real file content.
    struct LineCountExtractor;

    impl FactExtractor for LineCountExtractor {
        fn extract(&self, path: &Path, _options: &ExtractOptions) -> StructuralRecord {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let mut record = StructuralRecord::new(path.to_string_lossy());
                    for (i, line) in content.lines().enumerate() {
                        if line.trim_start().starts_with("func ") {
                            record.methods.push(MethodInfo {
                                name: line.trim().to_string(),
                                line: i as u32 + 1,
                                ..Default::default()
                            });
                        }
                    }
                    record
                }
                Err(e) => StructuralRecord::failed(path.to_string_lossy(), e.to_string()),
            }
        }
    }

    let temp = tempfile::tempdir().unwrap();
    let scripts = temp.path().join("scripts");
    std::fs::create_dir(&scripts).unwrap();
    std::fs::write(
        scripts.join("player_state.gd"),
        "extends Node\n\nfunc _ready():\n\tpass\n\nfunc jump():\n\tpass\n",
    )
    .unwrap();
    std::fs::write(scripts.join("hud.gd"), "extends CanvasLayer\n").unwrap();

    let config = Config::default();
    let files = FileSet::scan(temp.path(), &config.exclude_patterns).unwrap();
    assert_eq!(files.len(), 2);

    let runner = BatchRunner::new(config);
    let result = runner
        .run(files.files(), Arc::new(LineCountExtractor))
        .unwrap();

    assert_eq!(result.summary.successful, 2);
    assert_eq!(result.summary.total_methods, 2);

    let stats = result.directory_stats.expect("directory stats requested");
    assert_eq!(stats.naming.snake, 1); // player_state
    assert_eq!(stats.naming.mixed, 1); // hud
    assert!(stats.sizes.total > 0);
    assert!(stats.max_depth > 0);
    assert!(result
        .insights
        .most_complex
        .as_deref()
        .unwrap()
        .ends_with("player_state.gd"));
}

#[test]
fn directory_stats_can_be_disabled() {
    let mut config = Config::default();
    config.batch.include_directory_stats = false;
    let runner = BatchRunner::new(config);
    let result = runner
        .run(
            &[PathBuf::from("a.gd")],
            Arc::new(MapExtractor::new(vec![script("a.gd")])),
        )
        .unwrap();
    assert!(result.directory_stats.is_none());
}

#[test]
fn all_formats_render_the_same_result() {
    let result = run_batch(
        &["game_manager.gd", "enemy.gd"],
        vec![
            with_signals(with_loads(script("game_manager.gd"), "enemy.gd", 2), 3),
            script("enemy.gd"),
        ],
    );

    let json = Format::Json.render(&result).unwrap();
    assert!(json.contains("\"pattern_census\""));
    assert!(json.contains("\"cross_references\""));

    let document = Format::Document.render(&result).unwrap();
    assert!(document.contains("Summary"));
    assert!(document.contains("game_manager.gd"));

    let tree = Format::Tree.render(&result).unwrap();
    assert!(tree.contains("summary:"));

    let text = Format::Text.render(&result).unwrap();
    assert!(text.contains("summary.total = 2"));
}
