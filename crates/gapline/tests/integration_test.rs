//! End-to-end tests: files on disk through to dashboard queries.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use gapline::query::{DEFAULT_RANK_LIMIT, export_file_name, to_csv_string};
use gapline::{
    DatasetPaths, DuplicatePolicy, GaplineError, Metric, Pipeline, PipelineCache, PipelineConfig,
    SchemaWarning,
};

/// Write the three inputs into a fresh directory.
fn create_dataset(gdp: &str, life: &str, population: &str) -> (TempDir, DatasetPaths) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("gdp_pcap.csv"), gdp).expect("Failed to write gdp");
    fs::write(dir.path().join("life_expectancy.csv"), life).expect("Failed to write life");
    fs::write(dir.path().join("population.csv"), population).expect("Failed to write population");
    let paths = DatasetPaths::from_dir(dir.path());
    (dir, paths)
}

fn two_country_dataset() -> (TempDir, DatasetPaths) {
    create_dataset(
        "country,1999,2000\nCountry A,1k,\"$1,200\"\nCountry B,500,600\n",
        "country,1999,2000\nCountry A,50,51\nCountry B,,60\n",
        "country,1999,2000\nCountry A,1M,1.1M\nCountry B,2M,2.1M\n",
    )
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[test]
fn test_end_to_end_two_countries() {
    let (_dir, paths) = two_country_dataset();
    let output = Pipeline::new().run(&paths).expect("Pipeline failed");

    let rows = output.table.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].country, "Country A");
    assert_eq!(rows[0].year, 1999);
    assert_eq!(rows[0].gdp_per_cap, 1000.0);
    assert_eq!(rows[0].life_exp, 50.0);
    assert_eq!(rows[0].population, 1_000_000.0);
    assert_eq!(rows[1].gdp_per_cap, 1200.0);
    assert_eq!(rows[1].population, 1_100_000.0);

    let life = output.dataset(Metric::LifeExpectancy).unwrap();
    assert_eq!(life.preprocess.dropped_missing, 1);
    assert_eq!(life.preprocess.dropped[0].country.as_deref(), Some("Country B"));
    assert_eq!(life.preprocess.dropped[0].line, 3);
}

#[test]
fn test_end_to_end_single_country() {
    let (_dir, paths) = create_dataset(
        "country,2000,2001\nCountry A,\"$1,000\",2k\n",
        "country,2000,2001\nCountry A,50,51\n",
        "country,2000,2001\nCountry A,1M,1.1M\n",
    );
    let output = Pipeline::new().run(&paths).unwrap();

    let rows: Vec<(&str, i32, f64, f64, f64)> = output
        .table
        .iter()
        .map(|r| (r.country.as_str(), r.year, r.gdp_per_cap, r.life_exp, r.population))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Country A", 2000, 1000.0, 50.0, 1_000_000.0),
            ("Country A", 2001, 2000.0, 51.0, 1_100_000.0),
        ]
    );
}

#[test]
fn test_source_metadata_recorded() {
    let (_dir, paths) = two_country_dataset();
    let output = Pipeline::new().run(&paths).unwrap();

    let gdp = output.dataset(Metric::GdpPerCapita).unwrap();
    let source = gdp.source.as_ref().expect("file-backed source");
    assert_eq!(source.file, "gdp_pcap.csv");
    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 2);
    assert_eq!((source.first_year, source.last_year), (1999, 2000));
    assert!(source.hash.starts_with("sha256:"));
}

#[test]
fn test_population_magnitudes() {
    let (_dir, paths) = create_dataset(
        "country,2000\nX,1\nY,1\nZ,1\n",
        "country,2000\nX,1\nY,1\nZ,1\n",
        "country,2000\nX,3.5k\nY,2M\nZ,1.2B\n",
    );
    let output = Pipeline::new().run(&paths).unwrap();
    let pops: Vec<f64> = output.table.iter().map(|r| r.population).collect();
    assert_eq!(pops, vec![3500.0, 2_000_000.0, 1_200_000_000.0]);
}

#[test]
fn test_unrecognized_suffix_drops_row() {
    let (_dir, paths) = create_dataset(
        "country,2000\nX,1\nY,1\n",
        "country,2000\nX,1\nY,1\n",
        "country,2000\nX,1Bn\nY,5\n",
    );
    let output = Pipeline::new().run(&paths).unwrap();
    assert_eq!(output.table.countries(), vec!["Y"]);

    let pop = output.dataset(Metric::Population).unwrap();
    assert_eq!(pop.preprocess.dropped_unparseable, 1);
}

#[test]
fn test_disjoint_years_produce_empty_table() {
    let (_dir, paths) = create_dataset(
        "country,1990,1991\nX,1,1\n",
        "country,2000,2001\nX,1,1\n",
        "country,1990,1991\nX,1,1\n",
    );
    let output = Pipeline::new().run(&paths).unwrap();
    assert!(output.table.is_empty());
    assert!(output.cross_section(1990).is_empty());
    assert_eq!(output.summary.rows, 0);
}

#[test]
fn test_tab_delimited_input() {
    let (_dir, paths) = create_dataset(
        "country\t2000\nX\t2k\n",
        "country\t2000\nX\t70\n",
        "country\t2000\nX\t5M\n",
    );
    let output = Pipeline::new().run(&paths).unwrap();
    assert_eq!(output.table.len(), 1);
    assert_eq!(output.dataset(Metric::GdpPerCapita).unwrap().source.as_ref().unwrap().format, "tsv");
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_missing_file_is_fatal() {
    let (dir, paths) = two_country_dataset();
    fs::remove_file(dir.path().join("population.csv")).unwrap();

    let err = Pipeline::new().run(&paths).unwrap_err();
    match err {
        GaplineError::Io { path, .. } => assert!(path.ends_with(Path::new("population.csv"))),
        other => panic!("expected Io error, got {other}"),
    }
}

#[test]
fn test_non_integer_year_header_is_fatal() {
    let (_dir, paths) = create_dataset(
        "country,2000,notes\nX,1,a\n",
        "country,2000\nX,1\n",
        "country,2000\nX,1\n",
    );
    let err = Pipeline::new().run(&paths).unwrap_err();
    assert!(err.is_schema_error());
    assert!(err.to_string().contains("gdp_pcap.csv"));
    assert!(err.to_string().contains("notes"));
}

#[test]
fn test_missing_id_column_is_fatal() {
    let (_dir, paths) = create_dataset(
        "country,2000\nX,1\n",
        "name,2000\nX,1\n",
        "country,2000\nX,1\n",
    );
    let err = Pipeline::new().run(&paths).unwrap_err();
    assert!(matches!(err, GaplineError::MissingIdColumn { .. }));
}

#[test]
fn test_custom_id_column() {
    let (_dir, paths) = create_dataset(
        "name,2000\nX,1\n",
        "name,2000\nX,1\n",
        "name,2000\nX,1\n",
    );
    let mut config = PipelineConfig::default();
    config.parser.id_column = "name".to_string();

    let output = Pipeline::with_config(config).run(&paths).unwrap();
    assert_eq!(output.table.len(), 1);
}

#[test]
fn test_duplicate_countries() {
    let gdp = "country,2000\nX,1\nX,2\n";
    let one = "country,2000\nX,1\n";

    let (_dir, paths) = create_dataset(gdp, one, one);
    let output = Pipeline::new().run(&paths).unwrap();
    assert_eq!(output.table.len(), 2);
    let warnings: Vec<&SchemaWarning> = output.warnings().collect();
    assert_eq!(warnings.len(), 1);

    let config = PipelineConfig {
        duplicates: DuplicatePolicy::KeepFirst,
        ..Default::default()
    };
    let output = Pipeline::with_config(config).run(&paths).unwrap();
    assert_eq!(output.table.len(), 1);
    assert_eq!(output.table.rows()[0].gdp_per_cap, 1.0);
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_compare_and_export() {
    let (_dir, paths) = two_country_dataset();
    let output = Pipeline::new().run(&paths).unwrap();

    let comparison = output.compare(&["Country A", "Country B"]);
    assert_eq!(comparison.series.len(), 1);
    assert_eq!(comparison.unknown, vec!["Country B".to_string()]);

    let slice = output.cross_section(2000);
    let text = to_csv_string(&slice.rows).unwrap();
    assert_eq!(
        text,
        "country,year,gdp_per_cap,life_exp,population\nCountry A,2000,1200.0,51.0,1100000.0\n"
    );
    assert_eq!(export_file_name(slice.year), "gdp_life_pop_2000.csv");
}

#[test]
fn test_rankings_from_files() {
    let mut gdp = String::from("country,2000\n");
    let mut rest = String::from("country,2000\n");
    for i in 0..30 {
        gdp.push_str(&format!("C{:02},{}\n", i, (i + 1) * 100));
        rest.push_str(&format!("C{:02},1\n", i));
    }
    let (_dir, paths) = create_dataset(&gdp, &rest, &rest);
    let output = Pipeline::new().run(&paths).unwrap();

    let rankings = output.rankings(2000, DEFAULT_RANK_LIMIT);
    assert_eq!(rankings.ranked, 30);
    assert!(!rankings.overlapping);
    assert_eq!(rankings.top[0].row.country, "C29");
    assert_eq!(rankings.bottom.last().unwrap().row.country, "C00");
}

#[test]
fn test_cache_picks_up_edits() {
    let (dir, paths) = two_country_dataset();
    let mut cache = PipelineCache::new(Pipeline::new(), paths);

    assert_eq!(cache.get().unwrap().table.len(), 2);
    fs::write(
        dir.path().join("life_expectancy.csv"),
        "country,1999,2000\nCountry A,50,51\nCountry B,70,60\n",
    )
    .unwrap();
    assert_eq!(cache.get().unwrap().table.len(), 4);
    assert_eq!(cache.runs(), 2);
}
