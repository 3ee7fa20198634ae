use rosquery::{CaseMode, MemoryTransport, MenuQuery, QueryConfig, QueryError};
use std::io::Write;
use std::sync::Arc;

#[test]
fn config_file_round_trip() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "case_mode = \"snake\"\nstrict_expressions = true").unwrap();
    let cfg = QueryConfig::from_file(f.path()).unwrap();
    assert_eq!(cfg.case_mode, CaseMode::Snake);
    assert!(cfg.strict_expressions);
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = QueryConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, QueryError::Io(_)));
}

#[test]
fn invalid_toml_is_reported() {
    let err = QueryConfig::from_toml_str("case_mode = [").unwrap_err();
    assert!(matches!(err, QueryError::Toml(_)));
}

#[test]
fn builder_carries_case_mode() {
    let cfg = QueryConfig { case_mode: CaseMode::Snake, ..Default::default() };
    let q = MenuQuery::with_config(Arc::new(MemoryTransport::new()), "/interface", cfg);
    assert_eq!(q.case_mode(), CaseMode::Snake);
    // naming convention never touches outgoing words
    let words = q.where_(("mac-address", "AA")).full_query("/print").into_words();
    assert_eq!(words, vec!["/interface/print", "?mac-address=AA"]);
}

#[test]
fn logging_writes_under_given_dir() {
    let dir = tempfile::tempdir().unwrap();
    rosquery::logger::configure_logging(Some(dir.path()), Some("debug"), Some(2)).unwrap();
    assert!(dir.path().join("app.log").exists());
    assert!(dir.path().join("sentences.log").exists());
}
