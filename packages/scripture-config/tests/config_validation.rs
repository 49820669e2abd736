use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use scripture_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with_embedding(api_key: &str, api_key_env: Option<&str>) -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let embedding = value
		.get_mut("providers")
		.and_then(Value::as_table_mut)
		.and_then(|providers| providers.get_mut("embedding"))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [providers.embedding].");

	embedding.insert("api_key".to_string(), Value::String(api_key.to_string()));

	if let Some(name) = api_key_env {
		embedding.insert("api_key_env".to_string(), Value::String(name.to_string()));
	}

	toml::to_string(&value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("scripture_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_loads_and_trims_api_base() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = scripture_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must load.");

	assert_eq!(cfg.providers.embedding.api_base, "https://api.openai.com/v1");
	assert_eq!(cfg.search.max_results, 50);
	assert_eq!(cfg.search.passage.window_size, 5);
	assert_eq!(cfg.search.passage.num_sequences, 500);
}

#[test]
fn search_section_defaults_when_omitted() {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	value.as_table_mut().expect("Template config must be a table.").remove("search");

	let cfg: Config = toml::from_str(&toml::to_string(&value).expect("Failed to render config."))
		.expect("Config without [search] must parse.");

	assert_eq!(cfg.search.max_results, 50);
	assert_eq!(cfg.search.ranker_workers, 8);
	assert!(cfg.search.passage.drop_lowest_after_reference);
	assert!(!cfg.search.passage.keep_single_verse_runs);
	assert_eq!(cfg.corpus.chapter_columns.vector, 5);
	assert_eq!(cfg.corpus.verse_columns.vector, 4);
}

#[test]
fn empty_api_key_is_filled_from_environment() {
	let payload = sample_toml_with_embedding("", Some("PATH"));
	let path = write_temp_config(payload);
	let result = scripture_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Config with api_key_env must load.");
	let expected = env::var("PATH").expect("PATH must be set.");

	assert_eq!(cfg.providers.embedding.api_key, expected);
}

#[test]
fn missing_api_key_environment_variable_is_reported() {
	let payload = sample_toml_with_embedding("", Some("SCRIPTURE_TEST_UNSET_API_KEY_VARIABLE"));
	let path = write_temp_config(payload);
	let result = scripture_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected missing environment variable error.");

	assert!(
		matches!(&err, Error::MissingEnv { name, .. } if name == "SCRIPTURE_TEST_UNSET_API_KEY_VARIABLE"),
		"Unexpected error: {err}"
	);
}

#[test]
fn api_key_must_be_present() {
	let payload = sample_toml_with_embedding("   ", None);
	let path = write_temp_config(payload);
	let result = scripture_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected api_key validation error.");

	assert!(
		err.to_string().contains("Provider embedding api_key must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn retry_attempts_must_be_positive() {
	let mut cfg = base_config();

	cfg.providers.embedding.retry.max_attempts = 0;

	let err = scripture_config::validate(&cfg).expect_err("Expected retry validation error.");

	assert!(
		err.to_string()
			.contains("providers.embedding.retry.max_attempts must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn retry_backoff_bounds_must_be_ordered() {
	let mut cfg = base_config();

	cfg.providers.embedding.retry.initial_backoff_ms = 5_000;
	cfg.providers.embedding.retry.max_backoff_ms = 1_000;

	let err = scripture_config::validate(&cfg).expect_err("Expected backoff validation error.");

	assert!(err.to_string().contains("must not exceed max_backoff_ms."), "Unexpected error: {err}");
}

#[test]
fn passage_window_settings_must_be_positive() {
	let mut cfg = base_config();

	cfg.search.passage.window_size = 0;

	let err = scripture_config::validate(&cfg).expect_err("Expected window_size validation error.");

	assert!(
		err.to_string().contains("search.passage.window_size must be greater than zero."),
		"Unexpected error: {err}"
	);

	cfg = base_config();
	cfg.search.passage.num_sequences = 0;

	let err =
		scripture_config::validate(&cfg).expect_err("Expected num_sequences validation error.");

	assert!(
		err.to_string().contains("search.passage.num_sequences must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn ranker_workers_must_be_positive() {
	let mut cfg = base_config();

	cfg.search.ranker_workers = 0;

	let err = scripture_config::validate(&cfg).expect_err("Expected ranker_workers error.");

	assert!(
		err.to_string().contains("search.ranker_workers must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn corpus_columns_must_be_distinct() {
	let mut cfg = base_config();

	cfg.corpus.verse_columns.text = cfg.corpus.verse_columns.vector;

	let err = scripture_config::validate(&cfg).expect_err("Expected column validation error.");

	assert!(
		err.to_string().contains("corpus.verse_columns must name distinct columns."),
		"Unexpected error: {err}"
	);
}

#[test]
fn unreadable_config_path_is_reported() {
	let mut path = env::temp_dir();

	path.push("scripture_config_test_missing_file.toml");

	let err = scripture_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}
