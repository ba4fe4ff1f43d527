//! Keystrokes on stdin through the debouncer to rendered results

use crate::common::Workspace;
use crate::lull;
use anyhow::Result;
use std::time::Duration;

#[test]
fn test_burst_searches_only_last_term() -> Result<()> {
    let ws = Workspace::new()?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog, "--delay-ms", "500", "--replay"
    )
    .stdin("0 c\n20 ca\n40 cat\n")
    .assert_success()?;

    assert_eq!(result.result_terms(), vec!["cat".to_string()]);
    assert!(result.contains_stdout("Cat typing"));
    assert!(result.contains_stdout("Catapult launch"));
    assert!(!result.contains_stdout("Dog"));
    Ok(())
}

#[test]
fn test_separated_keystrokes_search_each_term() -> Result<()> {
    let ws = Workspace::new()?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog, "--delay-ms", "50", "--replay"
    )
    .stdin("0 cat\n600 dog\n")
    .assert_success()?;

    assert_eq!(result.result_terms(), vec!["cat".to_string(), "dog".to_string()]);
    assert!(result.contains_stdout("Dog on skateboard"));

    // The second keystroke is only delivered 600ms in
    assert!(result.duration >= Duration::from_millis(600));
    Ok(())
}

#[test]
fn test_limit_and_no_results() -> Result<()> {
    let ws = Workspace::new()?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog, "--limit", "2"
    )
    .stdin("cat\n")
    .assert_success()?;

    assert!(result.contains_stdout("Search results for \"cat\""));
    assert!(result.contains_stdout("(2)"));
    assert!(!result.contains_stdout("Catapult launch"));

    let result = lull!(ws.path(), "--config", &config, "search", "--catalog", &catalog)
        .stdin("parrot\n")
        .assert_success()?;
    assert!(result.contains_stdout("No results"));
    Ok(())
}

#[test]
fn test_blank_input_searches_nothing() -> Result<()> {
    let ws = Workspace::new()?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    let result = lull!(ws.path(), "--config", &config, "search", "--catalog", &catalog)
        .stdin("   \n")
        .assert_success()?;

    assert!(result.result_terms().is_empty());
    assert!(result.stdout.trim().is_empty());
    Ok(())
}

#[test]
fn test_rejected_term_shows_service_message() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_config("[search]\nmax_term_len = 3\n")?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    let result = lull!(ws.path(), "--config", &config, "search", "--catalog", &catalog)
        .stdin("kitten\n")
        .assert_success()?;

    assert!(result.contains_stdout("Search term must be at most 3 characters"));
    assert!(result.result_terms().is_empty());
    Ok(())
}

#[test]
fn test_negative_delay_is_rejected() -> Result<()> {
    let ws = Workspace::new()?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog, "--delay-ms", "-5"
    )
    .assert_failure()?;

    assert!(result.contains_stderr("debounce.delay_ms must be between 0 and 60000"));
    Ok(())
}

#[test]
fn test_out_of_range_overrides_are_rejected() -> Result<()> {
    let ws = Workspace::new()?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog, "--limit", "0"
    )
    .stdin("cat\n")
    .assert_failure()?;
    assert!(result.contains_stderr("search.limit must be between 1 and 100"));
    assert!(result.result_terms().is_empty());

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog, "--delay-ms", "99999999"
    )
    .stdin("cat\n")
    .assert_failure()?;
    assert!(result.contains_stderr("debounce.delay_ms must be between 0 and 60000"));

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog, "--latency-ms", "60001"
    )
    .stdin("cat\n")
    .assert_failure()?;
    assert!(result.contains_stderr("search.latency_ms must be between 0 and 60000"));
    Ok(())
}

#[test]
fn test_missing_catalog_is_reported() -> Result<()> {
    let ws = Workspace::new()?;
    let config = ws.config_arg();

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", "does-not-exist.json"
    )
    .assert_failure()?;

    assert!(result.contains_stderr("Failed to read catalog"));
    Ok(())
}

#[test]
fn test_malformed_replay_line_fails() -> Result<()> {
    let ws = Workspace::new()?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog, "--replay"
    )
    .stdin("0 cat\nsoon dog\n")
    .assert_failure()?;

    assert!(result.contains_stderr("Invalid replay line 2"));
    assert!(result.result_terms().is_empty());
    Ok(())
}

#[test]
fn test_in_flight_search_is_shown_before_replay_error() -> Result<()> {
    let ws = Workspace::new()?;
    let (catalog, config) = (ws.catalog(), ws.config_arg());

    // "cat" is searched at once and answers at 500ms; line 3 fails at 300ms
    let result = lull!(
        ws.path(),
        "--config", &config, "search", "--catalog", &catalog,
        "--delay-ms", "0", "--latency-ms", "500", "--replay"
    )
    .stdin("0 cat\n300 \nbogus\n")
    .assert_failure()?;

    assert!(result.contains_stderr("Invalid replay line 3"));
    assert_eq!(result.result_terms(), vec!["cat".to_string()]);
    Ok(())
}
