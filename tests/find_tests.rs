use superfile_tui::core::find::{SearchOptions, search};
use superfile_tui::core::stats::{StatsOptions, collect};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_search_unit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::File::create(dir.path().join("crab.txt"))?;
    fs::File::create(dir.path().join("other.txt"))?;

    let hits = search(dir.path(), "crab", &SearchOptions::default());
    assert_eq!(
        hits.len(),
        1,
        "Expected 1 result for 'crab', got {}: {:?}",
        hits.len(),
        hits.iter().map(|h| h.relative()).collect::<Vec<_>>()
    );

    let filename = hits[0]
        .path()
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or("Could not extract valid UTF-8 file name")?;
    assert_eq!(filename, "crab.txt");
    assert!(!hits[0].is_dir());
    Ok(())
}

#[test]
fn test_search_empty_query() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::File::create(dir.path().join("something.txt"))?;

    assert!(search(dir.path(), "", &SearchOptions::default()).is_empty());
    assert!(search(dir.path(), "   ", &SearchOptions::default()).is_empty());
    Ok(())
}

#[test]
fn test_search_subdirectory_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let nested = dir.path().join("src").join("deep");
    fs::create_dir_all(&nested)?;
    fs::File::create(nested.join("Crab_Module.rs"))?;

    let hits = search(dir.path(), "crab", &SearchOptions::default());
    assert_eq!(hits.len(), 1, "Expected the nested file to be found");
    assert_eq!(hits[0].relative(), "src/deep/Crab_Module.rs");
    assert_eq!(hits[0].path(), nested.join("Crab_Module.rs"));
    Ok(())
}

#[test]
fn test_search_reports_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("crab_dir"))?;
    fs::File::create(dir.path().join("crab_dir").join("inside.txt"))?;

    let hits = search(dir.path(), "crab", &SearchOptions::default());
    assert_eq!(hits.len(), 1);
    assert!(hits[0].is_dir(), "Expected 'crab_dir' to be reported as a directory");
    assert!(hits[0].label().contains("crab_dir"));
    Ok(())
}

#[test]
fn test_search_hidden_and_limit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join(".cache"))?;
    fs::File::create(dir.path().join(".cache").join("log_a.txt"))?;
    for i in 0..5 {
        fs::File::create(dir.path().join(format!("log_{}.txt", i)))?;
    }

    let visible = search(dir.path(), "log", &SearchOptions::default());
    assert_eq!(visible.len(), 5, "hidden directories are not descended");

    let options = SearchOptions {
        max_results: 100,
        show_hidden: true,
    };
    assert_eq!(search(dir.path(), "log", &options).len(), 6);

    let capped = SearchOptions {
        max_results: 3,
        show_hidden: false,
    };
    let hits = search(dir.path(), "log", &capped);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].relative(), "log_0.txt", "results come in name order");
    Ok(())
}

#[test]
fn test_stats_respect_file_limit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("data"))?;
    for i in 0..8 {
        fs::write(dir.path().join("data").join(format!("{}.bin", i)), vec![0u8; 10])?;
    }

    let full = collect(dir.path(), &StatsOptions::default());
    assert_eq!(full.total_files, 8);
    assert_eq!(full.total_dirs, 1);
    assert_eq!(full.total_size, 80);
    assert!(!full.truncated);

    let limited = StatsOptions {
        max_files: 5,
        ..StatsOptions::default()
    };
    let partial = collect(dir.path(), &limited);
    assert_eq!(partial.total_files, 5);
    assert!(partial.truncated);
    Ok(())
}
