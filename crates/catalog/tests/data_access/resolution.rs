use crate::helpers::{build_corpus, store};

#[test]
fn round_tables_resolve_to_their_files() {
    let root = build_corpus();
    let store = store(&root);
    for r in 1..=6 {
        let path = store.resolve_csv_path("0055", &format!("round{}", r)).unwrap();
        assert_eq!(path.file_name().unwrap(), format!("round{}.csv", r).as_str());
    }
}

#[test]
fn table_in_subdirectory_resolves() {
    let root = build_corpus();
    let path = store(&root).resolve_csv_path("0059", "villages").unwrap();
    assert!(path.ends_with("census/villages.csv"));
}

#[test]
fn separator_variants_resolve() {
    let root = build_corpus();
    let store = store(&root);
    let hyphen = store.resolve_csv_path("0087", "ka_weather_daily").unwrap();
    assert!(hyphen.ends_with("ka-weather-daily.csv"));
    let fuzzy = store.resolve_csv_path("0087", "KA-Weather").unwrap();
    assert_eq!(fuzzy, hyphen);
}

#[test]
fn resolution_is_stable() {
    let root = build_corpus();
    let store = store(&root);
    let first = store.resolve_csv_path("0055", "round");
    for _ in 0..5 {
        assert_eq!(store.resolve_csv_path("0055", "round"), first);
    }
    assert!(store.resolve_csv_path("0055", "round7").is_none());
}
