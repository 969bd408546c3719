use std::path::Path;

use tempfile::TempDir;

use artpark_catalog::DataStore;

pub const SERO_ROWS: usize = 238;
pub const KARNATAKA_ROWS: usize = 16;
pub const TAMIL_NADU_ROWS: usize = 8;
pub const STATE_COUNT: usize = 35;

pub const NUMERIC_COLUMNS: [&str; 11] = [
    "pre.O",
    "pre.A",
    "pre.Asia1",
    "post.O",
    "post.A",
    "post.Asia1",
    "n.samples",
    "n.villages",
    "n.districts",
    "pct.protected",
    "cost",
];

pub fn write(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, body).unwrap();
}

fn state_for_row(i: usize) -> String {
    if i < KARNATAKA_ROWS {
        "KARNATAKA".to_string()
    } else if i < KARNATAKA_ROWS + TAMIL_NADU_ROWS {
        "TAMIL NADU".to_string()
    } else {
        format!("STATE {:02}", (i - KARNATAKA_ROWS - TAMIL_NADU_ROWS) % (STATE_COUNT - 2))
    }
}

/// Seromonitoring table: one text column with 51 distinct values and
/// eleven numeric columns.
fn seromonitoring_csv() -> String {
    let mut header = vec!["state.name", "lab_code", "year", "round"];
    header.extend(NUMERIC_COLUMNS);
    let mut body = header.join(",");
    body.push('\n');

    for i in 0..SERO_ROWS {
        let mut row = vec![
            state_for_row(i),
            format!("LAB-{:03}", i % 51),
            (2019 + i % 4).to_string(),
            (1 + i % 6).to_string(),
        ];
        for (k, _) in NUMERIC_COLUMNS.iter().enumerate() {
            row.push(format!("{}.5", (i + k) % 100));
        }
        body.push_str(&row.join(","));
        body.push('\n');
    }
    body
}

const SERO_METADATA: &str = r#"
tables:
  seromonitoring:
    info:
      about: FMD seromonitoring results by state and round
      source: NADCP
      comments: Antibody titres before and after vaccination
    data_dictionary:
      state.name: State
      lab_code: Testing laboratory
      year: Survey year
      round: Vaccination round
"#;

const VILLAGE_TOP_METADATA: &str = r#"
tables:
  villages:
    info:
      about: Village population
"#;

const VILLAGE_SUB_METADATA: &str = r#"
tables:
  villages:
    info:
      about: Village population (census extract)
    data_dictionary:
      village: Village name
      population: Headcount
"#;

/// Build the test corpus:
///
/// - `0034`: metadata + `seromonitoring.csv`
/// - `0055`: `round1.csv`..`round6.csv`, no metadata
/// - `0059`: top-level and `census/` metadata, CSV only under `census/`
/// - `0087`: unparseable metadata + two CSVs
pub fn build_corpus() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let data = root.path();

    write(&data.join("0034").join("metadata.yaml"), SERO_METADATA);
    write(&data.join("0034").join("seromonitoring.csv"), &seromonitoring_csv());

    for r in 1..=6 {
        let mut body = String::from("district,vaccinated\n");
        for d in 0..r {
            body.push_str(&format!("D{},{}\n", d, d * 100));
        }
        write(&data.join("0055").join(format!("round{}.csv", r)), &body);
    }

    write(&data.join("0059").join("metadata.yaml"), VILLAGE_TOP_METADATA);
    write(&data.join("0059").join("census").join("metadata.yaml"), VILLAGE_SUB_METADATA);
    write(
        &data.join("0059").join("census").join("villages.csv"),
        "village,population\nHosur,1200\nKolar,800\n",
    );

    write(&data.join("0087").join("metadata.yaml"), "tables:\n  weather: {unclosed\n");
    write(
        &data.join("0087").join("ka-weather-daily.csv"),
        "date,district,rain_mm\n2024-06-01,Udupi,31.2\n2024-06-01,Mysuru,4.0\n",
    );
    write(&data.join("0087").join("stations.csv"), "station_id,name\n1,Udupi\n2,Mysuru\n");

    root
}

pub fn store(root: &TempDir) -> DataStore {
    DataStore::new(root.path())
}
