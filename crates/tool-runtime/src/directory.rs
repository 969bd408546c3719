//! Curated directory of the published ARTPARK datasets.
//!
//! The directory doubles as the allow-list checked at the tool boundary:
//! dataset ids outside it are rejected before the data layer is touched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Human-readable description of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub name: String,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    pub use_for: String,
}

/// Known datasets keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetDirectory {
    datasets: BTreeMap<String, DatasetProfile>,
}

impl DatasetDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, profile: DatasetProfile) {
        self.datasets.insert(id.into(), profile);
    }

    /// The eight public ARTPARK datasets.
    pub fn artpark() -> Self {
        let mut directory = Self::new();
        for (id, name, category, description, tags, use_for) in ARTPARK_DATASETS {
            directory.insert(
                *id,
                DatasetProfile {
                    name: name.to_string(),
                    category: category.to_string(),
                    description: description.to_string(),
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                    use_for: use_for.to_string(),
                },
            );
        }
        directory
    }

    pub fn is_known(&self, dataset_id: &str) -> bool {
        self.datasets.contains_key(dataset_id)
    }

    pub fn get(&self, dataset_id: &str) -> Option<&DatasetProfile> {
        self.datasets.get(dataset_id)
    }

    /// Dataset ids in sorted order.
    pub fn ids(&self) -> Vec<String> {
        self.datasets.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DatasetProfile)> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Category -> dataset ids.
    pub fn categories(&self) -> BTreeMap<String, Vec<String>> {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (id, profile) in &self.datasets {
            categories
                .entry(profile.category.clone())
                .or_default()
                .push(id.clone());
        }
        categories
    }

    /// Payload returned when a dataset id is not in the directory.
    pub fn unknown_dataset(&self, dataset_id: &str) -> Value {
        json!({
            "error": format!("Unknown dataset: {}", dataset_id),
            "valid_datasets": self.ids(),
        })
    }
}

type DatasetRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static str,
);

const ARTPARK_DATASETS: &[DatasetRow] = &[
    (
        "0015",
        "Karnataka Dengue Daily Summary (2017-2024)",
        "Epidemiology",
        "Day-wise summaries of tests, suspected cases, confirmed cases and deaths by district in Karnataka.",
        &["Dengue"],
        "Dengue case counts, test positivity, death tracking, district-level outbreak analysis in Karnataka",
    ),
    (
        "0034",
        "Local Government Directory (LGD) Region IDs",
        "Geospatial",
        "Local Government Directory names and codes for all India - states, districts, subdistricts, villages, ULBs.",
        &[],
        "Mapping region IDs and names, administrative hierarchy lookups, geocoding",
    ),
    (
        "0041",
        "20th Livestock Census (2019)",
        "Census and Surveys",
        "District, Village and Ward-wise livestock population for Karnataka and Maharashtra, plus all-India district-level data.",
        &["Livestock"],
        "Livestock population by species (cattle, buffalo, sheep, goat, pig, poultry) at district/village level",
    ),
    (
        "0055",
        "FMD - NADCP Vaccination Progress (Rounds 1-6)",
        "Epidemiology",
        "District-level daily vaccination and tagging progress reports for FMD vaccination rounds in Karnataka.",
        &["Foot and Mouth Disease", "Livestock"],
        "FMD vaccination coverage, daily progress tracking, farmer coverage, tagging stats",
    ),
    (
        "0059",
        "FMD - NADCP Vaccination Schedule (Rounds 3-6)",
        "Epidemiology",
        "Village-level scheduled vaccination dates for cattle/buffalo and sheep/goat in Karnataka.",
        &["Foot and Mouth Disease", "Livestock"],
        "Vaccination scheduling, village-level planning, cattle/buffalo/sheep/goat targets",
    ),
    (
        "0086",
        "FMD Nationwide Vaccination Data",
        "Epidemiology",
        "State and district-wise FMD vaccination counts and farmer beneficiary data from NDLM.",
        &["Foot and Mouth Disease", "Livestock"],
        "National FMD vaccination coverage, state-wise comparisons, farmer reach",
    ),
    (
        "0087",
        "FMD Nationwide Seromonitoring Data",
        "Epidemiology",
        "All India state-level seromonitoring summaries showing pre/post vaccination antibody levels for FMD virus types A, O, Asia1.",
        &["Foot and Mouth Disease"],
        "Vaccine efficacy assessment, seroconversion rates, FMD serotype tracking",
    ),
    (
        "0089",
        "FMD Nationwide Serosurveillance Data",
        "Epidemiology",
        "All India state-level serosurveillance summaries for FMD showing cattle/buffalo seroprevalence.",
        &["Foot and Mouth Disease", "Livestock"],
        "FMD seroprevalence, cattle vs buffalo positivity, herd immunity assessment",
    ),
];
