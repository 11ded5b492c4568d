use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::DataLoadError;

/// Dropdown sentinel meaning "no site restriction".
pub const ALL_SITES: &str = "All Sites";

// ---------------------------------------------------------------------------
// OutcomeClass – binary launch result
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column: 0 = failure, 1 = success.
///
/// Variant order matters: `Failure < Success`, which is the order grouped
/// results come out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    /// Interpret a raw `class` value. Only 0 and 1 are valid.
    pub fn from_class(value: i64) -> Option<Self> {
        match value {
            0 => Some(OutcomeClass::Failure),
            1 => Some(OutcomeClass::Success),
            _ => None,
        }
    }

    /// Like [`OutcomeClass::from_class`] but for float-typed columns
    /// (`1.0` is accepted, `0.5` is not).
    pub fn from_f64(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(OutcomeClass::Failure)
        } else if value == 1.0 {
            Some(OutcomeClass::Success)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutcomeClass::Failure => "Failure",
            OutcomeClass::Success => "Success",
        }
    }

    pub fn is_success(self) -> bool {
        self == OutcomeClass::Success
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for OutcomeClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Value of the `Launch Site` column.
    pub launch_site: String,
    /// Value of the `Payload Mass (kg)` column. Finite and non-negative.
    pub payload_mass_kg: f64,
    /// Value of the `class` column.
    pub outcome: OutcomeClass,
}

impl LaunchRecord {
    pub fn new(launch_site: impl Into<String>, payload_mass_kg: f64, outcome: OutcomeClass) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// SiteFilter / PayloadRange – the two widget inputs
// ---------------------------------------------------------------------------

/// Site selection coming from the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    AllSites,
    Site(String),
}

impl SiteFilter {
    /// Parse the raw dropdown value. [`ALL_SITES`] is the sentinel; anything
    /// else names one site.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteFilter::AllSites
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    /// Whether `record` passes this filter.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::AllSites => true,
            SiteFilter::Site(site) => record.launch_site == *site,
        }
    }

    /// Dropdown text for this selection.
    pub fn as_str(&self) -> &str {
        match self {
            SiteFilter::AllSites => ALL_SITES,
            SiteFilter::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed payload interval `[low, high]` from the range slider.
///
/// Nothing is validated here: an inverted range simply matches no record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive on both ends. Always false when either bound is NaN.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        Self::new(low, high)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed payload bounds and site index.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Unique sites in first-occurrence order.
    sites: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Build the dataset and its indices. Fails on an empty record list since
    /// the payload bounds would be undefined.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut sites = Vec::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            if seen.insert(rec.launch_site.as_str()) {
                sites.push(rec.launch_site.clone());
            }
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
        }

        Ok(LaunchDataset {
            records,
            sites,
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Smallest payload mass over the whole dataset.
    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    /// Largest payload mass over the whole dataset.
    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// `[min_payload, max_payload]`, the slider's full domain.
    pub fn payload_domain(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload, self.max_payload)
    }

    /// Unique launch sites in first-occurrence order.
    pub fn distinct_sites(&self) -> &[String] {
        &self.sites
    }

    pub fn contains_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a dataset built through [`LaunchDataset::from_records`].
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
