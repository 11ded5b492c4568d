use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchDataset, OutcomeClass, SiteFilter};

/// One pie-chart slice: a label and how many launches fall under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    pub label: String,
    pub count: usize,
}

impl OutcomeCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Success breakdown for the pie chart.
///
/// * [`SiteFilter::AllSites`] – successful launches counted per site. A site
///   without any success is left out entirely rather than reported as zero.
/// * [`SiteFilter::Site`] – that site's launches counted per outcome
///   (`Failure`, `Success`). Only outcomes that occur are reported.
///
/// Groups come out in key order: site names ascending, `Failure` before
/// `Success`. An unknown site yields an empty result.
pub fn aggregate_outcomes(dataset: &LaunchDataset, site: &SiteFilter) -> Vec<OutcomeCount> {
    let result = match site {
        SiteFilter::AllSites => successes_by_site(dataset),
        SiteFilter::Site(name) => {
            if !dataset.contains_site(name) {
                log::warn!("Unknown launch site '{name}'; no outcomes to aggregate");
                return Vec::new();
            }
            outcomes_for_site(dataset, name)
        }
    };

    log::debug!("Aggregated {} outcome groups for {site}", result.len());
    result
}

fn successes_by_site(dataset: &LaunchDataset) -> Vec<OutcomeCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in dataset.records().iter().filter(|r| r.outcome.is_success()) {
        *counts.entry(rec.launch_site.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(site, count)| OutcomeCount::new(site, count))
        .collect()
}

fn outcomes_for_site(dataset: &LaunchDataset, site: &str) -> Vec<OutcomeCount> {
    let mut counts: BTreeMap<OutcomeClass, usize> = BTreeMap::new();
    for rec in dataset.records().iter().filter(|r| r.launch_site == site) {
        *counts.entry(rec.outcome).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(outcome, count)| OutcomeCount::new(outcome.label(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("KSC", 800.0, OutcomeClass::Success),
            LaunchRecord::new("CCAFS", 500.0, OutcomeClass::Success),
            LaunchRecord::new("CCAFS", 1500.0, OutcomeClass::Failure),
            LaunchRecord::new("VAFB", 9600.0, OutcomeClass::Failure),
        ])
        .unwrap()
    }

    #[test]
    fn all_sites_counts_successes_only() {
        let got = aggregate_outcomes(&dataset(), &SiteFilter::AllSites);
        assert_eq!(
            got,
            vec![OutcomeCount::new("CCAFS", 1), OutcomeCount::new("KSC", 1)]
        );
        // VAFB has no success and must not show up as a zero slice
        assert!(got.iter().all(|c| c.label != "VAFB"));
    }

    #[test]
    fn single_site_splits_by_outcome() {
        let got = aggregate_outcomes(&dataset(), &SiteFilter::Site("CCAFS".into()));
        assert_eq!(
            got,
            vec![OutcomeCount::new("Failure", 1), OutcomeCount::new("Success", 1)]
        );
    }

    #[test]
    fn missing_outcome_is_not_synthesized() {
        let got = aggregate_outcomes(&dataset(), &SiteFilter::Site("VAFB".into()));
        assert_eq!(got, vec![OutcomeCount::new("Failure", 1)]);
    }

    #[test]
    fn unknown_site_is_empty() {
        let got = aggregate_outcomes(&dataset(), &SiteFilter::Site("Boca Chica".into()));
        assert!(got.is_empty());
    }
}
