use serde::Serialize;

use super::model::{LaunchDataset, LaunchRecord, OutcomeClass, PayloadRange, SiteFilter};

/// One scatter-chart point: payload mass against the launch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadPoint {
    pub payload_mass_kg: f64,
    /// Serialized as its label (`"Failure"` / `"Success"`).
    pub outcome: OutcomeClass,
}

/// Records that pass the site filter, in dataset order.
///
/// An unknown site matches nothing.
pub fn site_records<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteFilter,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |r| site.matches(r))
}

/// Payload/outcome pairs for the scatter chart.
///
/// Keeps the records of the selected site (all records for
/// [`SiteFilter::AllSites`]) whose payload lies in the closed `range`, in
/// their original order. No bound is clamped: an inverted range or a NaN
/// bound selects nothing, a range wider than the data selects everything.
pub fn filter_by_payload(
    dataset: &LaunchDataset,
    site: &SiteFilter,
    range: PayloadRange,
) -> Vec<PayloadPoint> {
    if let SiteFilter::Site(name) = site {
        if !dataset.contains_site(name) {
            log::warn!("Unknown launch site '{name}'; payload filter is empty");
            return Vec::new();
        }
    }
    if range.is_inverted() {
        log::debug!("Inverted payload range {}..={}", range.low, range.high);
    }

    let points: Vec<PayloadPoint> = site_records(dataset, site)
        .filter(|r| range.contains(r.payload_mass_kg))
        .map(|r| PayloadPoint {
            payload_mass_kg: r.payload_mass_kg,
            outcome: r.outcome,
        })
        .collect();

    log::debug!(
        "{} of {} launches in {}..={} kg for {site}",
        points.len(),
        dataset.len(),
        range.low,
        range.high
    );
    points
}
