//! Properties of the pie-chart aggregation and the payload filter over
//! arbitrary datasets.

use proptest::prelude::*;

use launch_dash::{
    aggregate_outcomes, filter_by_payload, LaunchDataset, LaunchRecord, OutcomeClass,
    OutcomeCount, PayloadPoint, PayloadRange, SiteFilter,
};

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

fn record() -> impl Strategy<Value = LaunchRecord> {
    (0..SITES.len(), 0.0..16_000.0f64, any::<bool>()).prop_map(|(site, payload, ok)| {
        let outcome = if ok {
            OutcomeClass::Success
        } else {
            OutcomeClass::Failure
        };
        LaunchRecord::new(SITES[site], payload.round(), outcome)
    })
}

fn dataset() -> impl Strategy<Value = LaunchDataset> {
    prop::collection::vec(record(), 1..60)
        .prop_map(|records| LaunchDataset::from_records(records).unwrap())
}

fn site_filter() -> impl Strategy<Value = SiteFilter> {
    prop_oneof![
        Just(SiteFilter::AllSites),
        (0..SITES.len()).prop_map(|i| SiteFilter::Site(SITES[i].to_string())),
    ]
}

fn example() -> LaunchDataset {
    LaunchDataset::from_records(vec![
        LaunchRecord::new("CCAFS", 500.0, OutcomeClass::Success),
        LaunchRecord::new("CCAFS", 1500.0, OutcomeClass::Failure),
        LaunchRecord::new("KSC", 800.0, OutcomeClass::Success),
    ])
    .unwrap()
}

#[test]
fn three_launch_example() {
    let ds = example();

    assert_eq!(
        aggregate_outcomes(&ds, &SiteFilter::AllSites),
        vec![OutcomeCount::new("CCAFS", 1), OutcomeCount::new("KSC", 1)]
    );

    let mut ccafs = aggregate_outcomes(&ds, &SiteFilter::Site("CCAFS".into()));
    ccafs.sort_by(|a, b| a.label.cmp(&b.label));
    assert_eq!(
        ccafs,
        vec![OutcomeCount::new("Failure", 1), OutcomeCount::new("Success", 1)]
    );

    assert_eq!(
        filter_by_payload(&ds, &SiteFilter::AllSites, PayloadRange::new(0.0, 1000.0)),
        vec![
            PayloadPoint {
                payload_mass_kg: 500.0,
                outcome: OutcomeClass::Success
            },
            PayloadPoint {
                payload_mass_kg: 800.0,
                outcome: OutcomeClass::Success
            },
        ]
    );
}

proptest! {
    #[test]
    fn site_counts_match_records(ds in dataset(), site in 0..SITES.len()) {
        let name = SITES[site];
        let result = aggregate_outcomes(&ds, &SiteFilter::Site(name.to_string()));
        let subset: Vec<&LaunchRecord> =
            ds.records().iter().filter(|r| r.launch_site == name).collect();

        for c in &result {
            let expected = subset.iter().filter(|r| r.outcome.label() == c.label).count();
            prop_assert_eq!(c.count, expected);
            prop_assert!(c.count > 0);
        }
        let total: usize = result.iter().map(|c| c.count).sum();
        prop_assert_eq!(total, subset.len());
    }

    #[test]
    fn all_sites_counts_sum_to_successes(ds in dataset()) {
        let result = aggregate_outcomes(&ds, &SiteFilter::AllSites);
        let successes = ds.records().iter().filter(|r| r.outcome.is_success()).count();
        let total: usize = result.iter().map(|c| c.count).sum();
        prop_assert_eq!(total, successes);
        prop_assert!(result.iter().all(|c| c.count > 0));
    }

    #[test]
    fn filter_is_exact_and_ordered(
        ds in dataset(),
        site in site_filter(),
        a in 0.0..16_000.0f64,
        b in 0.0..16_000.0f64,
    ) {
        let range = PayloadRange::new(a.min(b), a.max(b));
        let got = filter_by_payload(&ds, &site, range);
        let expected: Vec<PayloadPoint> = ds
            .records()
            .iter()
            .filter(|r| site.matches(r) && range.low <= r.payload_mass_kg && r.payload_mass_kg <= range.high)
            .map(|r| PayloadPoint { payload_mass_kg: r.payload_mass_kg, outcome: r.outcome })
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn widening_never_drops_points(
        ds in dataset(),
        site in site_filter(),
        low in 0.0..8_000.0f64,
        width in 0.0..8_000.0f64,
        extra in 0.0..4_000.0f64,
    ) {
        let narrow = filter_by_payload(&ds, &site, PayloadRange::new(low, low + width));
        let wide = filter_by_payload(&ds, &site, PayloadRange::new(low - extra, low + width + extra));
        for p in &narrow {
            prop_assert!(wide.contains(p));
        }
        prop_assert!(wide.len() >= narrow.len());
    }

    #[test]
    fn full_domain_keeps_the_site_subset(ds in dataset(), site in site_filter()) {
        let got = filter_by_payload(&ds, &site, ds.payload_domain());
        let expected = ds.records().iter().filter(|r| site.matches(r)).count();
        prop_assert_eq!(got.len(), expected);
    }

    #[test]
    fn queries_are_repeatable(ds in dataset(), site in site_filter(), a in 0.0..16_000.0f64) {
        let range = PayloadRange::new(a, 16_000.0);
        prop_assert_eq!(aggregate_outcomes(&ds, &site), aggregate_outcomes(&ds, &site));
        prop_assert_eq!(
            filter_by_payload(&ds, &site, range),
            filter_by_payload(&ds, &site, range)
        );
    }
}
