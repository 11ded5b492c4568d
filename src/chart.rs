use serde::Serialize;

use crate::color::ColorMap;
use crate::data::aggregate::aggregate_outcomes;
use crate::data::filter::filter_by_payload;
use crate::data::loader::{CLASS_COLUMN, PAYLOAD_COLUMN};
use crate::data::model::{LaunchDataset, OutcomeClass, PayloadRange, SiteFilter};

// ---------------------------------------------------------------------------
// Figure specs handed to the renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub color: String,
}

/// Success-distribution pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
    /// `(label, colour)` for every label the chart can colour.
    pub legend: Vec<(String, String)>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: OutcomeClass,
    pub color: String,
}

/// Payload vs outcome scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    pub legend: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the pie chart for the current site selection.
///
/// Site slices are coloured over the full site list, so a site keeps its
/// colour whatever subset of sites has successes.
pub fn pie_chart(dataset: &LaunchDataset, site: &SiteFilter) -> PieChart {
    let (title, colors) = match site {
        SiteFilter::AllSites => (
            "Total Success Launches By Site".to_string(),
            ColorMap::new(dataset.distinct_sites().iter().cloned()),
        ),
        SiteFilter::Site(name) => (
            format!("Total Success vs Failed Launches for site {name}"),
            ColorMap::outcomes(),
        ),
    };

    let slices = aggregate_outcomes(dataset, site)
        .into_iter()
        .map(|c| PieSlice {
            color: colors.color_for(&c.label).to_string(),
            label: c.label,
            count: c.count,
        })
        .collect();

    PieChart {
        title,
        slices,
        legend: colors.legend_entries(),
    }
}

/// Build the scatter chart for the current site and payload range.
pub fn scatter_chart(dataset: &LaunchDataset, site: &SiteFilter, range: PayloadRange) -> ScatterChart {
    let colors = ColorMap::outcomes();
    let points = filter_by_payload(dataset, site, range)
        .into_iter()
        .map(|p| ScatterPoint {
            x: p.payload_mass_kg,
            y: p.outcome,
            color: colors.color_for(p.outcome.label()).to_string(),
        })
        .collect();

    ScatterChart {
        title: format!("Correlation between Payload and Success for site: {site}"),
        x_label: PAYLOAD_COLUMN.to_string(),
        y_label: CLASS_COLUMN.to_string(),
        points,
        legend: colors.legend_entries(),
    }
}
