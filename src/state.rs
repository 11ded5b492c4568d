use std::sync::Arc;

use serde::Serialize;

use crate::chart::{pie_chart, scatter_chart, PieChart, ScatterChart};
use crate::data::model::{LaunchDataset, PayloadRange, SiteFilter, ALL_SITES};

// ---------------------------------------------------------------------------
// Widget configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDropdown {
    /// `All Sites` followed by every site in first-occurrence order.
    pub options: Vec<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: [f64; 2],
}

/// Initial widget setup derived from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardControls {
    pub site_dropdown: SiteDropdown,
    pub payload_slider: PayloadSlider,
}

impl DashboardControls {
    pub fn new(dataset: &LaunchDataset, slider_step: f64) -> Self {
        let options = std::iter::once(ALL_SITES.to_string())
            .chain(dataset.distinct_sites().iter().cloned())
            .collect();

        Self {
            site_dropdown: SiteDropdown {
                options,
                value: ALL_SITES.to_string(),
            },
            payload_slider: PayloadSlider {
                min: dataset.min_payload(),
                max: dataset.max_payload(),
                step: slider_step,
                value: [dataset.min_payload(), dataset.max_payload()],
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Current selection plus the figures derived from it, independent of
/// rendering. The dataset itself is shared read-only.
pub struct DashboardState {
    dataset: Arc<LaunchDataset>,
    site: SiteFilter,
    payload_range: PayloadRange,
    pie: PieChart,
    scatter: ScatterChart,
}

impl DashboardState {
    /// Start at `All Sites` over the full payload domain.
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let site = SiteFilter::AllSites;
        let payload_range = dataset.payload_domain();
        let pie = pie_chart(&dataset, &site);
        let scatter = scatter_chart(&dataset, &site, payload_range);
        Self {
            dataset,
            site,
            payload_range,
            pie,
            scatter,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn site(&self) -> &SiteFilter {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn pie(&self) -> &PieChart {
        &self.pie
    }

    pub fn scatter(&self) -> &ScatterChart {
        &self.scatter
    }

    /// Change the site selection. Both charts depend on it.
    pub fn select_site(&mut self, site: SiteFilter) {
        if site == self.site {
            return;
        }
        self.site = site;
        self.pie = pie_chart(&self.dataset, &self.site);
        self.rescatter();
    }

    /// Change the payload range. Only the scatter chart depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.rescatter();
    }

    fn rescatter(&mut self) {
        self.scatter = scatter_chart(&self.dataset, &self.site, self.payload_range);
    }
}
