//! Data behind the SpaceX launch records dashboard.
//!
//! Load the launch table once with [`data::loader::load_file`], then answer
//! widget changes with [`data::aggregate::aggregate_outcomes`] (pie chart) and
//! [`data::filter::filter_by_payload`] (scatter chart). Both are pure
//! functions of the dataset and the current selection. [`app::DashboardApp`]
//! wires them to a line-oriented JSON event stream.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;

pub use data::aggregate::{aggregate_outcomes, OutcomeCount};
pub use data::filter::{filter_by_payload, PayloadPoint};
pub use data::model::{LaunchDataset, LaunchRecord, OutcomeClass, PayloadRange, SiteFilter, ALL_SITES};
pub use error::DataLoadError;
