use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chart::{PieChart, ScatterChart};
use crate::data::model::{LaunchDataset, PayloadRange, SiteFilter};
use crate::error::EventError;
use crate::state::{DashboardControls, DashboardState};

// ---------------------------------------------------------------------------
// Wire types: one JSON object per line in each direction
// ---------------------------------------------------------------------------

/// A widget change coming from the UI. Omitted fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEvent {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub payload_range: Option<[f64; 2]>,
}

impl UpdateEvent {
    pub fn parse(line: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(line)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Figures<'a> {
    pub site: &'a str,
    pub payload_range: PayloadRange,
    pub pie: &'a PieChart,
    pub scatter: &'a ScatterChart,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message<'a> {
    Controls(&'a DashboardControls),
    Figures(Figures<'a>),
    Error { message: String },
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drives [`DashboardState`] from UI update events.
pub struct DashboardApp {
    pub state: DashboardState,
    pub controls: DashboardControls,
}

impl DashboardApp {
    pub fn new(dataset: Arc<LaunchDataset>, slider_step: f64) -> Self {
        let controls = DashboardControls::new(&dataset, slider_step);
        Self {
            state: DashboardState::new(dataset),
            controls,
        }
    }

    /// Apply one widget change.
    pub fn apply(&mut self, event: UpdateEvent) {
        if let Some(site) = event.site {
            self.state.select_site(SiteFilter::parse(&site));
        }
        if let Some(range) = event.payload_range {
            self.state.set_payload_range(PayloadRange::from(range));
        }
    }

    pub fn figures(&self) -> Figures<'_> {
        Figures {
            site: self.state.site().as_str(),
            payload_range: self.state.payload_range(),
            pie: self.state.pie(),
            scatter: self.state.scatter(),
        }
    }

    /// Serve a session: emit the controls and initial figures, then one
    /// figures message per event line until end of input. Malformed lines are
    /// answered with an error message and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        write_message(&mut output, &Message::Controls(&self.controls))?;
        write_message(&mut output, &Message::Figures(self.figures()))?;

        for (line_no, line) in input.lines().enumerate() {
            let line = line.context("reading update event")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match UpdateEvent::parse(line) {
                Ok(event) => {
                    self.apply(event);
                    write_message(&mut output, &Message::Figures(self.figures()))?;
                }
                Err(e) => {
                    log::warn!("Skipping event on line {}: {e}", line_no + 1);
                    let msg = Message::Error {
                        message: e.to_string(),
                    };
                    write_message(&mut output, &msg)?;
                }
            }
        }
        Ok(())
    }
}

fn write_message<W: Write>(output: &mut W, msg: &Message<'_>) -> Result<()> {
    serde_json::to_writer(&mut *output, msg).context("encoding message")?;
    output.write_all(b"\n").context("writing message")?;
    output.flush().context("flushing output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_fields_are_optional() {
        assert_eq!(UpdateEvent::parse("{}").unwrap(), UpdateEvent::default());
        let ev = UpdateEvent::parse(r#"{"payload_range": [0, 2500.5]}"#).unwrap();
        assert_eq!(ev.payload_range, Some([0.0, 2500.5]));
        assert_eq!(ev.site, None);
    }

    #[test]
    fn malformed_events() {
        assert!(UpdateEvent::parse("not json").is_err());
        assert!(UpdateEvent::parse(r#"{"payload_range": [1]}"#).is_err());
        assert!(UpdateEvent::parse(r#"{"sites": "KSC"}"#).is_err());
    }
}
