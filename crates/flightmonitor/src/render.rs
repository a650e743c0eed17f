//! Terminal presentation of readings.
//!
//! Renders the text view, the history table, and an ASCII version of the
//! visual instruments (attitude disc, compass needle, altitude gauge).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::projector::{project, VisualParams};
use crate::reading::{Field, Reading, ALTITUDE_MAX};

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Altitude scale labels drawn beside the gauge.
const GAUGE_LABELS: [u16; 4] = [3000, 2000, 1000, 0];

const NO_READINGS: &str = "No readings recorded.";

/// Which presentation to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Numeric values, one per line.
    #[default]
    Text,
    /// Instrument drawing.
    Visual,
    /// Full history table.
    Table,
    /// Show nothing.
    None,
}

/// Renders readings for a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    gauge_height: usize,
    newest_first: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl Renderer {
    /// Build a renderer from display settings.
    #[must_use]
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self {
            gauge_height: display.gauge_height.max(2),
            newest_first: display.newest_first,
        }
    }

    /// Override history ordering.
    #[must_use]
    pub fn newest_first(mut self, newest_first: bool) -> Self {
        self.newest_first = newest_first;
        self
    }

    /// Render a view.
    ///
    /// `current` is the reading shown by the text and visual views; the
    /// table view shows all of `history`.
    #[must_use]
    pub fn render(&self, view: View, history: &[Reading], current: Option<&Reading>) -> String {
        match view {
            View::Text => current.map_or_else(|| NO_READINGS.to_string(), |r| self.text(r)),
            View::Visual => current.map_or_else(|| NO_READINGS.to_string(), |r| self.visual(r)),
            View::Table => self.table(history),
            View::None => String::new(),
        }
    }

    /// Plain numeric view.
    #[must_use]
    pub fn text(&self, reading: &Reading) -> String {
        Field::ALL
            .iter()
            .map(|&field| format!("{}: {}", field.label(), reading.value(field)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// History table, ordered per the renderer's setting.
    #[must_use]
    pub fn table(&self, history: &[Reading]) -> String {
        if history.is_empty() {
            return NO_READINGS.to_string();
        }

        let mut lines = vec![
            format!("{:>6}  {:>8}  {:>4}  {:>4}", "#", "Altitude", "HIS", "ADI"),
            format!("{:->6}  {:->8}  {:->4}  {:->4}", "", "", "", ""),
        ];
        let rows: Box<dyn Iterator<Item = &Reading>> = if self.newest_first {
            Box::new(history.iter().rev())
        } else {
            Box::new(history.iter())
        };
        lines.extend(rows.map(|r| {
            format!(
                "{:>6}  {:>8}  {:>4}  {:>4}",
                r.sequence(),
                r.altitude(),
                r.heading(),
                r.attitude()
            )
        }));
        lines.join("\n")
    }

    /// ASCII instrument panel.
    #[must_use]
    pub fn visual(&self, reading: &Reading) -> String {
        let params = project(reading);
        let mut lines = vec![
            format!(
                "ADI  ({}) {} [{}]",
                params.attitude_class.color_name(),
                params.attitude_class,
                reading.attitude()
            ),
            format!(
                "HIS  {:03.0}\u{b0} {}",
                params.heading_angle_deg,
                compass_point(params.heading_angle_deg)
            ),
            "ALT".to_string(),
        ];
        lines.extend(self.gauge(&params, reading.altitude()));
        lines.join("\n")
    }

    fn gauge(&self, params: &VisualParams, altitude: u16) -> Vec<String> {
        let span = self.gauge_height - 1;
        let arrow = to_row(params.arrow_offset(to_span(span)));

        (0..self.gauge_height)
            .map(|row| {
                let label = GAUGE_LABELS
                    .iter()
                    .find(|&&value| label_row(value, span) == row)
                    .map_or_else(String::new, ToString::to_string);
                let fill = if row >= arrow { "####" } else { "    " };
                let marker = if row == arrow {
                    format!(" <- {altitude}")
                } else {
                    String::new()
                };
                format!("{label:>5} |{fill}|{marker}")
            })
            .collect()
    }
}

/// Nearest 8-point compass label for an angle in degrees.
#[must_use]
pub fn compass_point(angle_deg: f64) -> &'static str {
    let sector = to_row(angle_deg.rem_euclid(360.0) / 45.0) % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

fn label_row(value: u16, span: usize) -> usize {
    let fraction = f64::from(value) / f64::from(ALTITUDE_MAX);
    to_row(to_span(span) * (1.0 - fraction))
}

#[allow(clippy::cast_precision_loss)]
fn to_span(rows: usize) -> f64 {
    rows as f64
}

// Inputs are finite and non-negative.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_row(offset: f64) -> usize {
    offset.round() as usize
}
