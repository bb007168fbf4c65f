use rust_decimal::prelude::ToPrimitive;
use serde_json::{json, Value};

use crate::models::GrowthPoint;

pub const DEFAULT_TITLE: &str = "Growth Over Time";

/// Plotly figure for a growth series: a line trace and a marker trace over the same points.
pub fn growth_figure(series: &[GrowthPoint], title: &str) -> Value {
    let dates: Vec<String> = series.iter().map(|point| point.date.to_string()).collect();
    let growth: Vec<f64> = series.iter()
        .map(|point| point.growth.to_f64().unwrap_or_default())
        .collect();

    json!({
        "data": [
            { "type": "scatter", "mode": "lines", "name": "Line", "x": dates, "y": growth },
            { "type": "scatter", "mode": "markers", "name": "Scatter", "x": dates, "y": growth }
        ],
        "layout": {
            "title": { "text": title },
            "xaxis": { "title": { "text": "Date" } },
            "yaxis": { "title": { "text": "Growth" } },
            "showlegend": true
        }
    })
}
