//! Inbound simulation requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vf_graph::Graph;

use crate::error::{AppError, AppResult};

/// Simulated seconds when the caller leaves the duration unset.
pub const DEFAULT_DURATION_S: f64 = 0.01;

/// The body a front end posts: `{"graphData": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPayload {
    pub graph_data: GraphData,
}

/// Graph plus the optional simulation time, as drawn in the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    #[serde(flatten)]
    pub graph: Graph,
    /// Kept loose: editors send numbers, numeric strings, `null` or nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_time: Option<Value>,
}

/// One simulation to run on behalf of `identity`.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    pub graph: Graph,
    /// `None` means "use the configured default".
    pub duration_s: Option<f64>,
    pub identity: String,
}

impl SimulationRequest {
    /// Build a request, checking the duration. A zero duration counts as
    /// unset.
    pub fn new(graph: Graph, duration_s: Option<f64>, identity: impl Into<String>) -> AppResult<Self> {
        let duration_s = match duration_s {
            None => None,
            Some(d) if d == 0.0 => None,
            Some(d) if !d.is_finite() => {
                return Err(AppError::InvalidInput(format!(
                    "Simulation time must be a finite number, got {}",
                    d
                )));
            }
            Some(d) if d < 0.0 => {
                return Err(AppError::InvalidInput(format!(
                    "Simulation time must be positive, got {}",
                    d
                )));
            }
            Some(d) => Some(d),
        };
        Ok(Self {
            graph,
            duration_s,
            identity: identity.into(),
        })
    }

    pub fn from_payload(payload: SimulationPayload, identity: impl Into<String>) -> AppResult<Self> {
        let GraphData {
            graph,
            simulation_time,
        } = payload.graph_data;
        let duration_s = simulation_time_seconds(simulation_time.as_ref())?;
        Self::new(graph, duration_s, identity)
    }

    /// Parse a JSON request body.
    pub fn from_json(body: &str, identity: impl Into<String>) -> AppResult<Self> {
        let payload: SimulationPayload = serde_json::from_str(body)
            .map_err(|e| AppError::InvalidInput(format!("Malformed request body: {}", e)))?;
        Self::from_payload(payload, identity)
    }

    pub fn duration_or(&self, default_s: f64) -> f64 {
        self.duration_s.unwrap_or(default_s)
    }
}

/// Read `simulationTime`. Falsy values (`null`, `false`, `0`, `""`) mean
/// unset; numeric strings are accepted.
fn simulation_time_seconds(value: Option<&Value>) -> AppResult<Option<f64>> {
    let invalid = |v: &Value| AppError::InvalidInput(format!("Invalid simulation time: {}", v));
    let Some(value) = value else {
        return Ok(None);
    };
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| invalid(value)),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => s.trim().parse::<f64>().map(Some).map_err(|_| invalid(value)),
        _ => Err(invalid(value)),
    }
}
