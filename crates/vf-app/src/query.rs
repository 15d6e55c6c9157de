//! Query helpers for extracting data from simulation results.

use vf_core::format_real;
use vf_results::SimulationResult;

use crate::error::{AppError, AppResult};

/// Summary of a result's time range and components.
#[derive(Debug, Clone)]
pub struct ResultSummary {
    pub time_range: (f64, f64),
    pub sample_count: usize,
    pub component_count: usize,
    pub component_names: Vec<String>,
}

/// Get a result summary.
pub fn get_result_summary(result: &SimulationResult) -> AppResult<ResultSummary> {
    if result.time.is_empty() {
        return Err(AppError::InvalidInput("No samples in result".to_string()));
    }

    let t_min = result.time.first().copied().unwrap_or(0.0);
    let t_max = result.time.last().copied().unwrap_or(0.0);

    Ok(ResultSummary {
        time_range: (t_min, t_max),
        sample_count: result.sample_count(),
        component_count: result.components.len(),
        component_names: list_component_ids(result),
    })
}

/// List all component names in a result.
pub fn list_component_ids(result: &SimulationResult) -> Vec<String> {
    result.component_names().map(str::to_string).collect()
}

/// Extract `(time, value)` pairs for one component variable.
pub fn extract_series(
    result: &SimulationResult,
    component: &str,
    variable: &str,
) -> AppResult<Vec<(f64, f64)>> {
    let series = result
        .component(component)
        .ok_or_else(|| AppError::InvalidInput(format!("Component not found: {}", component)))?;

    let values = match variable {
        "v" | "voltage" => &series.v,
        "i" | "current" => &series.i,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unknown component variable: {}",
                variable
            )));
        }
    };

    Ok(result.time.iter().copied().zip(values.iter().copied()).collect())
}

/// Render a series as CSV with a `time_s,value` header.
pub fn series_to_csv(series: &[(f64, f64)]) -> String {
    let mut csv = String::from("time_s,value\n");
    for (t, v) in series {
        csv.push_str(&format_real(*t));
        csv.push(',');
        csv.push_str(&format_real(*v));
        csv.push('\n');
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_results::ComponentSeries;

    fn sample() -> SimulationResult {
        SimulationResult {
            time: vec![0.0, 0.005, 0.01],
            components: vec![
                (
                    "V1".to_string(),
                    ComponentSeries {
                        v: vec![5.0, 5.0, 5.0],
                        i: vec![-0.05, -0.05, -0.05],
                    },
                ),
                (
                    "R1".to_string(),
                    ComponentSeries {
                        v: vec![5.0, 5.0, 5.0],
                        i: vec![0.05, 0.05, 0.05],
                    },
                ),
            ],
        }
    }

    #[test]
    fn summary_reports_range_and_names() {
        let summary = get_result_summary(&sample()).unwrap();
        assert_eq!(summary.time_range, (0.0, 0.01));
        assert_eq!(summary.sample_count, 3);
        assert_eq!(summary.component_count, 2);
        assert_eq!(summary.component_names, vec!["V1", "R1"]);
    }

    #[test]
    fn summary_of_empty_result_fails() {
        assert!(get_result_summary(&SimulationResult::default()).is_err());
    }

    #[test]
    fn extracts_by_short_and_long_names() {
        let result = sample();
        let v = extract_series(&result, "R1", "voltage").unwrap();
        assert_eq!(v, extract_series(&result, "R1", "v").unwrap());
        assert_eq!(v[1], (0.005, 5.0));

        let i = extract_series(&result, "V1", "current").unwrap();
        assert_eq!(i[2], (0.01, -0.05));
    }

    #[test]
    fn unknown_component_or_variable_is_invalid_input() {
        let result = sample();
        assert!(matches!(
            extract_series(&result, "C9", "v"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            extract_series(&result, "R1", "power"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = series_to_csv(&[(0.0, 5.0), (0.0000001, -0.05)]);
        assert_eq!(csv, "time_s,value\n0,5\n1e-7,-0.05\n");
    }
}
