//! Run summary formatting
//!
//! Text, JSON and CSV renderings of a triangulation run: the pairwise
//! generation counters and, when centroids were evaluated against ground
//! truth, the per-centroid error records.

use serde::{Deserialize, Serialize};

use crate::algorithms::pairwise::{GenerationResult, IntersectionMethod};
use crate::core::{Coordinate, DistanceRecord, DistanceUnit};
use crate::validation::metrics::ErrorReport;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    /// Per-centroid distance records only
    Csv,
}

/// Generation counters without the point clouds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub method: IntersectionMethod,
    pub groups_processed: usize,
    pub pairs_examined: usize,
    pub pairs_rejected: usize,
    pub pairs_failed: usize,
    pub dropped_observations: usize,
    pub intersections: usize,
    pub filtered_intersections: usize,
}

impl GenerationSummary {
    pub fn new(method: IntersectionMethod, result: &GenerationResult) -> Self {
        Self {
            method,
            groups_processed: result.groups_processed,
            pairs_examined: result.pairs_examined,
            pairs_rejected: result.pairs_rejected,
            pairs_failed: result.pairs_failed,
            dropped_observations: result.dropped_observations,
            intersections: result.all_intersections.len(),
            filtered_intersections: result.filtered_intersections.len(),
        }
    }
}

/// Everything reported for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generation: GenerationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
    pub distance_unit: DistanceUnit,
}

impl RunReport {
    pub fn new(method: IntersectionMethod, result: &GenerationResult, distance_unit: DistanceUnit) -> Self {
        Self {
            generation: GenerationSummary::new(method, result),
            error: None,
            distance_unit,
        }
    }

    pub fn with_error_report(mut self, report: ErrorReport) -> Self {
        self.error = Some(report);
        self
    }
}

fn format_coordinate(point: &Coordinate) -> String {
    format!("({:.6}, {:.6})", point.latitude, point.longitude)
}

fn format_distance(value: Option<f64>, unit: DistanceUnit) -> String {
    match value {
        Some(km) => format!("{:.3} {}", unit.from_km(km), unit.suffix()),
        None => "n/a".to_string(),
    }
}

/// Human-readable text formatter
#[derive(Debug, Default)]
pub struct TextFormatter {
    /// Single-line output
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, report: &RunReport) -> String {
        let generation = &report.generation;
        let unit = report.distance_unit;

        if self.compact {
            let mut output = format!(
                "{:?}: {} pairs, {} intersections, {} in region",
                generation.method, generation.pairs_examined, generation.intersections, generation.filtered_intersections
            );
            if let Some(error) = &report.error {
                output.push_str(&format!(
                    " | {} centroids, mean error {}",
                    error.centroid_count(),
                    format_distance(error.mean_distance_km, unit)
                ));
            }
            return output;
        }

        let mut output = String::new();
        output.push_str("Intersections:\n");
        output.push_str(&format!("  Method:     {:?}\n", generation.method));
        output.push_str(&format!("  Groups:     {}\n", generation.groups_processed));
        output.push_str(&format!("  Pairs:      {}\n", generation.pairs_examined));
        output.push_str(&format!("  Rejected:   {}\n", generation.pairs_rejected));
        if generation.pairs_failed > 0 {
            output.push_str(&format!("  Parallel:   {}\n", generation.pairs_failed));
        }
        output.push_str(&format!("  Found:      {}\n", generation.intersections));
        output.push_str(&format!("  In region:  {}\n", generation.filtered_intersections));
        if generation.dropped_observations > 0 {
            output.push_str(&format!("  Dropped:    {}\n", generation.dropped_observations));
        }

        if let Some(error) = &report.error {
            output.push_str("\nTriangulation error:\n");
            output.push_str(&format!("  Centroids:  {}\n", error.centroid_count()));
            output.push_str(&format!("  Mean:       {}\n", format_distance(error.mean_distance_km, unit)));
            output.push_str(&format!("  Min:        {}\n", format_distance(error.min_distance_km, unit)));
            output.push_str(&format!("  Max:        {}\n", format_distance(error.max_distance_km, unit)));
            output.push_str(&format!("  RMS:        {}\n", format_distance(error.rms_distance_km, unit)));

            if !error.records.is_empty() {
                output.push_str("  Matches:\n");
                for record in &error.records {
                    output.push_str(&format!(
                        "    {} -> {}: {}\n",
                        format_coordinate(&record.centroid),
                        format_coordinate(&record.emitter),
                        format_distance(Some(record.distance_km), unit)
                    ));
                }
            }
        }

        output
    }
}

/// JSON formatter
#[derive(Debug, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, report: &RunReport) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
    }
}

/// Render `report` in `format`
pub fn render(report: &RunReport, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(TextFormatter::new().format_text(report)),
        ReportFormat::Json => {
            let mut output = JsonFormatter::pretty().format_json(report)?;
            output.push('\n');
            Ok(output)
        }
        ReportFormat::Csv => {
            let records = report.error.as_ref().map(|e| e.records.as_slice()).unwrap_or(&[]);
            Ok(CsvFormatter::new().format_csv(records))
        }
    }
}

/// CSV formatter for distance records
#[derive(Debug)]
pub struct CsvFormatter {
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { include_header: true }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        "centroid_latitude,centroid_longitude,emitter_latitude,emitter_longitude,distance_km".to_string()
    }

    pub fn format_record(&self, record: &DistanceRecord) -> String {
        format!(
            "{:.8},{:.8},{:.8},{:.8},{:.6}",
            record.centroid.latitude,
            record.centroid.longitude,
            record.emitter.latitude,
            record.emitter.longitude,
            record.distance_km
        )
    }

    pub fn format_csv(&self, records: &[DistanceRecord]) -> String {
        let mut lines = Vec::with_capacity(records.len() + 1);
        if self.include_header {
            lines.push(self.header());
        }
        lines.extend(records.iter().map(|record| self.format_record(record)));
        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}
