//! Project report generation.
//!
//! Layout and map capture belong to a [`ReportRenderer`]; this module only
//! prepares the structured input: project metadata, aggregate statistics
//! and one detail entry per zone.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::format::error::FormatError;
use crate::measurement::MeasurementSummary;
use crate::model::{Coordinate, Project, ProjectStatus, ShapeId, ZoneData, ZoneType};

/// Everything a renderer needs to produce a report.
#[derive(Debug, Clone)]
pub struct ReportInput {
    /// Project name
    pub name: String,
    /// Project description
    pub description: String,
    /// Researcher attribution
    pub researcher: String,
    /// Lifecycle status
    pub status: ProjectStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub modified_at: DateTime<Utc>,
    /// Aggregate numbers
    pub statistics: ReportStatistics,
    /// One entry per shape, in store order
    pub zones: Vec<ZoneDetail>,
    /// When this input was assembled
    pub generated_at: DateTime<Utc>,
}

/// Aggregate statistics over all shapes.
#[derive(Debug, Clone, Default)]
pub struct ReportStatistics {
    /// Number of shapes
    pub shape_count: usize,
    /// Shapes per zone type
    pub counts_by_zone: BTreeMap<ZoneType, usize>,
    /// Summed area of polygons, rectangles and circles in km²
    pub total_area_km2: f64,
    /// Summed length of lines in km
    pub total_line_length_km: f64,
    /// Number of comments
    pub comment_count: usize,
    /// Last recorded measurement
    pub measurement: Option<MeasurementSummary>,
}

/// Detail entry for one zone.
#[derive(Debug, Clone)]
pub struct ZoneDetail {
    /// Shape identifier
    pub id: ShapeId,
    /// Label or zone type name
    pub name: String,
    /// Zone type
    pub zone: ZoneType,
    /// Geometry kind
    pub kind: &'static str,
    /// Area in km², areal shapes only
    pub area_km2: Option<f64>,
    /// Perimeter in km, areal shapes only
    pub perimeter_km: Option<f64>,
    /// Length in km, lines only
    pub length_km: Option<f64>,
    /// Representative position
    pub centroid: Option<Coordinate>,
    /// Zone payload
    pub data: ZoneData,
}

impl ReportInput {
    /// Assemble report input from a project snapshot.
    pub fn from_project(project: &Project) -> Self {
        let mut statistics = ReportStatistics {
            shape_count: project.shapes.len(),
            comment_count: project.comments.len(),
            measurement: project.measurement.clone(),
            ..ReportStatistics::default()
        };

        let zones = project
            .shapes
            .iter()
            .map(|shape| {
                let geometry = &shape.geometry;
                let detail = ZoneDetail {
                    id: shape.id,
                    name: shape.display_name().to_string(),
                    zone: shape.zone,
                    kind: geometry.kind(),
                    area_km2: geometry.area_km2(),
                    perimeter_km: geometry.perimeter_km(),
                    length_km: geometry.length_km(),
                    centroid: geometry.centroid(),
                    data: shape.data.clone(),
                };
                *statistics.counts_by_zone.entry(shape.zone).or_default() += 1;
                statistics.total_area_km2 += detail.area_km2.unwrap_or(0.0);
                statistics.total_line_length_km += detail.length_km.unwrap_or(0.0);
                detail
            })
            .collect();

        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            researcher: project.researcher.clone(),
            status: project.status,
            created_at: project.created_at,
            modified_at: project.modified_at,
            statistics,
            zones,
            generated_at: Utc::now(),
        }
    }
}

/// External collaborator that lays out a report.
pub trait ReportRenderer {
    /// File extension of the rendered document.
    fn extension(&self) -> &'static str;

    /// Render the report.
    fn render(&self, input: &ReportInput) -> Result<Vec<u8>, FormatError>;
}

/// Plain-text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportRenderer;

impl ReportRenderer for TextReportRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, input: &ReportInput) -> Result<Vec<u8>, FormatError> {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = write_text_report(&mut out, input);
        Ok(out.into_bytes())
    }
}

fn write_text_report(out: &mut String, input: &ReportInput) -> std::fmt::Result {
    let stats = &input.statistics;

    writeln!(out, "{}", input.name)?;
    writeln!(out, "{}", "=".repeat(input.name.chars().count().max(1)))?;
    if !input.description.is_empty() {
        writeln!(out, "{}", input.description)?;
    }
    if !input.researcher.is_empty() {
        writeln!(out, "Researcher: {}", input.researcher)?;
    }
    writeln!(out, "Status: {:?}", input.status)?;
    writeln!(out, "Created: {}", input.created_at.format("%Y-%m-%d"))?;
    writeln!(out, "Modified: {}", input.modified_at.format("%Y-%m-%d"))?;
    writeln!(out)?;

    writeln!(out, "Summary")?;
    writeln!(out, "-------")?;
    writeln!(out, "Zones: {}", stats.shape_count)?;
    for (zone, count) in &stats.counts_by_zone {
        writeln!(out, "  {}: {}", zone.name(), count)?;
    }
    writeln!(out, "Total area: {:.3} km²", stats.total_area_km2)?;
    writeln!(out, "Total line length: {:.3} km", stats.total_line_length_km)?;
    writeln!(out, "Comments: {}", stats.comment_count)?;
    if let Some(m) = &stats.measurement {
        write!(out, "Last measurement: {} over {} points", m.mode.name(), m.points.len())?;
        if let Some(d) = m.distance_km {
            write!(out, ", {:.3} km", d)?;
        }
        if let Some(b) = m.bearing_deg {
            write!(out, ", bearing {:.1}°", b)?;
        }
        if let Some(a) = m.area_km2 {
            write!(out, ", {:.3} km²", a)?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    writeln!(out, "Zones")?;
    writeln!(out, "-----")?;
    for zone in &input.zones {
        write!(out, "* {} [{}, {}]", zone.name, zone.zone.name(), zone.kind)?;
        if let Some(area) = zone.area_km2 {
            write!(out, " area {:.3} km²", area)?;
        }
        if let Some(perimeter) = zone.perimeter_km {
            write!(out, " perimeter {:.3} km", perimeter)?;
        }
        if let Some(length) = zone.length_km {
            write!(out, " length {:.3} km", length)?;
        }
        if let Some(c) = zone.centroid {
            write!(out, " at {}", c)?;
        }
        writeln!(out)?;
        if !zone.data.is_none() {
            writeln!(out, "    data: {}", zone.data.to_json_value())?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Generated {}",
        input.generated_at.format("%Y-%m-%d %H:%M UTC")
    )
}
