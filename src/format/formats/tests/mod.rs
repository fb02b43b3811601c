//! Unit tests for zone format implementations.
//!
//! These tests verify the exact shape of each external representation and
//! what survives a round trip through it.

mod geojson_tests;
mod kml_tests;

use crate::model::{Coordinate, Geometry, Project, Shape, WaterQuality, ZoneData, ZoneType};

/// Create a project with one shape of every geometry kind.
pub(super) fn create_mixed_project() -> Project {
    let mut project = Project::new("Gulf of Mannar survey");
    project.description = "Seagrass and reef mapping".to_string();

    // Point with water-quality data
    project.shapes.push(
        Shape::new(
            ZoneType::SurveySite,
            Geometry::Point {
                position: Coordinate::new(9.1, 79.4),
            },
        )
        .with_label("Station \"A\"")
        .with_data(ZoneData::WaterQuality(WaterQuality {
            temperature_c: Some(28.5),
            salinity_psu: Some(34.1),
            ..WaterQuality::default()
        })),
    );

    // Line
    project.shapes.push(Shape::new(
        ZoneType::ShippingLane,
        Geometry::Line {
            positions: vec![Coordinate::new(9.0, 79.0), Coordinate::new(9.2, 79.6)],
        },
    ));

    // Polygon
    project.shapes.push(
        Shape::new(
            ZoneType::ProtectedArea,
            Geometry::Polygon {
                positions: vec![
                    Coordinate::new(8.9, 79.1),
                    Coordinate::new(9.0, 79.3),
                    Coordinate::new(8.8, 79.4),
                ],
            },
        )
        .with_data(ZoneData::Protection {
            designation: "no-take".to_string(),
            restrictions: vec!["anchoring".to_string()],
        }),
    );

    // Rectangle
    project.shapes.push(Shape::new(
        ZoneType::AquacultureSite,
        Geometry::rectangle_from_corners(Coordinate::new(8.5, 79.0), Coordinate::new(8.6, 79.2)),
    ));

    // Circle
    project.shapes.push(Shape::new(
        ZoneType::FishingZone,
        Geometry::Circle {
            center: Coordinate::new(8.7, 79.5),
            radius_m: 2500.0,
        },
    ));

    project
}

/// Decode export bytes as UTF-8 text.
pub(super) fn text(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap()
}
