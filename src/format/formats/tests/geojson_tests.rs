//! Tests for the GeoJSON format.

use super::create_mixed_project;
use crate::format::formats::GeoJsonFormat;
use crate::format::traits::{ExportOptions, ImportOptions, ZoneFormat};
use crate::model::{Coordinate, Geometry, Project, Shape, ZoneData, ZoneType};

fn export_value(project: &Project) -> (serde_json::Value, usize) {
    let result = GeoJsonFormat
        .export(project, &ExportOptions::default())
        .unwrap();
    (
        serde_json::from_slice(&result.bytes).unwrap(),
        result.warnings.len(),
    )
}

#[test]
fn test_geojson_format_metadata() {
    let format = GeoJsonFormat;
    assert_eq!(format.id(), "geojson");
    assert_eq!(format.display_name(), "GeoJSON");
    assert_eq!(format.extensions(), &["geojson"]);
}

#[test]
fn test_feature_collection_layout() {
    let (value, _) = export_value(&create_mixed_project());
    assert_eq!(value["type"], "FeatureCollection");

    let features = value["features"].as_array().unwrap();
    assert_eq!(features.len(), 5);
    let types: Vec<&str> = features
        .iter()
        .map(|f| f["geometry"]["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["Point", "LineString", "Polygon", "Polygon", "Point"]);

    // [lon, lat] order
    assert_eq!(features[0]["geometry"]["coordinates"][0], 79.4);
    assert_eq!(features[0]["geometry"]["coordinates"][1], 9.1);
}

#[test]
fn test_properties() {
    let (value, _) = export_value(&create_mixed_project());
    let props = &value["features"][0]["properties"];
    assert_eq!(props["name"], "Station \"A\"");
    assert_eq!(props["type"], "survey_site");
    assert_eq!(props["color"], ZoneType::SurveySite.color_hex());
    assert_eq!(props["data"]["kind"], "water_quality");
    assert!(props["createdAt"].is_string());

    // Unlabeled shapes fall back to the zone type name
    assert_eq!(value["features"][1]["properties"]["name"], "Shipping Lane");
    assert_eq!(value["features"][1]["properties"]["data"], serde_json::json!({}));
}

#[test]
fn test_polygon_ring_is_closed() {
    let (value, _) = export_value(&create_mixed_project());

    for index in [2, 3] {
        let ring = value["features"][index]["geometry"]["coordinates"][0]
            .as_array()
            .unwrap();
        assert_eq!(ring.first(), ring.last());
    }
    let triangle = value["features"][2]["geometry"]["coordinates"][0]
        .as_array()
        .unwrap();
    assert_eq!(triangle.len(), 4);
    let rectangle = value["features"][3]["geometry"]["coordinates"][0]
        .as_array()
        .unwrap();
    assert_eq!(rectangle.len(), 5);
}

#[test]
fn test_one_warning_per_circle() {
    let mut project = create_mixed_project();
    project.shapes.push(Shape::new(
        ZoneType::ConservationArea,
        Geometry::Circle {
            center: Coordinate::new(7.0, 80.0),
            radius_m: 100.0,
        },
    ));

    let result = GeoJsonFormat
        .export(&project, &ExportOptions::default())
        .unwrap();
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings.iter().all(|w| w.shape_id.is_some()));

    let value: serde_json::Value = serde_json::from_slice(&result.bytes).unwrap();
    assert_eq!(value["features"][5]["geometry"]["type"], "Point");
    assert_eq!(value["features"][5]["geometry"]["coordinates"][0], 80.0);
}

#[test]
fn test_empty_project() {
    let (value, warnings) = export_value(&Project::new("Empty"));
    assert_eq!(value["features"].as_array().unwrap().len(), 0);
    assert_eq!(warnings, 0);
}

#[test]
fn test_import_feature_collection() {
    let input = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[79.0, 8.0], [79.1, 8.0], [79.1, 8.1], [79.0, 8.0]]]},
                "properties": {"name": "Reef core", "type": "protected_area",
                               "data": {"kind": "protection", "designation": "no-take"}}
            },
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[79.0, 8.0], [80.0, 8.5]]},
                "properties": {"name": "Fishing Zone", "type": "Fishing Zone"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "MultiPoint", "coordinates": [[79.0, 8.0]]},
                "properties": {}
            }
        ]
    }"#;

    let result = GeoJsonFormat
        .import(input.as_bytes(), &ImportOptions::default())
        .unwrap();
    assert_eq!(result.shapes.len(), 2);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].message.contains("MultiPoint"));

    let reef = &result.shapes[0];
    assert_eq!(reef.zone, ZoneType::ProtectedArea);
    assert_eq!(reef.label.as_deref(), Some("Reef core"));
    // Closing vertex dropped
    assert_eq!(reef.geometry.positions().len(), 3);
    assert!(matches!(reef.data, ZoneData::Protection { ref designation, .. } if designation == "no-take"));

    let lane = &result.shapes[1];
    assert_eq!(lane.zone, ZoneType::FishingZone);
    // A name equal to the zone type name is not a label
    assert_eq!(lane.label, None);
    assert_eq!(lane.data, ZoneData::None);
}

#[test]
fn test_import_single_feature_with_default_zone() {
    let input = r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [80.2, 6.9]}}"#;
    let result = GeoJsonFormat
        .import(
            input.as_bytes(),
            &ImportOptions::new().default_zone(ZoneType::SurveySite),
        )
        .unwrap();

    assert_eq!(result.shapes.len(), 1);
    assert_eq!(result.shapes[0].zone, ZoneType::SurveySite);
    assert_eq!(
        result.shapes[0].geometry,
        Geometry::Point {
            position: Coordinate::new(6.9, 80.2)
        }
    );
}

#[test]
fn test_import_skips_out_of_range_positions() {
    let input = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [200.0, 6.9]}, "properties": {}}
    ]}"#;
    let result = GeoJsonFormat
        .import(input.as_bytes(), &ImportOptions::default())
        .unwrap();
    assert!(result.shapes.is_empty());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_import_rejects_non_geojson() {
    assert!(
        GeoJsonFormat
            .import(br#"{"type": "Topology"}"#, &ImportOptions::default())
            .is_err()
    );
    assert!(
        GeoJsonFormat
            .import(br#"{"features": []}"#, &ImportOptions::default())
            .is_err()
    );
}
