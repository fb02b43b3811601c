//! Tests for the KML format.

use crate::format::FormatError;
use crate::format::formats::KmlFormat;
use crate::format::traits::{ExportOptions, ImportOptions, ZoneFormat};
use crate::model::{Coordinate, Geometry, Project, ZoneData, ZoneType};

#[test]
fn test_kml_export_is_unsupported() {
    let err = KmlFormat
        .export(&Project::new("Survey"), &ExportOptions::default())
        .unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedFormat(ref what) if what == "KML export"));
}

#[test]
fn test_kml_import_reads_extended_data() {
    let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Gulf of Mannar survey</name>
    <Placemark>
      <name>Station &quot;A&quot;</name>
      <ExtendedData>
        <Data name="type"><value>survey_site</value></Data>
        <Data name="data"><value>{"kind":"water_quality","temperature_c":28.5}</value></Data>
        <Data name="createdAt"><value>2024-03-01T08:30:00+00:00</value></Data>
      </ExtendedData>
      <Point><coordinates>79.4,9.1</coordinates></Point>
    </Placemark>
    <Placemark>
      <name>Protected Area</name>
      <ExtendedData>
        <Data name="type"><value>protected_area</value></Data>
      </ExtendedData>
      <Polygon>
        <outerBoundaryIs><LinearRing>
          <coordinates>79.1,8.9 79.3,9.0 79.4,8.8 79.1,8.9</coordinates>
        </LinearRing></outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>"#;

    let result = KmlFormat
        .import(input.as_bytes(), &ImportOptions::default())
        .unwrap();
    assert!(result.warnings.is_empty());
    assert_eq!(result.shapes.len(), 2);

    let station = &result.shapes[0];
    assert_eq!(station.label.as_deref(), Some("Station \"A\""));
    assert_eq!(station.zone, ZoneType::SurveySite);
    assert!(matches!(
        station.data,
        ZoneData::WaterQuality(ref wq) if wq.temperature_c == Some(28.5)
    ));
    assert_eq!(
        station.created_at.to_rfc3339(),
        "2024-03-01T08:30:00+00:00"
    );
    assert_eq!(
        station.geometry,
        Geometry::Point {
            position: Coordinate::new(9.1, 79.4)
        }
    );

    // Closing vertex dropped; label equal to the zone name is not kept
    let area = &result.shapes[1];
    assert_eq!(area.zone, ZoneType::ProtectedArea);
    assert_eq!(area.label, None);
    assert_eq!(area.geometry.positions().len(), 3);
}

#[test]
fn test_kml_import_foreign_file() {
    let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Folder>
      <Placemark>
        <name>Harbour approach</name>
        <LineString>
          <coordinates>
            79.85,6.95,0 79.80,6.97,0
            79.70,7.00,0
          </coordinates>
        </LineString>
      </Placemark>
      <Placemark>
        <name>Lagoon</name>
        <Polygon>
          <outerBoundaryIs><LinearRing><coordinates>
            79.8,7.1 79.9,7.1 79.9,7.2 79.8,7.1
          </coordinates></LinearRing></outerBoundaryIs>
          <innerBoundaryIs><LinearRing><coordinates>
            79.84,7.12 79.86,7.12 79.86,7.14 79.84,7.12
          </coordinates></LinearRing></innerBoundaryIs>
        </Polygon>
      </Placemark>
      <Placemark>
        <name>No geometry</name>
      </Placemark>
    </Folder>
  </Document>
</kml>"#;

    let result = KmlFormat
        .import(
            input.as_bytes(),
            &ImportOptions::new().default_zone(ZoneType::ConservationArea),
        )
        .unwrap();

    assert_eq!(result.shapes.len(), 2);
    assert_eq!(result.warnings.len(), 1);

    let approach = &result.shapes[0];
    assert_eq!(approach.label.as_deref(), Some("Harbour approach"));
    assert_eq!(approach.zone, ZoneType::ConservationArea);
    assert_eq!(approach.geometry.positions().len(), 3);

    // Only the outer ring is kept
    let lagoon = &result.shapes[1];
    assert_eq!(
        lagoon.geometry.positions(),
        vec![
            Coordinate::new(7.1, 79.8),
            Coordinate::new(7.1, 79.9),
            Coordinate::new(7.2, 79.9),
        ]
    );
}

#[test]
fn test_kml_import_requires_kml_root() {
    let err = KmlFormat
        .import(b"<gpx><trk/></gpx>", &ImportOptions::default())
        .unwrap_err();
    assert!(matches!(err, FormatError::InvalidFormat { .. }));
}
