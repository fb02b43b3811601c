//! Zone type vocabulary and zone-specific data payloads.

use serde::{Deserialize, Serialize};

/// Domain classification attached to every shape.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    /// Area reserved for scientific study
    #[default]
    ResearchZone,
    /// Commercial or artisanal fishing ground
    FishingZone,
    /// Marine protected area
    ProtectedArea,
    /// Vessel traffic corridor
    ShippingLane,
    /// Fish or seaweed farming site
    AquacultureSite,
    /// Habitat conservation area
    ConservationArea,
    /// Sampling station or survey transect
    SurveySite,
}

impl ZoneType {
    /// Get the display name for this zone type.
    pub fn name(&self) -> &'static str {
        match self {
            ZoneType::ResearchZone => "Research Zone",
            ZoneType::FishingZone => "Fishing Zone",
            ZoneType::ProtectedArea => "Protected Area",
            ZoneType::ShippingLane => "Shipping Lane",
            ZoneType::AquacultureSite => "Aquaculture Site",
            ZoneType::ConservationArea => "Conservation Area",
            ZoneType::SurveySite => "Survey Site",
        }
    }

    /// Machine identifier, identical to the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            ZoneType::ResearchZone => "research_zone",
            ZoneType::FishingZone => "fishing_zone",
            ZoneType::ProtectedArea => "protected_area",
            ZoneType::ShippingLane => "shipping_lane",
            ZoneType::AquacultureSite => "aquaculture_site",
            ZoneType::ConservationArea => "conservation_area",
            ZoneType::SurveySite => "survey_site",
        }
    }

    /// Default presentation color.
    pub fn color(&self) -> [u8; 3] {
        match self {
            ZoneType::ResearchZone => [59, 130, 246],
            ZoneType::FishingZone => [245, 158, 11],
            ZoneType::ProtectedArea => [16, 185, 129],
            ZoneType::ShippingLane => [239, 68, 68],
            ZoneType::AquacultureSite => [139, 92, 246],
            ZoneType::ConservationArea => [6, 182, 212],
            ZoneType::SurveySite => [236, 72, 153],
        }
    }

    /// Default color as `#rrggbb`.
    pub fn color_hex(&self) -> String {
        let [r, g, b] = self.color();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// All zone types in display order.
    pub fn all() -> &'static [ZoneType] {
        &[
            ZoneType::ResearchZone,
            ZoneType::FishingZone,
            ZoneType::ProtectedArea,
            ZoneType::ShippingLane,
            ZoneType::AquacultureSite,
            ZoneType::ConservationArea,
            ZoneType::SurveySite,
        ]
    }

    /// Look up a zone type by key or display name, case-insensitively.
    pub fn parse(text: &str) -> Option<ZoneType> {
        let needle = text.trim().to_lowercase().replace([' ', '-'], "_");
        ZoneType::all().iter().copied().find(|z| {
            z.key() == needle || z.name().to_lowercase().replace(' ', "_") == needle
        })
    }
}

/// Water-quality reading taken inside a zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterQuality {
    /// Water temperature in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    /// Salinity in PSU
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salinity_psu: Option<f64>,
    /// pH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    /// Dissolved oxygen in mg/L
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissolved_oxygen_mg_l: Option<f64>,
    /// Turbidity in NTU
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbidity_ntu: Option<f64>,
}

/// Zone-specific structured data attached to a shape.
///
/// Each variant is an independently typed payload; there is no stringly
/// typed bag of optional fields to check at call sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneData {
    /// No payload
    #[default]
    None,
    /// Water-quality measurements
    WaterQuality(WaterQuality),
    /// Species observed in the zone
    Species {
        /// Species names
        species: Vec<String>,
        /// Free-text abundance notes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        abundance: Option<String>,
    },
    /// Fishing activity rules
    Fishing {
        /// Permitted gear types
        #[serde(default)]
        gear: Vec<String>,
        /// Open season, free text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        season: Option<String>,
        /// Catch limit in tonnes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        catch_limit_t: Option<f64>,
    },
    /// Legal protection status
    Protection {
        /// Designation (e.g. "no-take")
        designation: String,
        /// Restricted activities
        #[serde(default)]
        restrictions: Vec<String>,
    },
    /// Anything else, kept verbatim
    Custom {
        /// Raw JSON value
        value: serde_json::Value,
    },
}

impl ZoneData {
    /// Check whether this is the empty payload.
    pub fn is_none(&self) -> bool {
        matches!(self, ZoneData::None)
    }

    /// JSON representation used by the tabular and GeoJSON exports.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            ZoneData::None => serde_json::Value::Object(serde_json::Map::new()),
            other => serde_json::to_value(other).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Rebuild from a JSON value, falling back to `Custom` for untagged data.
    pub fn from_json_value(value: serde_json::Value) -> Self {
        match &value {
            serde_json::Value::Null => ZoneData::None,
            serde_json::Value::Object(map) if map.is_empty() => ZoneData::None,
            _ => serde_json::from_value(value.clone()).unwrap_or(ZoneData::Custom { value }),
        }
    }
}
