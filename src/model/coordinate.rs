//! Geographic coordinate type.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate without range checking.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a coordinate, rejecting values outside the valid range.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        let coord = Self::new(lat, lon);
        coord.validate()?;
        Ok(coord)
    }

    /// Check latitude is within [-90, 90] and longitude within [-180, 180].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(ValidationError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    /// Longitude in radians.
    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }

    /// Position as a GeoJSON `[lon, lat]` pair.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = ValidationError;

    /// Parse `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| ValidationError::Unparsable(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| ValidationError::Unparsable(s.to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| ValidationError::Unparsable(s.to_string()))?;
        Self::try_new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(Coordinate::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinate::new(-90.0, -180.0).validate().is_ok());
        assert!(Coordinate::new(90.1, 0.0).validate().is_err());
        assert!(Coordinate::new(0.0, -180.5).validate().is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_parse() {
        let c: Coordinate = "6.9271, 79.8612".parse().unwrap();
        assert_eq!(c, Coordinate::new(6.9271, 79.8612));
        assert!("6.9".parse::<Coordinate>().is_err());
        assert!("abc,1".parse::<Coordinate>().is_err());
        assert!("95,1".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_lon_lat_order() {
        let c = Coordinate::new(10.0, 20.0);
        assert_eq!(c.to_lon_lat(), [20.0, 10.0]);
    }
}
