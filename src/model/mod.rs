//! Data models for the zone engine.

mod coordinate;
mod error;
mod project;
mod shape;
mod zone;

pub use coordinate::Coordinate;
pub use error::ValidationError;
pub use project::{Attachment, Comment, Project, ProjectId, ProjectStatus, ResearchData};
pub use shape::{Geometry, Shape, ShapeId};
pub use zone::{WaterQuality, ZoneData, ZoneType};
