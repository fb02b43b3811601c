//! MSP Zones - marine spatial planning zone engine
//!
//! Zone annotation on a geographic map: shapes with typed zone data,
//! geodesic measurement, snapshot undo/redo, project persistence to a local
//! file or a remote document store, and interchange with structured JSON,
//! GeoJSON and CSV, plus KML import.
//!
//! ```no_run
//! use msp_zones::{Coordinate, Geometry, Shape, ShapeStore, ZoneType};
//!
//! let mut store = ShapeStore::new();
//! let id = store
//!     .add(Shape::new(
//!         ZoneType::ProtectedArea,
//!         Geometry::Circle { center: Coordinate::new(8.3, 79.7), radius_m: 1500.0 },
//!     ))
//!     .unwrap();
//! assert!(store.get(id).is_some());
//! store.undo();
//! assert!(store.is_empty());
//! ```

pub mod config;
pub mod constants;
pub mod format;
pub mod geometry;
pub mod manager;
pub mod measurement;
pub mod model;
pub mod persistence;
pub mod store;
pub mod undo;

pub use config::AppConfig;
pub use format::{ExportOptions, FormatError, ImportExportGateway, ImportFile};
pub use manager::{ProjectError, ProjectManager};
pub use measurement::{MeasureMode, MeasurementSession, MeasurementSummary};
pub use model::{Coordinate, Geometry, Project, Shape, ShapeId, ValidationError, ZoneData, ZoneType};
pub use persistence::{Backend, LocalStore, PersistenceBackend, PersistenceError};
pub use store::ShapeStore;
pub use undo::{UndoConfig, UndoStack};
