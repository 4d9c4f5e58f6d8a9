//! Project domain module
//!
//! Phase result entities, the response shapes used to request them and the
//! [`ProjectStateAccumulator`] they are merged into.

pub mod accumulator;
pub mod entities;
pub mod shape;

pub use accumulator::{FieldValue, ProjectField, ProjectStateAccumulator};
pub use entities::{
    ArchitecturePlan, BackendDesign, ComponentSpec, DatabaseDesign, DeploymentConfig,
    EndpointSpec, FrontendDesign, GeneratedFile, ModelSpec, ProjectState, TableSpec,
};
pub use shape::{ResponseShape, ShapeViolation, StructuredOutput};
