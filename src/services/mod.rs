pub mod projection;

pub use projection::{ProjectionLine, ScenarioProjection};
