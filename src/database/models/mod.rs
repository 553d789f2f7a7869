pub mod candle;
pub mod material;
pub mod scenario;
pub mod user;

pub use candle::{Candle, CandleMaterial, NewCandle, RecipeCost, RecipeLine};
pub use material::{Material, MaterialType, NewMaterial, Unit};
pub use scenario::{NewScenario, NewScenarioItem, ProjectionScenario, ScenarioItem};
pub use user::{NewUser, User};
