pub mod manager;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{
    CandleRepository, HealthCheck, MaterialRepository, Repositories, ScenarioRepository,
    UserRepository,
};
