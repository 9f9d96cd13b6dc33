pub mod configuration;
pub mod model;

pub use configuration::BuildConfiguration;
pub use model::BuildRequest;
