pub mod api;
pub mod coordinator;
pub mod model;
pub mod sensor;

pub use api::Error;
