//! Router construction and request path parsing.

mod explorer;
pub mod path;

pub use explorer::explorer_routes;
pub use path::RequestPath;
