pub mod cors;
pub mod routes;
pub mod routing;
pub mod types;
