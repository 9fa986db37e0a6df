pub mod agent;
pub mod config;
pub mod routes;
pub mod state;
pub mod store;
pub mod workflows;
