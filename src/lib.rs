// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod docker_repo;
pub mod health;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod snapshot;
