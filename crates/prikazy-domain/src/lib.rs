//! Domain layer: work order model, compensation services, repository traits

pub mod model;
pub mod repository;
pub mod service;
