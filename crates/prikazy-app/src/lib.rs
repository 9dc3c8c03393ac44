//! Application service layer - config, use cases, export

pub mod compensation_service;
pub mod config;
pub mod export;
pub mod repository;
