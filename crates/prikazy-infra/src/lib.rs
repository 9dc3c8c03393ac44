//! Infrastructure layer - file persistence, loaders, CSV export

pub mod compensation_csv;
pub mod persistence;
pub mod tariff_loader;
pub mod team_csv;
