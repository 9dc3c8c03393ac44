//! Command line front end for prikazy

pub mod cli;
pub mod commands;
pub mod output;
