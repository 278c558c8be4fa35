//! hatedns infrastructure layer: SQLite record store and DNS wire transports.
pub mod database;
pub mod dns;
pub mod repositories;
