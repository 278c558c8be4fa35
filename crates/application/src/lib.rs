//! hatedns application layer: the record store port and the use cases the
//! DNS listeners and the administrative API drive.
pub mod ports;
pub mod use_cases;
