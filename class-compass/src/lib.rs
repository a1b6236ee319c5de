//! Class Compass server.
//!
//! Keeps a personal class schedule in order and shows how long it takes to
//! travel from each class to the next, using an external distance-matrix
//! provider.

pub mod config;
pub mod maps;
pub mod schedule;
pub mod travel;
pub mod web;
