//! Core simulation scaffolding

pub mod horizon;
