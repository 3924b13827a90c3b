//! API layer - native client and REST surface

pub mod native;
pub mod rest;
