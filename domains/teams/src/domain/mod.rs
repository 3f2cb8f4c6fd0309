//! Teams domain layer: entities

pub mod entities;
