//! Domain Layer

pub mod entities;
pub mod policy;
pub mod repository;
