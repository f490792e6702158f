//! Domain Layer

pub mod entities;
pub mod policy;
pub mod repository;
pub mod services;
pub mod value_objects;
