//! Identity Domain Layer

pub mod entity;
pub mod gateway;
pub mod repository;
pub mod value_object;
