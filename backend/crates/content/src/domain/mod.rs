//! Content Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{Post, PostListing};
pub use value_object::{PostBody, PostContentError, PostTitle};
