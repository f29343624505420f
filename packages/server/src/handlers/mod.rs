pub mod admin;
pub mod auth;
pub mod comment;
pub mod messaging;
pub mod notification;
pub mod offer;
pub mod profile;
pub mod recipe;
pub mod restaurant;
pub mod social;
