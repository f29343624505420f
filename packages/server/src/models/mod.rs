pub mod account;
pub mod admin;
pub mod auth;
pub mod message;
pub mod notification;
pub mod offer;
pub mod recipe;
pub mod shared;
pub mod social;
