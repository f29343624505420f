pub mod account;
pub mod comment;
pub mod follow;
pub mod message;
pub mod notification;
pub mod recipe;
pub mod recipe_like;
pub mod recipe_tag;
pub mod special_offer;
pub mod tag;
