
mod admin;
mod feed;
mod follow;
mod likes;
mod messaging;
mod profile;
mod recipes;
mod restaurants;
