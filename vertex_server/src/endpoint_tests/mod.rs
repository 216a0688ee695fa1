mod auth;
mod helpers;
mod misc;
mod orders;
