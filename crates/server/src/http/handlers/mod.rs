pub mod admin;
pub mod comments;
