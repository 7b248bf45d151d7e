pub mod admin;
pub mod health;
pub mod me;
pub mod permissions;
pub mod roles;
pub mod users;
