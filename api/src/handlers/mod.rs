//! Request handling support shared by the routes

pub mod error;
