// src/lib.rs

pub mod db;
pub mod repositories;
pub mod services;
pub mod test_utils;

pub use db::Database;
pub use invite_common::error::Error;
pub use invite_common::models;
pub use services::{CodeGenerator, InviteService};
