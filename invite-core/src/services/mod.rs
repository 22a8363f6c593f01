pub mod code_generator;
pub mod invite_service;

pub use code_generator::CodeGenerator;
pub use invite_service::InviteService;
