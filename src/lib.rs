pub mod directory;
pub mod doctor;
pub mod search;
pub mod service;

pub use service::ExhibitorDirectoryService;
