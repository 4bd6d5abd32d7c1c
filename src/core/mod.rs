pub mod index;
pub mod manifest;
pub mod resolver;
pub mod version;
