pub mod carousel;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod tasks {
    pub mod carousel;
    pub mod files;
}

pub use error::Error;
