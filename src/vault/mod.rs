pub mod config;
pub mod filter;
pub mod layout;
pub mod loader;
pub mod paths;
pub mod record;
pub mod store;
pub mod view;
pub mod zone;
