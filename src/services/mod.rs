pub mod command_builder;
pub mod executor;
pub mod selection;
pub mod status;
pub mod sync_log;
