pub mod config_io;
pub mod deadline_io;
pub mod list_io;
pub mod logging;
pub mod persist;
pub mod recent;
