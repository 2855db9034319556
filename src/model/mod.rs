pub mod config;
pub mod deadline;
pub mod list_doc;

pub use config::*;
pub use deadline::*;
pub use list_doc::*;
