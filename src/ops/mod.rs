pub mod deadline_ops;
pub mod list_ops;
pub mod notify;
pub mod refresh;
pub mod session;
pub mod transfer;
