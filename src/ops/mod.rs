pub mod cell_ops;
pub mod coordinator;
pub mod encode;
pub mod gesture;
pub mod reconcile;
pub mod session;
