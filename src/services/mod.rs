pub mod blob;
pub mod local;
pub mod poll;
pub mod remote;
pub mod session;
pub mod store;
