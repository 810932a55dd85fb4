//! dirmirror core: mirror an HTTP autoindex directory onto a local tree.

pub mod config;
pub mod error;
pub mod http;
pub mod listing;
pub mod logging;
pub mod mirror;
pub mod prune;
pub mod remote_set;
pub mod storage;
pub mod sync;
pub mod url_model;

pub use error::{MirrorError, TransferError};
pub use mirror::{run, MirrorOptions, MirrorReport};
pub use remote_set::RemoteFileSet;
