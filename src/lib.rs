pub mod utils;

pub mod append_log;
pub mod config;
pub mod constants;
pub mod error;
pub mod label;
pub mod log;
pub mod model;
pub mod processor;
pub mod retry;
pub mod sequencer;
pub mod source;
pub mod storage;

pub use append_log::AppendLog;
pub use error::{Error, Result};
pub use label::{Label, LabelError};
pub use model::{PostEvent, PostRecord};
