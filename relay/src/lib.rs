pub extern crate serde;
pub extern crate serde_json;

mod message;
mod registry;
mod types;

pub use message::*;
pub use registry::*;
pub use types::*;
