pub mod allocator;
pub mod error;
pub mod invocation;
pub mod io;
pub mod paths;
pub mod registry;
pub mod reserved;
pub mod store;
pub mod token;

pub use allocator::{Allocator, Conflict, PortCandidate, Resolution};
pub use error::{Result, RouletteError};
pub use invocation::{Outcome, Request};
pub use registry::Registry;
pub use reserved::ReservedPorts;
pub use store::ConfigStore;
