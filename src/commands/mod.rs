//! CLI command implementations. Each command owns its own presentation
//! of success and failure; errors that escape are rendered by main.

mod ask;
mod files;
mod reset;
mod status;
mod upload;

pub use ask::ask;
pub use files::files;
pub use reset::reset;
pub use status::status;
pub use upload::upload;
