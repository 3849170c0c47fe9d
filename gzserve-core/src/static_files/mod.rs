mod handler;
mod render;
mod resolve;
mod response;
#[cfg(test)]
mod tests;

pub use handler::{StaticSite, handle_static_request};
pub use render::ByteRange;
pub use response::{ServeError, StaticBody, StaticResponse};
