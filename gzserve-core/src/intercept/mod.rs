mod decision;
mod interceptor;
mod media;
mod path;

pub use decision::*;
pub use interceptor::*;
pub use media::*;
pub use path::*;

pub use crate::request::RequestTarget;
