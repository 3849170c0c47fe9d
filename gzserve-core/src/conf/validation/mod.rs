mod report;
mod validate;

pub use report::*;
pub use validate::*;
