pub mod artifact;
pub mod compiled;
pub mod conversion;
pub mod definition;

pub use compiled::*;
pub use conversion::*;
pub use definition::*;
