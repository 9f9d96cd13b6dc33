pub mod condition;
pub mod trace;
pub mod value;

pub use condition::*;
pub use trace::*;
pub use value::*;
