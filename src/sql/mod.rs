//! Backend-neutral statements and rows: values as parameters, SQL text from fixed constants.

pub mod params;
pub mod record;
pub mod statements;
pub use params::*;
pub use record::*;
