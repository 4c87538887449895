//! Market data aggregate: bars, the loaded series and the source port.

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::BarSource;
pub use value_objects::*;
