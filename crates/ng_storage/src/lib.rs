pub mod backends;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use backends::*;

pub mod prelude {
    pub use super::backends::*;
    pub use ng_core::{Param, RecordStore, ResultSet};
}
