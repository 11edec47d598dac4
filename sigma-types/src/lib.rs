pub mod approximation;
pub mod comparison;
pub mod component;
pub mod epoch;
pub mod error;
pub mod pvt;
pub mod summary;

pub use approximation::*;
pub use comparison::*;
pub use component::*;
pub use epoch::*;
pub use error::*;
pub use pvt::*;
pub use summary::*;
