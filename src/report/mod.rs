//! Chart data
//!
//! Budget sweeps, per-category spreads and flat rankings, shaped for the
//! plotting side which only has to draw them.

mod levels;
mod palette;
mod ranking;
#[cfg(feature = "python")]
mod session;

pub use levels::*;
pub use palette::*;
pub use ranking::*;
#[cfg(feature = "python")]
pub use session::*;
