//! chp-core: shared foundation for the CHP control workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for heat-circuit physics)
//! - numeric (float validation and step counting helpers)
//! - time (hour-of-day and fixed control time step)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod time;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use time::{HourOfDay, TimeStep};
