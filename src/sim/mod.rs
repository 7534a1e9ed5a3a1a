//! Physics core
//!
//! Pure and single-threaded:
//! - No rendering or platform dependencies
//! - Stable pair order (increasing `(i, j)`)
//! - Caller supplies `dt`

pub mod body;
pub mod state;
pub mod tick;
pub mod vector;

pub use body::{Body, gravity_force};
pub use state::{PairUpdate, PhysicsParams, SimState};
pub use tick::tick;
pub use vector::Vector2D;
