//! Network Layer
//!
//! Plumbing between connection tasks and the session. Packet decoding lives
//! in the host engine; this layer only funnels decoded reports to the single
//! tick-owning task.

pub mod driver;

pub use driver::{DriverCommand, DriverError, DriverHandle, StepOutcome, TickDriver, TickObserver};
