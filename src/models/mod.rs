//! Data models for the pour scheduling application.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod branch;
mod order;
mod user;

pub use branch::*;
pub use order::*;
pub use user::*;
