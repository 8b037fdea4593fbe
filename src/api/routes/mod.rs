//! API Routes
//!
//! Route handlers organized by functionality.

pub mod chart;
pub mod health;
pub mod records;
pub mod search;
pub mod stats;
