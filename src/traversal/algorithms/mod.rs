//! Ubiquitous algorithms for trees.
//!
//! This includes:
//! - Depth-first pre-order walking with path tracking ([`PreOrder`])
//!
//! [`PreOrder`]: struct.PreOrder.html " "

mod pre_order;
pub use pre_order::*;
