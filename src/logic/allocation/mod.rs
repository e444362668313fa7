//! Allocation Module
//!
//! Maps the risk pair and the prioritized ranking to shares across four
//! response categories. Higher risk shifts weight from proactive work
//! (training, technical controls) to reactive work (monitoring, incident
//! response).
//!
//! ## Structure
//! - `types`: Categories, plan, budget lines
//! - `rules`: Profiles and intensity weights
//! - `optimizer`: Plan construction

pub mod types;
pub mod rules;
pub mod optimizer;

pub use types::{AllocationLine, AllocationPlan, BudgetLine, ResourceCategory};
pub use optimizer::{allocation_intensity, optimize_allocation};
