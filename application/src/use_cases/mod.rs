//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod input_lock;
pub mod response_accumulator;
pub mod session_controller;
pub mod thread_coordinator;
pub mod thread_list;
