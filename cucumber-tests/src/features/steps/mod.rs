pub mod policy_steps;
pub mod reload_steps;
pub mod session_steps;
