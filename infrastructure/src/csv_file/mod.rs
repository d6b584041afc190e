pub mod pass_store;
pub mod roster;
