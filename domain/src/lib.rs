pub mod pass;
pub mod policy;
pub mod ports;
pub mod quarter;
pub mod roster;
