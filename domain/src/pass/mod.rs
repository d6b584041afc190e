pub mod ledger;
pub mod pass_record;
pub mod reclaim;
pub mod timestamp;
