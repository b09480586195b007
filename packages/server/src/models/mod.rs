pub mod inventory;
pub mod search;
