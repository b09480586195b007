pub mod docs;
pub mod inventory;
pub mod photo;
pub mod search;
