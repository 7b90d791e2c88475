pub mod currency;
pub mod dashboard;
pub mod draft;
pub mod transaction;
pub mod user;
