pub mod evaluate;
pub mod policy;
pub mod schools;
