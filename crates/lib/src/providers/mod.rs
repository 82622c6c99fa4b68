pub mod ai;
pub mod speech;
