pub mod candidate;
pub mod criteria;
pub mod weights;
