pub mod admission;
pub mod policy_qa;
