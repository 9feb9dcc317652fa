pub mod meal;
pub mod weight;
