pub mod clutch_dataset;
pub mod clutch_rankings;
pub mod splits;
