pub mod grouping;
pub mod stats;
pub mod time;
