pub mod batch;
pub mod scan;
pub mod year;
