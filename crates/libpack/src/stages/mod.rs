pub mod generate;
pub mod link;
pub mod scan;
pub mod write;
