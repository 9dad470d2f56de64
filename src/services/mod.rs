// Catalog reads
pub mod catalog;

// Visitor submissions
pub mod submissions;
