pub mod analytics;
pub mod panels;
pub mod table;
