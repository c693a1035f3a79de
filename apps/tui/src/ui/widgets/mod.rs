pub mod detail;
pub mod legend;
pub mod popup;
pub mod sunburst;
pub mod tables;
