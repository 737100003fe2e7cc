pub mod charts;
pub mod figures;
pub mod html;
pub mod page;
pub mod summary;
pub mod svg;
pub mod zip;
