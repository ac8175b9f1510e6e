// Domain layer: catalog reference data, student records and ports (interfaces).

pub mod catalog;
pub mod document;
pub mod model;
pub mod ports;
