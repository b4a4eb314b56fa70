pub mod harness;
pub mod launcher;
pub mod logging;
pub mod model;
pub mod probe;
pub mod report;
