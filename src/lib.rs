pub mod cli;
pub mod data;
pub mod logging;
pub mod power;
pub mod report;
pub mod sheet;
