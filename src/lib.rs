pub mod allocation;
pub mod config;
pub mod dsa;
pub mod linear_algebra;
pub mod logging;
