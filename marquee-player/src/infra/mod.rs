pub mod console;
pub mod constants;
pub mod simulated_engine;
