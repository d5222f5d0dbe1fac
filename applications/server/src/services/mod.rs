/// Server services
pub mod database;
pub mod test_runner;

pub use test_runner::TestRunner;
