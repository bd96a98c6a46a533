/// Protocol constants of the default deployment
pub mod constants;
/// Logger
pub mod logger;
