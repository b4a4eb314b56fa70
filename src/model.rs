mod config;
mod expectations;

pub use self::config::{
    DEFAULT_HOST, DEFAULT_LAUNCHER, DEFAULT_READY_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS,
    DEFAULT_SERVER_CLASS, DEFAULT_SERVER_PORT, HarnessConfig,
};
pub use self::expectations::{ExpectationTable, ExpectedRedirect};
