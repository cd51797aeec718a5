use thiserror::Error;

use crate::driver::DriverError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("platform driver failed to initialize: {0}")]
    Driver(#[from] DriverError),
}
