//! Trader module - bar data, settings and infrastructure.
//!
//! - **constant**: Exchange and Interval
//! - **object**: BarData and HistoryRequest
//! - **datafeed**: Datafeed abstraction for history bars
//! - **setting**: Global settings management
//! - **logger**: Logging setup
//! - **utility**: Working-folder helpers

pub mod constant;
pub mod datafeed;
pub mod logger;
pub mod object;
pub mod setting;
pub mod utility;

// Re-exports for convenience
pub use constant::{Exchange, Interval};
pub use datafeed::{create_datafeed, BaseDatafeed, EmptyDatafeed};
pub use logger::{init_logger, CRITICAL, DEBUG, ERROR, INFO, WARNING};
pub use object::{BarData, HistoryRequest};
pub use setting::{SettingValue, Settings, SETTINGS};
pub use utility::{get_file_path, get_folder_path, TEMP_DIR};
