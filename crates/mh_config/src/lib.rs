// crates/mh_config/src/lib.rs

//! MariHydro Config Layer
//!
//! 配置层，为边界条件文件的读写提供可持久化的选项。
//!
//! # 模块概览
//!
//! - [`bc_config`]: BcConfig 边界条件编解码配置
//! - [`error`]: 配置错误类型
//!
//! # 示例
//!
//! ```
//! use mh_config::BcConfig;
//!
//! let config = BcConfig::default();
//! assert_eq!(config.model_wide_name, "model_wide");
//! assert!(config.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bc_config;
pub mod error;

// 重导出核心类型
pub use bc_config::{BcConfig, REFERENCE_TIME_FORMAT};
pub use error::ConfigError;
