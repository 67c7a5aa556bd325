// crates/mh_foundation/src/lib.rs

//! MariHydro Foundation Layer
//!
//! 基础层，提供整个项目共享的错误抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与 `ensure!` 辅助宏
//!
//! # 示例
//!
//! ```
//! use mh_foundation::error::{MhError, MhResult};
//! use mh_foundation::ensure;
//!
//! fn check_rows(rows: usize) -> MhResult<()> {
//!     ensure!(rows > 0, MhError::invalid_input("表格至少需要一行"));
//!     Ok(())
//! }
//!
//! assert!(check_rows(1).is_ok());
//! assert!(check_rows(0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

// 重导出常用类型
pub use error::{MhError, MhResult};
