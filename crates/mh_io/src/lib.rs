// crates/mh_io/src/lib.rs

//! MariHydro IO 模块
//!
//! 边界条件 (`.bc`) 文件的读取与写出。
//!
//! # 模块
//!
//! - [`bc`]: 分词、时间轴、值解码、目标解析、读取与写出
//! - [`error`]: 文件级错误与段级错误
//!
//! # 使用示例
//!
//! ## 读取边界条件
//!
//! ```rust,ignore
//! use mh_config::BcConfig;
//! use mh_io::bc::read_boundary_file;
//! use mh_network::Network;
//!
//! let mut network = Network::from_file("network.json")?;
//! let summary = read_boundary_file("BoundaryConditions.bc", &mut network, &BcConfig::default())?;
//! println!("应用 {} 个段", summary.applied);
//! ```
//!
//! ## 写出边界条件
//!
//! ```rust,ignore
//! use mh_io::bc::write_boundary_file;
//!
//! write_boundary_file("out.bc", &network, &config)?;
//! ```

pub mod bc;
pub mod error;

// 重导出常用类型
pub use bc::{
    read_boundary_file, read_lateral_file, write_boundary_file, BcSection, BoundaryPlan,
    BoundaryReadSummary, LateralRecord,
};
pub use error::{BcError, BcResult, IoError, IoResult, SectionError, SectionErrors};
/// 类型别名简化
pub type Result<T> = IoResult<T>;
