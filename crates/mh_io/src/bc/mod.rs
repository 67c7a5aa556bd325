// crates/mh_io/src/bc/mod.rs

//! 边界条件 (`.bc`) 编解码
//!
//! 数据流：
//!
//! ```text
//! 读取: 文本 ──ini──> BcSection ──decoder/resolver──> BoundaryPlan ──apply──> Network
//! 写出: Network ──encoder──> BcSection ──ini──> 文本
//! ```
//!
//! - [`ini`]: 分词与写出
//! - [`section`]: 段、属性与物理量列
//! - [`quantity`]: 物理量关键字表
//! - [`time_axis`]: `<粒度> since <参考时间>` 单位编解码
//! - [`decoder`]: 恒定值 / 时间序列 / Q-H 表 / 实时 解码
//! - [`resolver`]: 边界目标与检查井出口隔间解析
//! - [`reader`]: 边界段读取与错误聚合
//! - [`lateral`]: 旁侧入流读取
//! - [`encoder`]: 写出

pub mod decoder;
pub mod encoder;
pub mod ini;
pub mod lateral;
pub mod quantity;
pub mod reader;
pub mod resolver;
pub mod section;
pub mod time_axis;

pub use decoder::{
    decode_boundary, decode_lateral, BoundaryValue, DecodedBoundary, FunctionType, LateralValue,
};
pub use encoder::{
    encode_boundary, encode_boundary_file, encode_lateral, general_section, write_boundary_file,
};
pub use ini::{format_sections, parse_sections, read_sections, write_sections};
pub use lateral::{
    apply_lateral_records, decode_lateral_sections, lateral_records, read_lateral_file,
    LateralRecord, LateralRecords,
};
pub use quantity::{ForcingKind, Quantity};
pub use reader::{
    plan_boundary_sections, read_boundary_file, read_boundary_sections, BoundaryMutation,
    BoundaryPlan, BoundaryReadSummary, OutletUpdate, SkipReason, SkippedSection,
};
pub use resolver::{resolve_outlet, resolve_target, OutletResolution};
pub use section::{BcProperty, BcSection, QuantityColumn};
pub use time_axis::{TimeAxis, TimeGranularity};
