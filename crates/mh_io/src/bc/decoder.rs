// crates/mh_io/src/bc/decoder.rs

//! 段值解码器
//!
//! 将一个段的物理量表按 `function` 属性解码为领域值：
//!
//! | function     | 列布局                          | 结果              |
//! |--------------|---------------------------------|-------------------|
//! | `constant`   | 第 0 列首值                     | 标量              |
//! | `timeseries` | 第 0 列时间轴，第 1 列数值      | 时间序列          |
//! | `qhtable`    | 第 0 列水位，第 1 列流量        | Q-H 关系表        |
//!
//! 旁侧入流额外支持实时模式：缺失或无法识别的 `function` 都解码为
//! [`LateralValue::RealTime`]。
//!
//! 解码是纯函数，不修改任何领域对象。

use mh_network::{
    BoundaryDataType, ExtrapolationType, InterpolationType, LateralDataType, QhTable, TimeSeries,
};
use tracing::warn;

use crate::bc::quantity::{forcing_kind, ForcingKind};
use crate::bc::section::{keys, BcSection, QuantityColumn};
use crate::bc::time_axis::TimeAxis;
use crate::error::{BcError, BcResult};

// ============================================================
// 函数类型
// ============================================================

/// 函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionType {
    /// 恒定值
    Constant,
    /// 时间序列
    TimeSeries,
    /// Q-H 关系表
    QhTable,
}

impl FunctionType {
    /// 解析关键字（不区分大小写）
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "constant" => Some(Self::Constant),
            "timeseries" => Some(Self::TimeSeries),
            "qhtable" => Some(Self::QhTable),
            _ => None,
        }
    }

    /// 写出时使用的关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::TimeSeries => "timeseries",
            Self::QhTable => "qhtable",
        }
    }

    /// 读取段的 `function` 属性
    pub fn from_section(section: &BcSection) -> BcResult<Self> {
        let raw = section
            .property(keys::FUNCTION)
            .ok_or(BcError::MissingProperty {
                key: keys::FUNCTION,
            })?;
        Self::parse(raw).ok_or_else(|| BcError::UnknownFunction {
            function: raw.to_string(),
        })
    }
}

/// 实时旁侧入流写出的函数关键字
pub const REALTIME_KEYWORD: &str = "realtime";

// ============================================================
// 解码结果
// ============================================================

/// 边界值
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryValue {
    /// 恒定值
    Scalar(f64),
    /// 时间序列
    TimeSeries(TimeSeries),
    /// Q-H 关系表
    Table(QhTable),
}

/// 旁侧入流值
#[derive(Debug, Clone, PartialEq)]
pub enum LateralValue {
    /// 恒定流量
    Scalar(f64),
    /// 流量时间序列
    TimeSeries(TimeSeries),
    /// Q-H 关系表
    Table(QhTable),
    /// 外部实时驱动，无数据
    RealTime,
}

impl LateralValue {
    /// 对应的领域数据类型
    pub fn data_type(&self) -> LateralDataType {
        match self {
            Self::Scalar(_) => LateralDataType::FlowConstant,
            Self::TimeSeries(_) => LateralDataType::FlowTimeSeries,
            Self::Table(_) => LateralDataType::FlowWaterLevelTable,
            Self::RealTime => LateralDataType::FlowRealTime,
        }
    }
}

/// 解码后的边界：数据类型标签 + 值
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBoundary {
    /// 数据类型标签
    pub data_type: BoundaryDataType,
    /// 值
    pub value: BoundaryValue,
}

impl DecodedBoundary {
    /// 水位恒定值（用于出口隔间的地表水位）
    pub fn water_level_constant(&self) -> Option<f64> {
        match (self.data_type, &self.value) {
            (BoundaryDataType::WaterLevelConstant, BoundaryValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }
}

// ============================================================
// 各变体解码
// ============================================================

fn column(section: &BcSection, index: usize, expected: usize) -> BcResult<&QuantityColumn> {
    section.table.get(index).ok_or(BcError::MissingColumn {
        expected,
        actual: section.table.len(),
    })
}

fn check_lengths(first: &QuantityColumn, second: &QuantityColumn) -> BcResult<()> {
    if first.len() != second.len() {
        return Err(BcError::ColumnLengthMismatch {
            first: first.quantity.clone(),
            first_len: first.len(),
            second: second.quantity.clone(),
            second_len: second.len(),
        });
    }
    Ok(())
}

/// 解码恒定值：第 0 列首值
pub fn decode_constant(section: &BcSection) -> BcResult<f64> {
    column(section, 0, 1)?.first_number()
}

/// 解码 Q-H 关系表：第 0 列水位，第 1 列流量，任一值失败则整表失败
pub fn decode_qh_table(section: &BcSection) -> BcResult<QhTable> {
    let levels = column(section, 0, 2)?;
    let discharges = column(section, 1, 2)?;
    check_lengths(levels, discharges)?;

    let levels = levels.numbers()?;
    let discharges = discharges.numbers()?;
    Ok(QhTable::from_columns(&levels, &discharges))
}

/// 解码时间序列：第 0 列为时间轴，第 1 列为数值
///
/// 外推类型默认 `Linear`，仅当 `periodic` 属性恰为 `"true"` 时为 `Periodic`。
pub fn decode_time_series(section: &BcSection) -> BcResult<TimeSeries> {
    let time_column = column(section, 0, 2)?;
    let value_column = column(section, 1, 2)?;
    check_lengths(time_column, value_column)?;

    let axis = TimeAxis::decode(&time_column.unit)?;
    let times = axis.decode_offsets(time_column)?;
    let values = value_column.numbers()?;

    let extrapolation = if section.property(keys::PERIODIC) == Some("true") {
        ExtrapolationType::Periodic
    } else {
        ExtrapolationType::Linear
    };

    Ok(TimeSeries::from_points(times.into_iter().zip(values).collect())
        .with_extrapolation(extrapolation)
        .with_interpolation(time_interpolation(section)))
}

/// 解析 `timeInterpolation` 属性
pub fn time_interpolation(section: &BcSection) -> InterpolationType {
    let Some(raw) = section.property(keys::TIME_INTERPOLATION) else {
        return InterpolationType::Linear;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "linear" => InterpolationType::Linear,
        "blockfrom" | "block-from" => InterpolationType::Constant,
        "blockto" | "block-to" => {
            warn!(
                "段 {} 的插值类型 {} 按 block-from 处理",
                section.name().unwrap_or_default(),
                raw
            );
            InterpolationType::Constant
        }
        _ => {
            warn!(
                "段 {} 的插值类型 {} 无法识别, 使用 linear",
                section.name().unwrap_or_default(),
                raw
            );
            InterpolationType::Linear
        }
    }
}

// ============================================================
// 边界 / 旁侧入流
// ============================================================

fn boundary_data_type(function: FunctionType, kind: ForcingKind) -> BoundaryDataType {
    match (function, kind) {
        (FunctionType::Constant, ForcingKind::Flow) => BoundaryDataType::FlowConstant,
        (FunctionType::Constant, ForcingKind::WaterLevel) => BoundaryDataType::WaterLevelConstant,
        (FunctionType::TimeSeries, ForcingKind::Flow) => BoundaryDataType::FlowTimeSeries,
        (FunctionType::TimeSeries, ForcingKind::WaterLevel) => {
            BoundaryDataType::WaterLevelTimeSeries
        }
        (FunctionType::QhTable, _) => BoundaryDataType::FlowWaterLevelTable,
    }
}

/// 解码边界段
///
/// 流量 / 水位子类型由物理量决定：恒定值看第 0 列，时间序列看第 1 列。
pub fn decode_boundary(section: &BcSection) -> BcResult<DecodedBoundary> {
    let function = FunctionType::from_section(section)?;

    let decoded = match function {
        FunctionType::Constant => {
            let kind = forcing_kind(&column(section, 0, 1)?.quantity)?;
            DecodedBoundary {
                data_type: boundary_data_type(function, kind),
                value: BoundaryValue::Scalar(decode_constant(section)?),
            }
        }
        FunctionType::TimeSeries => {
            let kind = forcing_kind(&column(section, 1, 2)?.quantity)?;
            DecodedBoundary {
                data_type: boundary_data_type(function, kind),
                value: BoundaryValue::TimeSeries(decode_time_series(section)?),
            }
        }
        FunctionType::QhTable => DecodedBoundary {
            data_type: BoundaryDataType::FlowWaterLevelTable,
            value: BoundaryValue::Table(decode_qh_table(section)?),
        },
    };

    Ok(decoded)
}

/// 解码旁侧入流段
pub fn decode_lateral(section: &BcSection) -> BcResult<LateralValue> {
    let function = section.property(keys::FUNCTION).and_then(FunctionType::parse);

    let value = match function {
        Some(FunctionType::Constant) => LateralValue::Scalar(decode_constant(section)?),
        Some(FunctionType::TimeSeries) => LateralValue::TimeSeries(decode_time_series(section)?),
        Some(FunctionType::QhTable) => LateralValue::Table(decode_qh_table(section)?),
        None => LateralValue::RealTime,
    };

    Ok(value)
}
