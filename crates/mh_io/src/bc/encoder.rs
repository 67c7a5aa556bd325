// crates/mh_io/src/bc/encoder.rs

//! 边界条件写出
//!
//! 将领域对象编码为段，按数据类型选择表格：
//!
//! - 恒定值：单列单行
//! - 时间序列：第 0 列为相对起始时间的分钟数，第 1 列为数值
//! - Q-H 表：第 0 列水位，第 1 列流量
//!
//! 格式要求每列至少一行数据，空序列和空表以零值补齐而不是报错。

use std::path::Path;

use chrono::NaiveDateTime;
use mh_config::BcConfig;
use mh_network::{
    BoundaryDataType, BoundaryNodeData, InterpolationType, LateralDataType, LateralSourceData,
    Network, QhTable, TimeSeries,
};
use tracing::debug;

use crate::bc::decoder::{FunctionType, REALTIME_KEYWORD};
use crate::bc::ini::write_sections;
use crate::bc::quantity::{self, QuantityDescriptor};
use crate::bc::section::{keys, BcSection, QuantityColumn, HEADER_BOUNDARY, HEADER_GENERAL, HEADER_LATERAL};
use crate::bc::time_axis::{encode_offsets, encode_unit};
use crate::error::IoResult;

// ============================================================
// 表格构造
// ============================================================

/// 恒定值表：单列单行
pub fn constant_table(descriptor: QuantityDescriptor, value: f64) -> Vec<QuantityColumn> {
    vec![QuantityColumn::from_numbers(
        descriptor.quantity,
        descriptor.unit,
        &[value],
    )]
}

/// 时间序列表
///
/// 空序列写出单个 `0.0` 偏移；数值列以零补齐到与时间列等长。
pub fn time_series_table(
    series: Option<&TimeSeries>,
    start: NaiveDateTime,
    descriptor: QuantityDescriptor,
) -> Vec<QuantityColumn> {
    let times = series.map(TimeSeries::times).unwrap_or_default();
    let mut offsets = encode_offsets(start, &times);
    if offsets.is_empty() {
        debug!("时间序列为空, 写出单个零偏移");
        offsets.push(0.0);
    }

    let mut values = series.map(TimeSeries::values).unwrap_or_default();
    values.resize(offsets.len(), 0.0);

    vec![
        QuantityColumn::from_numbers(quantity::TIME.quantity, encode_unit(start), &offsets),
        QuantityColumn::from_numbers(descriptor.quantity, descriptor.unit, &values),
    ]
}

/// Q-H 表：两列都为空时写出一行零值
pub fn qh_table_columns(table: Option<&QhTable>, discharge: QuantityDescriptor) -> Vec<QuantityColumn> {
    let (mut levels, mut discharges) = table
        .map(|t| (t.levels(), t.discharges()))
        .unwrap_or_default();

    if levels.is_empty() && discharges.is_empty() {
        debug!("Q-H 表为空, 写出一行零值");
        levels.push(0.0);
        discharges.push(0.0);
    }

    vec![
        QuantityColumn::from_numbers(
            quantity::QH_WATER_LEVEL.quantity,
            quantity::QH_WATER_LEVEL.unit,
            &levels,
        ),
        QuantityColumn::from_numbers(discharge.quantity, discharge.unit, &discharges),
    ]
}

// ============================================================
// 段构造
// ============================================================

fn new_section(header: &str, name: &str, function: &str) -> BcSection {
    let mut section = BcSection::new(header);
    section.set_property(keys::NAME, name);
    section.set_property(keys::FUNCTION, function);
    section
}

/// 写入时间序列的插值与周期属性
///
/// `periodic` 只在外推类型为周期时写出，且值为 `true`。
fn push_series_properties(section: &mut BcSection, series: Option<&TimeSeries>) {
    let interpolation = series.map(TimeSeries::interpolation).unwrap_or_default();
    let keyword = match interpolation {
        InterpolationType::Constant => "block-from",
        InterpolationType::Linear => "linear",
    };
    section.set_property(keys::TIME_INTERPOLATION, keyword);

    if series.is_some_and(TimeSeries::is_periodic) {
        section.set_property(keys::PERIODIC, "true");
    }
}

fn push_table(section: &mut BcSection, columns: Vec<QuantityColumn>) {
    for column in columns {
        section.push_column(column);
    }
}

/// 编码边界，数据类型为 `None` 时不产生段
pub fn encode_boundary(boundary: &BoundaryNodeData, start: NaiveDateTime) -> Option<BcSection> {
    let name = boundary.feature_name();

    let section = match boundary.data_type {
        BoundaryDataType::None => return None,
        BoundaryDataType::FlowConstant | BoundaryDataType::WaterLevelConstant => {
            let (descriptor, value) = if boundary.data_type.is_water_level() {
                (quantity::BOUNDARY_WATER_LEVEL, boundary.water_level)
            } else {
                (quantity::BOUNDARY_DISCHARGE, boundary.flow)
            };
            let mut section = new_section(HEADER_BOUNDARY, name, FunctionType::Constant.keyword());
            push_table(&mut section, constant_table(descriptor, value));
            section
        }
        BoundaryDataType::FlowTimeSeries | BoundaryDataType::WaterLevelTimeSeries => {
            let descriptor = if boundary.data_type.is_water_level() {
                quantity::BOUNDARY_WATER_LEVEL
            } else {
                quantity::BOUNDARY_DISCHARGE
            };
            let series = boundary.time_series.as_ref();
            let mut section =
                new_section(HEADER_BOUNDARY, name, FunctionType::TimeSeries.keyword());
            push_series_properties(&mut section, series);
            push_table(&mut section, time_series_table(series, start, descriptor));
            section
        }
        BoundaryDataType::FlowWaterLevelTable => {
            let mut section = new_section(HEADER_BOUNDARY, name, FunctionType::QhTable.keyword());
            push_table(
                &mut section,
                qh_table_columns(boundary.qh_table.as_ref(), quantity::QH_DISCHARGE),
            );
            section
        }
    };

    Some(section)
}

/// 编码旁侧入流，实时模式写出 `function = realtime` 且不带数据表
pub fn encode_lateral(lateral: &LateralSourceData, start: NaiveDateTime) -> BcSection {
    let name = lateral.name.as_str();

    match lateral.data_type {
        LateralDataType::FlowConstant => {
            let mut section = new_section(HEADER_LATERAL, name, FunctionType::Constant.keyword());
            push_table(&mut section, constant_table(quantity::LATERAL_DISCHARGE, lateral.flow));
            section
        }
        LateralDataType::FlowTimeSeries => {
            let series = lateral.time_series.as_ref();
            let mut section = new_section(HEADER_LATERAL, name, FunctionType::TimeSeries.keyword());
            push_series_properties(&mut section, series);
            push_table(
                &mut section,
                time_series_table(series, start, quantity::LATERAL_DISCHARGE),
            );
            section
        }
        LateralDataType::FlowWaterLevelTable => {
            let mut section = new_section(HEADER_LATERAL, name, FunctionType::QhTable.keyword());
            push_table(
                &mut section,
                qh_table_columns(lateral.qh_table.as_ref(), quantity::LATERAL_DISCHARGE),
            );
            section
        }
        LateralDataType::FlowRealTime => new_section(HEADER_LATERAL, name, REALTIME_KEYWORD),
    }
}

// ============================================================
// 整个文件
// ============================================================

/// `[General]` 文件头段
pub fn general_section(config: &BcConfig) -> BcSection {
    let mut section = BcSection::new(HEADER_GENERAL);
    section.set_property(keys::FILE_VERSION, config.file_version.as_str());
    section.set_property(keys::FILE_TYPE, config.file_type.as_str());
    section
}

/// 编码管网中的全部边界与旁侧入流
pub fn encode_boundary_file(network: &Network, config: &BcConfig) -> Vec<BcSection> {
    let start = config.reference_time;
    let mut sections = Vec::new();

    if config.write_general_section {
        sections.push(general_section(config));
    }
    sections.extend(
        network
            .boundary_conditions
            .iter()
            .filter_map(|bc| encode_boundary(bc, start)),
    );
    sections.extend(
        network
            .lateral_sources
            .iter()
            .map(|lateral| encode_lateral(lateral, start)),
    );

    sections
}

/// 写出边界条件文件
pub fn write_boundary_file<P: AsRef<Path>>(path: P, network: &Network, config: &BcConfig) -> IoResult<()> {
    write_sections(path, &encode_boundary_file(network, config))
}
