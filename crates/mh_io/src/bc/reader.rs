// crates/mh_io/src/bc/reader.rs

//! 边界条件读取
//!
//! 读取分两步：
//!
//! 1. [`plan_boundary_sections`]：纯函数，逐段解析目标、解码值，
//!    产出 [`BoundaryPlan`]（待应用的修改 + 跳过的段 + 段错误）；
//! 2. [`BoundaryPlan::apply`]：将修改写入管网。
//!
//! [`read_boundary_sections`] / [`read_boundary_file`] 组合两步：
//! 应用所有有效段后，若有段出错则返回一个聚合错误。
//! 需要原子提交的调用方应直接使用计划，在应用前检查 `errors`。

use std::collections::HashMap;
use std::path::Path;

use mh_config::BcConfig;
use mh_network::Network;
use tracing::{debug, info, warn};

use crate::bc::decoder::{decode_boundary, BoundaryValue, DecodedBoundary, FunctionType};
use crate::bc::ini::read_sections;
use crate::bc::resolver::{apply_outlet, resolve_outlet, resolve_target, OutletResolution};
use crate::bc::section::{keys, BcSection, HEADER_BOUNDARY, HEADER_FORCING};
use crate::error::{BcError, IoError, IoResult, SectionError, SectionErrors};

// ============================================================
// 计划类型
// ============================================================

/// 出口隔间更新
#[derive(Debug, Clone, PartialEq)]
pub struct OutletUpdate {
    /// 检查井节点名称
    pub node_name: String,
    /// 出口解析结果
    pub resolution: OutletResolution,
    /// 写入出口的地表水位（仅恒定水位边界）
    pub surface_water_level: Option<f64>,
}

/// 单个段产生的修改
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryMutation {
    /// 段名称
    pub section_name: String,
    /// 目标边界在 `Network::boundary_conditions` 中的索引
    pub boundary_index: usize,
    /// 解码结果
    pub decoded: DecodedBoundary,
    /// 出口隔间更新
    pub outlet: Option<OutletUpdate>,
}

impl BoundaryMutation {
    /// 写入管网，目标不存在时返回 `false`
    pub fn apply(&self, network: &mut Network) -> bool {
        let Some(boundary) = network.boundary_conditions.get_mut(self.boundary_index) else {
            return false;
        };

        let data_type = self.decoded.data_type;
        boundary.data_type = data_type;
        match &self.decoded.value {
            BoundaryValue::Scalar(v) if data_type.is_water_level() => boundary.water_level = *v,
            BoundaryValue::Scalar(v) => boundary.flow = *v,
            BoundaryValue::TimeSeries(series) => boundary.time_series = Some(series.clone()),
            BoundaryValue::Table(table) => boundary.qh_table = Some(table.clone()),
        }

        if let Some(outlet) = &self.outlet {
            if let Some(node) = network.node_mut(&outlet.node_name) {
                apply_outlet(node, outlet.resolution, outlet.surface_water_level);
            }
        }

        true
    }
}

/// 段被跳过的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// 没有对应的边界
    UnknownTarget,
    /// 含盐度列，由其他子系统处理
    Salinity,
    /// 模型级段
    ModelWide,
}

/// 被跳过的段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSection {
    /// 段名称
    pub name: String,
    /// 段标题所在行号
    pub line: usize,
    /// 原因
    pub reason: SkipReason,
}

/// 读取计划
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryPlan {
    /// 待应用的修改，按段顺序
    pub mutations: Vec<BoundaryMutation>,
    /// 被跳过的段
    pub skipped: Vec<SkippedSection>,
    /// 段错误
    pub errors: SectionErrors,
}

impl BoundaryPlan {
    /// 是否没有段错误
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// 应用所有修改，返回成功应用的数量
    pub fn apply(&self, network: &mut Network) -> usize {
        self.mutations
            .iter()
            .filter(|m| m.apply(network))
            .count()
    }
}

/// 读取结果摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryReadSummary {
    /// 应用的段数
    pub applied: usize,
    /// 被跳过的段
    pub skipped: Vec<SkippedSection>,
}

// ============================================================
// 计划
// ============================================================

/// 是否为边界段标题（`Boundary` 或 `forcing`，不区分大小写）
#[inline]
pub fn is_boundary_header(section: &BcSection) -> bool {
    section.header_is(HEADER_BOUNDARY) || section.header_is(HEADER_FORCING)
}

/// 生成读取计划，不修改管网
///
/// 只有模型级段的函数类型无法识别时返回错误；其余段错误记录在
/// [`BoundaryPlan::errors`] 中。
pub fn plan_boundary_sections(
    sections: &[BcSection],
    network: &Network,
    config: &BcConfig,
) -> IoResult<BoundaryPlan> {
    let mut plan = BoundaryPlan::default();
    // 每个检查井在本计划中已决定提升的隔间
    let mut planned_outlets: HashMap<String, Vec<usize>> = HashMap::new();

    for section in sections.iter().filter(|s| is_boundary_header(s)) {
        let Some(name) = section.name() else {
            plan.errors.push(SectionError::new(
                section,
                "",
                BcError::MissingProperty { key: keys::NAME },
            ));
            continue;
        };

        if name.eq_ignore_ascii_case(&config.model_wide_name) {
            handle_model_wide(section, name)?;
            plan.skipped.push(skipped(section, name, SkipReason::ModelWide));
            continue;
        }

        let Some(boundary_index) =
            resolve_target(network, name, section.property(keys::MANHOLE_NAME))
        else {
            warn!("no boundary data available for {}", name);
            plan.skipped.push(skipped(section, name, SkipReason::UnknownTarget));
            continue;
        };

        if section.has_salinity() {
            debug!("段 {} 含盐度数据, 跳过", name);
            plan.skipped.push(skipped(section, name, SkipReason::Salinity));
            continue;
        }

        match plan_section(section, name, boundary_index, network, &mut planned_outlets) {
            Ok(mutation) => plan.mutations.push(mutation),
            Err(error) => plan.errors.push(SectionError::new(section, name, error)),
        }
    }

    Ok(plan)
}

fn skipped(section: &BcSection, name: &str, reason: SkipReason) -> SkippedSection {
    SkippedSection {
        name: name.to_string(),
        line: section.line,
        reason,
    }
}

fn plan_section(
    section: &BcSection,
    name: &str,
    boundary_index: usize,
    network: &Network,
    planned_outlets: &mut HashMap<String, Vec<usize>>,
) -> Result<BoundaryMutation, BcError> {
    let decoded = decode_boundary(section)?;

    let node_name = &network.boundary_conditions[boundary_index].node_name;
    let outlet = match network.node(node_name) {
        Some(node) if node.is_manhole() && decoded.data_type.is_water_level() => {
            let planned = planned_outlets.entry(node.name.clone()).or_default();
            let resolution = resolve_outlet(node, name, planned)?;
            if resolution.promotes() && !planned.contains(&resolution.compartment_index()) {
                planned.push(resolution.compartment_index());
            }
            Some(OutletUpdate {
                node_name: node.name.clone(),
                resolution,
                surface_water_level: decoded.water_level_constant(),
            })
        }
        _ => None,
    };

    Ok(BoundaryMutation {
        section_name: name.to_string(),
        boundary_index,
        decoded,
        outlet,
    })
}

/// 模型级段（风、气象）
///
/// 恒定值和 Q-H 表被接受但不产生效果；风速、风向时间序列被识别，
/// 目前同样不产生效果。函数类型缺失或无法识别时整个读取失败。
fn handle_model_wide(section: &BcSection, name: &str) -> IoResult<()> {
    let raw = section.property(keys::FUNCTION).unwrap_or_default();
    let function =
        FunctionType::parse(raw).ok_or_else(|| IoError::UnsupportedModelWideFunction {
            name: name.to_string(),
            function: raw.to_string(),
        })?;

    match function {
        FunctionType::Constant | FunctionType::QhTable => {
            debug!("模型级段 {} ({}) 已忽略", name, function.keyword());
        }
        FunctionType::TimeSeries => {
            for column in &section.table {
                if column.known_quantity().is_some_and(|q| q.is_wind()) {
                    debug!("模型级风场时间序列 {} 暂不处理", column.quantity);
                }
            }
        }
    }

    Ok(())
}

// ============================================================
// 读取
// ============================================================

/// 读取段并应用到管网
///
/// 所有有效段都会被应用；之后若有段出错，返回
/// [`IoError::SectionsFailed`]，其消息包含每个出错段。
pub fn read_boundary_sections(
    sections: &[BcSection],
    network: &mut Network,
    config: &BcConfig,
) -> IoResult<BoundaryReadSummary> {
    let plan = plan_boundary_sections(sections, network, config)?;
    let applied = plan.apply(network);

    let BoundaryPlan {
        skipped, errors, ..
    } = plan;

    if !errors.is_empty() {
        warn!("{} 个边界段处理失败", errors.len());
    }
    errors.into_result()?;

    info!("应用 {} 个边界段, 跳过 {} 个", applied, skipped.len());
    Ok(BoundaryReadSummary { applied, skipped })
}

/// 读取边界条件文件并应用到管网
pub fn read_boundary_file<P: AsRef<Path>>(
    path: P,
    network: &mut Network,
    config: &BcConfig,
) -> IoResult<BoundaryReadSummary> {
    let sections = read_sections(path)?;
    read_boundary_sections(&sections, network, config)
}
