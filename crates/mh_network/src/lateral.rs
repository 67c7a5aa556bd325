// crates/mh_network/src/lateral.rs

//! 旁侧入流数据

use serde::{Deserialize, Serialize};

use crate::function::{QhTable, TimeSeries};

/// 旁侧入流数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateralDataType {
    /// 恒定流量
    #[default]
    FlowConstant,
    /// 流量时间序列
    FlowTimeSeries,
    /// Q-H 关系表
    FlowWaterLevelTable,
    /// 实时控制（由外部驱动，无数据表）
    FlowRealTime,
}

/// 旁侧入流
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateralSourceData {
    /// 名称
    pub name: String,

    /// 数据类型
    #[serde(default)]
    pub data_type: LateralDataType,

    /// 恒定流量 [m³/s]
    #[serde(default)]
    pub flow: f64,

    /// 流量时间序列
    #[serde(default)]
    pub time_series: Option<TimeSeries>,

    /// Q-H 关系表
    #[serde(default)]
    pub qh_table: Option<QhTable>,
}

impl LateralSourceData {
    /// 创建恒定零流量的旁侧入流
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: LateralDataType::FlowConstant,
            flow: 0.0,
            time_series: None,
            qh_table: None,
        }
    }
}
