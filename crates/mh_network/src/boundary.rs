// crates/mh_network/src/boundary.rs

//! 节点边界数据
//!
//! 边界数据由外部预先创建，并通过节点名称与节点关联。
//! 读取路径只会查找并修改已有的边界数据，不会创建新对象。

use serde::{Deserialize, Serialize};

use crate::function::{QhTable, TimeSeries};

/// 边界数据类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryDataType {
    /// 无边界数据
    #[default]
    None,
    /// 恒定流量
    FlowConstant,
    /// 流量时间序列
    FlowTimeSeries,
    /// 恒定水位
    WaterLevelConstant,
    /// 水位时间序列
    WaterLevelTimeSeries,
    /// Q-H 关系表
    FlowWaterLevelTable,
}

impl BoundaryDataType {
    /// 是否为恒定值类型
    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::FlowConstant | Self::WaterLevelConstant)
    }

    /// 是否为时间序列类型
    #[inline]
    pub fn is_time_series(&self) -> bool {
        matches!(self, Self::FlowTimeSeries | Self::WaterLevelTimeSeries)
    }

    /// 是否为水位边界
    #[inline]
    pub fn is_water_level(&self) -> bool {
        matches!(self, Self::WaterLevelConstant | Self::WaterLevelTimeSeries)
    }
}

impl std::fmt::Display for BoundaryDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::FlowConstant => "FlowConstant",
            Self::FlowTimeSeries => "FlowTimeSeries",
            Self::WaterLevelConstant => "WaterLevelConstant",
            Self::WaterLevelTimeSeries => "WaterLevelTimeSeries",
            Self::FlowWaterLevelTable => "FlowWaterLevelTable",
        };
        write!(f, "{}", name)
    }
}

/// 节点边界数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryNodeData {
    /// 关联节点名称（即边界的要素名称）
    pub node_name: String,

    /// 数据类型标签
    #[serde(default)]
    pub data_type: BoundaryDataType,

    /// 恒定流量 [m³/s]
    #[serde(default)]
    pub flow: f64,

    /// 恒定水位 [m]
    #[serde(default)]
    pub water_level: f64,

    /// 流量或水位时间序列
    #[serde(default)]
    pub time_series: Option<TimeSeries>,

    /// Q-H 关系表
    #[serde(default)]
    pub qh_table: Option<QhTable>,
}

impl BoundaryNodeData {
    /// 创建无数据的边界
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            data_type: BoundaryDataType::None,
            flow: 0.0,
            water_level: 0.0,
            time_series: None,
            qh_table: None,
        }
    }

    /// 要素名称
    #[inline]
    pub fn feature_name(&self) -> &str {
        &self.node_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_classes() {
        assert!(BoundaryDataType::FlowConstant.is_constant());
        assert!(BoundaryDataType::WaterLevelTimeSeries.is_time_series());
        assert!(BoundaryDataType::WaterLevelConstant.is_water_level());
        assert!(!BoundaryDataType::FlowWaterLevelTable.is_water_level());
        assert!(!BoundaryDataType::None.is_constant());
    }

    #[test]
    fn test_new_boundary_is_empty() {
        let bc = BoundaryNodeData::new("Node1");
        assert_eq!(bc.feature_name(), "Node1");
        assert_eq!(bc.data_type, BoundaryDataType::None);
        assert!(bc.time_series.is_none());
    }
}
