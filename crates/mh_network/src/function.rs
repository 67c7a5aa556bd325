// crates/mh_network/src/function.rs

//! 边界函数对象
//!
//! 提供两类非恒定边界数据的表示：
//! - [`TimeSeries`]: 绝对时间戳 -> 值 的有序序列，带外推和插值类型
//! - [`QhTable`]: 水位 -> 流量 的关系表（率定曲线）
//!
//! # 使用示例
//!
//! ```
//! use chrono::NaiveDate;
//! use mh_network::function::{ExtrapolationType, TimeSeries};
//!
//! let t0 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let series = TimeSeries::from_points(vec![(t0, 1.0)])
//!     .with_extrapolation(ExtrapolationType::Periodic);
//!
//! assert!(series.is_periodic());
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 外推类型
///
/// 定义查询时间超出序列范围时的行为。成功读入的序列默认为 `Linear`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrapolationType {
    /// 不外推
    None,
    /// 线性外推
    #[default]
    Linear,
    /// 周期外推：超出范围时循环回序列开头
    Periodic,
}

/// 逐点插值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationType {
    /// 线性插值
    #[default]
    Linear,
    /// 阶梯保持（block-from）
    Constant,
}

/// 时间序列
///
/// 存储 (时间戳, 值) 点对，点的顺序即文件中的行顺序。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    /// 时间-值点对
    points: Vec<(NaiveDateTime, f64)>,
    /// 时间轴外推类型
    #[serde(default)]
    extrapolation: ExtrapolationType,
    /// 逐点插值类型
    #[serde(default)]
    interpolation: InterpolationType,
}

impl TimeSeries {
    /// 创建空序列
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 (时间, 值) 点对创建
    pub fn from_points(points: Vec<(NaiveDateTime, f64)>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// 设置外推类型
    pub fn with_extrapolation(mut self, extrapolation: ExtrapolationType) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// 设置插值类型
    pub fn with_interpolation(mut self, interpolation: InterpolationType) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// 外推类型
    pub fn extrapolation(&self) -> ExtrapolationType {
        self.extrapolation
    }

    /// 插值类型
    pub fn interpolation(&self) -> InterpolationType {
        self.interpolation
    }

    /// 是否为周期序列
    pub fn is_periodic(&self) -> bool {
        self.extrapolation == ExtrapolationType::Periodic
    }

    /// 追加一个点
    pub fn push(&mut self, time: NaiveDateTime, value: f64) {
        self.points.push((time, value));
    }

    /// 点对引用
    pub fn points(&self) -> &[(NaiveDateTime, f64)] {
        &self.points
    }

    /// 时间戳列表
    pub fn times(&self) -> Vec<NaiveDateTime> {
        self.points.iter().map(|&(t, _)| t).collect()
    }

    /// 值列表
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, v)| v).collect()
    }

    /// 数据点数量
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Q-H 关系表
///
/// 每行为 (水位, 流量)，列顺序固定。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QhTable {
    rows: Vec<(f64, f64)>,
}

impl QhTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 (水位, 流量) 行创建
    pub fn from_rows(rows: Vec<(f64, f64)>) -> Self {
        Self { rows }
    }

    /// 从两列创建，长度不同时按较短列截断
    pub fn from_columns(levels: &[f64], discharges: &[f64]) -> Self {
        Self {
            rows: levels.iter().copied().zip(discharges.iter().copied()).collect(),
        }
    }

    /// 行引用
    pub fn rows(&self) -> &[(f64, f64)] {
        &self.rows
    }

    /// 水位列
    pub fn levels(&self) -> Vec<f64> {
        self.rows.iter().map(|&(h, _)| h).collect()
    }

    /// 流量列
    pub fn discharges(&self) -> Vec<f64> {
        self.rows.iter().map(|&(_, q)| q).collect()
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_extrapolation_is_linear() {
        let series = TimeSeries::from_points(vec![(at(0), 1.0)]);
        assert_eq!(series.extrapolation(), ExtrapolationType::Linear);
        assert!(!series.is_periodic());
    }

    #[test]
    fn test_series_accessors() {
        let mut series = TimeSeries::new();
        series.push(at(0), 1.0);
        series.push(at(1), 2.0);

        assert_eq!(series.len(), 2);
        assert_eq!(series.times(), vec![at(0), at(1)]);
        assert_eq!(series.values(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_qh_table_columns() {
        let table = QhTable::from_columns(&[0.0, 1.0, 2.0], &[10.0, 20.0, 30.0]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.levels(), vec![0.0, 1.0, 2.0]);
        assert_eq!(table.discharges(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_extrapolation_serde() {
        let json = serde_json::to_string(&ExtrapolationType::Periodic).unwrap();
        assert_eq!(json, "\"periodic\"");
        let parsed: ExtrapolationType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ExtrapolationType::Periodic);
    }
}
