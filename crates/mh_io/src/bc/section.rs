// crates/mh_io/src/bc/section.rs

//! 边界条件段与物理量列
//!
//! 分词器为每个逻辑段产出一个 [`BcSection`]：段标题、有序属性表
//! （键不区分大小写，可带注释说明）以及若干 [`QuantityColumn`]。
//! 列中的值保持为原始文本，由解码器负责数值解析。

use crate::bc::quantity::Quantity;
use crate::error::{BcError, BcResult};

/// 边界段标题
pub const HEADER_BOUNDARY: &str = "Boundary";
/// 通用强迫段标题
pub const HEADER_FORCING: &str = "forcing";
/// 旁侧入流段标题
pub const HEADER_LATERAL: &str = "LateralDischarge";
/// 文件头段标题
pub const HEADER_GENERAL: &str = "General";

/// 已知的属性键
pub mod keys {
    /// 段名称
    pub const NAME: &str = "name";
    /// 函数类型
    pub const FUNCTION: &str = "function";
    /// 时间插值类型
    pub const TIME_INTERPOLATION: &str = "timeInterpolation";
    /// 周期标志
    pub const PERIODIC: &str = "periodic";
    /// 检查井名称
    pub const MANHOLE_NAME: &str = "manHoleName";
    /// 物理量（开启新列）
    pub const QUANTITY: &str = "quantity";
    /// 单位（作用于最近一列）
    pub const UNIT: &str = "unit";
    /// 文件版本
    pub const FILE_VERSION: &str = "fileVersion";
    /// 文件类型
    pub const FILE_TYPE: &str = "fileType";
}

/// 段属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BcProperty {
    /// 键
    pub key: String,
    /// 值
    pub value: String,
    /// 行尾注释
    pub description: Option<String>,
}

impl BcProperty {
    /// 创建不带注释的属性
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }
}

/// 物理量列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityColumn {
    /// 物理量标识
    pub quantity: String,
    /// 单位字符串，时间列中编码参考时间
    pub unit: String,
    /// 原始值
    pub values: Vec<String>,
}

impl QuantityColumn {
    /// 创建空列
    pub fn new(quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            unit: unit.into(),
            values: Vec::new(),
        }
    }

    /// 由数值创建列，数值按最短往返格式写出
    pub fn from_numbers(quantity: impl Into<String>, unit: impl Into<String>, values: &[f64]) -> Self {
        Self {
            quantity: quantity.into(),
            unit: unit.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 对应的已知物理量
    pub fn known_quantity(&self) -> Option<Quantity> {
        Quantity::from_keyword(&self.quantity)
    }

    /// 解析第一个值
    pub fn first_number(&self) -> BcResult<f64> {
        let raw = self.values.first().ok_or_else(|| BcError::EmptyColumn {
            quantity: self.quantity.clone(),
        })?;
        parse_number(&self.quantity, raw)
    }

    /// 解析整列，任一值失败则整列失败
    pub fn numbers(&self) -> BcResult<Vec<f64>> {
        self.values
            .iter()
            .map(|raw| parse_number(&self.quantity, raw))
            .collect()
    }
}

/// 按区域无关格式解析十进制数
///
/// 接受符号、小数点和指数；拒绝 `inf`、`NaN` 等非有限值。
pub fn parse_number(quantity: &str, raw: &str) -> BcResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(BcError::ValueParse {
            quantity: quantity.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// 边界条件段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BcSection {
    /// 段标题
    pub header: String,
    /// 段标题所在行号（写出路径构造的段为 0）
    pub line: usize,
    /// 有序属性
    properties: Vec<BcProperty>,
    /// 物理量列
    pub table: Vec<QuantityColumn>,
}

impl BcSection {
    /// 创建空段
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            line: 0,
            properties: Vec::new(),
            table: Vec::new(),
        }
    }

    /// 设置行号
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// 标题是否匹配（不区分大小写）
    #[inline]
    pub fn header_is(&self, header: &str) -> bool {
        self.header.eq_ignore_ascii_case(header)
    }

    /// 属性列表
    pub fn properties(&self) -> &[BcProperty] {
        &self.properties
    }

    /// 查找属性（不区分大小写）
    pub fn property_entry(&self, key: &str) -> Option<&BcProperty> {
        self.properties
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
    }

    /// 属性值
    pub fn property(&self, key: &str) -> Option<&str> {
        self.property_entry(key).map(|p| p.value.as_str())
    }

    /// 追加属性，不检查重复
    pub fn push_property(&mut self, property: BcProperty) {
        self.properties.push(property);
    }

    /// 设置属性，已存在时替换值并保留位置
    pub fn set_property(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .properties
            .iter_mut()
            .find(|p| p.key.eq_ignore_ascii_case(key))
        {
            Some(existing) => existing.value = value,
            None => self.properties.push(BcProperty::new(key, value)),
        }
    }

    /// 段名称
    pub fn name(&self) -> Option<&str> {
        self.property(keys::NAME)
    }

    /// 追加列
    pub fn push_column(&mut self, column: QuantityColumn) {
        self.table.push(column);
    }

    /// 是否含有盐度列
    pub fn has_salinity(&self) -> bool {
        self.table
            .iter()
            .any(|c| c.known_quantity() == Some(Quantity::Salinity))
    }

    /// 数据行数（最长列）
    pub fn row_count(&self) -> usize {
        self.table.iter().map(QuantityColumn::len).max().unwrap_or(0)
    }
}
