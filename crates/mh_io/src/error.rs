// crates/mh_io/src/error.rs
//! IO 错误类型定义
//!
//! 分两层：
//! - [`BcError`]: 单个段内的可恢复错误（数值解析、单位解析、缺列等）
//! - [`IoError`]: 文件级错误，读取过程中唯一向调用方抛出的错误类型
//!
//! 段错误不会单独抛出：读取器将其包装为 [`SectionError`]，
//! 累积到 [`SectionErrors`] 中，全部段处理完毕后作为
//! [`IoError::SectionsFailed`] 一次性返回。

use std::fmt;
use std::path::PathBuf;

use mh_foundation::MhError;
use thiserror::Error;

use crate::bc::section::BcSection;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// 段解码结果类型别名
pub type BcResult<T> = Result<T, BcError>;

// ============================================================
// 段级错误
// ============================================================

/// 段解码错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BcError {
    /// 单位字符串不含可识别的时间标记
    #[error("无法识别的时间单位: '{unit}'")]
    UnrecognizedUnit {
        /// 原始单位字符串
        unit: String,
    },

    /// 参考时间格式错误
    #[error("无效的参考时间: '{text}' (期望格式 yyyy-MM-dd HH:mm:ss)")]
    InvalidReferenceTime {
        /// 去掉时间标记后的文本
        text: String,
    },

    /// 数值解析失败
    #[error("物理量 {quantity} 的值 '{value}' 不是有效数字")]
    ValueParse {
        /// 物理量名称
        quantity: String,
        /// 原始文本
        value: String,
    },

    /// 时间偏移超出可表示范围
    #[error("时间偏移 {offset} 超出可表示范围")]
    OffsetOutOfRange {
        /// 原始偏移
        offset: f64,
    },

    /// 缺少物理量列
    #[error("缺少物理量列: 期望至少 {expected} 列, 实际 {actual} 列")]
    MissingColumn {
        /// 期望列数
        expected: usize,
        /// 实际列数
        actual: usize,
    },

    /// 物理量列没有数据
    #[error("物理量 {quantity} 没有数据")]
    EmptyColumn {
        /// 物理量名称
        quantity: String,
    },

    /// 两列行数不同
    #[error("列长度不一致: {first} 有 {first_len} 行, {second} 有 {second_len} 行")]
    ColumnLengthMismatch {
        /// 第一列物理量
        first: String,
        /// 第一列行数
        first_len: usize,
        /// 第二列物理量
        second: String,
        /// 第二列行数
        second_len: usize,
    },

    /// 缺少必需属性
    #[error("缺少属性: {key}")]
    MissingProperty {
        /// 属性名
        key: &'static str,
    },

    /// 函数类型无法识别
    #[error("无法识别的函数类型: '{function}'")]
    UnknownFunction {
        /// 原始函数类型
        function: String,
    },

    /// 物理量没有对应的边界子类型
    #[error("物理量 '{quantity}' 无法映射到流量或水位边界")]
    UnmappedQuantity {
        /// 物理量名称
        quantity: String,
    },

    /// 检查井没有可用作出口的隔间
    #[error("检查井 {manhole} 没有隔间")]
    NoCompartments {
        /// 检查井名称
        manhole: String,
    },
}

/// 带段上下文的错误
#[derive(Debug, Clone, PartialEq)]
pub struct SectionError {
    /// 段标题
    pub header: String,
    /// 段名称（缺失时为空）
    pub name: String,
    /// 段标题所在行号
    pub line: usize,
    /// 具体错误
    pub error: BcError,
}

impl SectionError {
    /// 从段和错误创建
    pub fn new(section: &BcSection, name: impl Into<String>, error: BcError) -> Self {
        Self {
            header: section.header.clone(),
            name: name.into(),
            line: section.line,
            error,
        }
    }
}

impl fmt::Display for SectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "<unnamed>"
        } else {
            self.name.as_str()
        };
        write!(
            f,
            "[{}] {} (第{}行): {}",
            self.header, name, self.line, self.error
        )
    }
}

impl std::error::Error for SectionError {}

/// 有序的段错误累积器
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionErrors {
    errors: Vec<SectionError>,
}

impl SectionErrors {
    /// 创建空累积器
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加错误
    pub fn push(&mut self, error: SectionError) {
        self.errors.push(error);
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// 错误数量
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// 遍历错误
    pub fn iter(&self) -> std::slice::Iter<'_, SectionError> {
        self.errors.iter()
    }

    /// 出错段的名称，按出现顺序
    pub fn names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.name.as_str()).collect()
    }

    /// 无错误时返回 `Ok`，否则转换为聚合错误
    pub fn into_result(self) -> IoResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(IoError::SectionsFailed(self))
        }
    }
}

impl fmt::Display for SectionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

// ============================================================
// 文件级错误
// ============================================================

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 文件路径
        path: PathBuf,
    },

    /// 文件不包含任何段
    #[error("文件不包含任何段: {path}")]
    EmptyFile {
        /// 文件路径
        path: PathBuf,
    },

    /// 读取失败
    #[error("读取文件失败: {path}: {source}")]
    Read {
        /// 文件路径
        path: PathBuf,
        /// 底层 IO 错误
        #[source]
        source: std::io::Error,
    },

    /// 写出失败
    #[error("写出文件失败: {path}: {source}")]
    Write {
        /// 文件路径
        path: PathBuf,
        /// 底层 IO 错误
        #[source]
        source: std::io::Error,
    },

    /// 模型级段的函数类型无法识别
    #[error("模型级段 {name} 的函数类型无法识别: '{function}'")]
    UnsupportedModelWideFunction {
        /// 段名称
        name: String,
        /// 原始函数类型
        function: String,
    },

    /// 一个或多个段处理失败，消息为各段错误按行拼接
    #[error("{0}")]
    SectionsFailed(SectionErrors),
}

impl From<IoError> for MhError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::FileNotFound { path } => MhError::file_not_found(path),
            IoError::EmptyFile { path } => {
                MhError::invalid_input(format!("文件不包含任何段: {}", path.display()))
            }
            IoError::Read { path, source } => {
                MhError::io_with_source(format!("读取文件失败: {}", path.display()), source)
            }
            IoError::Write { path, source } => {
                MhError::io_with_source(format!("写出文件失败: {}", path.display()), source)
            }
            IoError::UnsupportedModelWideFunction { name, function } => MhError::invalid_input(
                format!("模型级段 {name} 的函数类型无法识别: '{function}'"),
            ),
            IoError::SectionsFailed(errors) => match errors.iter().next() {
                Some(first) if errors.len() == 1 => {
                    MhError::parse(first.header.clone(), first.line, first.error.to_string())
                }
                _ => MhError::invalid_input(errors.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_error(name: &str, line: usize) -> SectionError {
        SectionError {
            header: "Boundary".to_string(),
            name: name.to_string(),
            line,
            error: BcError::ValueParse {
                quantity: "waterlevelbnd".to_string(),
                value: "abc".to_string(),
            },
        }
    }

    #[test]
    fn test_section_error_display() {
        let msg = section_error("Node1", 7).to_string();
        assert!(msg.contains("Boundary"));
        assert!(msg.contains("Node1"));
        assert!(msg.contains('7'));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_aggregate_message_is_newline_joined() {
        let mut errors = SectionErrors::new();
        errors.push(section_error("A", 1));
        errors.push(section_error("B", 9));

        let err = errors.into_result().unwrap_err();
        let msg = err.to_string();
        let lines: Vec<_> = msg.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains('A'));
        assert!(lines[1].contains('B'));
    }

    #[test]
    fn test_empty_accumulator_is_ok() {
        assert!(SectionErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_conversion_to_mh_error() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("missing.bc"),
        };
        let mh: MhError = err.into();
        assert!(matches!(mh, MhError::FileNotFound { .. }));

        let mut single = SectionErrors::new();
        single.push(section_error("Node1", 4));
        let mh: MhError = single.into_result().unwrap_err().into();
        assert!(matches!(mh, MhError::ParseError { line: 4, .. }));

        let mut many = SectionErrors::new();
        many.push(section_error("A", 1));
        many.push(section_error("B", 2));
        let mh: MhError = many.into_result().unwrap_err().into();
        assert!(matches!(mh, MhError::InvalidInput { .. }));
    }
}
