// crates/mh_config/src/bc_config.rs

//! BcConfig - 边界条件编解码配置
//!
//! 读取路径使用模型级保留名称区分全局（风、气象）段与要素段；
//! 写出路径使用参考时间编码时间序列的时间列，并决定 `[General]` 段内容。

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// 参考时间的文本格式
pub const REFERENCE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 边界条件编解码配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BcConfig {
    /// 模型级段的保留名称
    #[serde(default = "default_model_wide_name")]
    pub model_wide_name: String,

    /// 写出时间序列时的参考时间
    #[serde(default = "default_reference_time", with = "reference_time")]
    pub reference_time: NaiveDateTime,

    /// `[General]` 段中的文件版本
    #[serde(default = "default_file_version")]
    pub file_version: String,

    /// `[General]` 段中的文件类型
    #[serde(default = "default_file_type")]
    pub file_type: String,

    /// 是否写出 `[General]` 段
    #[serde(default = "default_write_general_section")]
    pub write_general_section: bool,
}

fn default_model_wide_name() -> String { "model_wide".to_string() }
fn default_reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
fn default_file_version() -> String { "1.01".to_string() }
fn default_file_type() -> String { "boundConds".to_string() }
fn default_write_general_section() -> bool { true }

impl Default for BcConfig {
    fn default() -> Self {
        Self {
            model_wide_name: default_model_wide_name(),
            reference_time: default_reference_time(),
            file_version: default_file_version(),
            file_type: default_file_type(),
            write_general_section: default_write_general_section(),
        }
    }
}

impl BcConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;

        let config: BcConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 设置参考时间
    pub fn with_reference_time(mut self, reference_time: NaiveDateTime) -> Self {
        self.reference_time = reference_time;
        self
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_wide_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "model_wide_name",
                &self.model_wide_name,
                "保留名称不能为空",
            ));
        }

        if self.write_general_section {
            if self.file_version.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "file_version",
                    &self.file_version,
                    "文件版本不能为空",
                ));
            }
            if self.file_type.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "file_type",
                    &self.file_type,
                    "文件类型不能为空",
                ));
            }
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}

/// 参考时间按 `yyyy-MM-dd HH:mm:ss` 读写
mod reference_time {
    use super::REFERENCE_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(REFERENCE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(text.trim(), REFERENCE_TIME_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}
