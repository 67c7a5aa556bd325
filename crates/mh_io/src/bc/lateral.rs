// crates/mh_io/src/bc/lateral.rs

//! 旁侧入流读取
//!
//! 与边界读取相比没有目标解析：按段顺序产出 `(名称, 值)` 记录，
//! 绑定到领域对象由调用方完成（见 [`apply_lateral_records`]）。
//!
//! [`lateral_records`] 返回惰性迭代器，每次迭代只解码一个段；
//! 重新读取需要重新调用。

use std::path::Path;

use mh_network::{LateralDataType, LateralSourceData, Network};
use tracing::{debug, warn};

use crate::bc::decoder::{decode_lateral, LateralValue};
use crate::bc::ini::read_sections;
use crate::bc::section::{keys, BcSection, HEADER_FORCING, HEADER_LATERAL};
use crate::error::{BcError, IoResult, SectionError, SectionErrors};

/// 旁侧入流记录
#[derive(Debug, Clone, PartialEq)]
pub struct LateralRecord {
    /// 名称
    pub name: String,
    /// 值
    pub value: LateralValue,
}

impl LateralRecord {
    /// 数据类型
    pub fn data_type(&self) -> LateralDataType {
        self.value.data_type()
    }

    /// 写入领域对象
    ///
    /// 数据类型总是被更新；实时模式不携带数据，其余字段保持不变。
    pub fn apply_to(&self, lateral: &mut LateralSourceData) {
        lateral.data_type = self.data_type();
        match &self.value {
            LateralValue::Scalar(v) => lateral.flow = *v,
            LateralValue::TimeSeries(series) => lateral.time_series = Some(series.clone()),
            LateralValue::Table(table) => lateral.qh_table = Some(table.clone()),
            LateralValue::RealTime => {}
        }
    }
}

/// 是否为旁侧入流段标题（`LateralDischarge` 或 `forcing`）
#[inline]
pub fn is_lateral_header(section: &BcSection) -> bool {
    section.header_is(HEADER_LATERAL) || section.header_is(HEADER_FORCING)
}

/// 旁侧入流记录的惰性迭代器
pub struct LateralRecords<'a> {
    sections: std::slice::Iter<'a, BcSection>,
}

impl<'a> Iterator for LateralRecords<'a> {
    type Item = Result<LateralRecord, SectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        for section in self.sections.by_ref() {
            if !is_lateral_header(section) {
                continue;
            }
            if section.has_salinity() {
                debug!("旁侧入流段 {} 含盐度数据, 跳过", section.name().unwrap_or_default());
                continue;
            }
            return Some(decode_record(section));
        }
        None
    }
}

fn decode_record(section: &BcSection) -> Result<LateralRecord, SectionError> {
    let name = section.name().ok_or_else(|| {
        SectionError::new(section, "", BcError::MissingProperty { key: keys::NAME })
    })?;

    let value = decode_lateral(section).map_err(|e| SectionError::new(section, name, e))?;

    Ok(LateralRecord {
        name: name.to_string(),
        value,
    })
}

/// 按段顺序惰性解码旁侧入流
pub fn lateral_records(sections: &[BcSection]) -> LateralRecords<'_> {
    LateralRecords {
        sections: sections.iter(),
    }
}

/// 解码所有旁侧入流段，有段出错时返回聚合错误
pub fn decode_lateral_sections(sections: &[BcSection]) -> IoResult<Vec<LateralRecord>> {
    let mut records = Vec::new();
    let mut errors = SectionErrors::new();

    for result in lateral_records(sections) {
        match result {
            Ok(record) => records.push(record),
            Err(error) => errors.push(error),
        }
    }

    errors.into_result()?;
    Ok(records)
}

/// 读取文件中的旁侧入流
pub fn read_lateral_file<P: AsRef<Path>>(path: P) -> IoResult<Vec<LateralRecord>> {
    let sections = read_sections(path)?;
    decode_lateral_sections(&sections)
}

/// 按名称（区分大小写）将记录绑定到管网，返回未匹配的记录名称
pub fn apply_lateral_records(records: &[LateralRecord], network: &mut Network) -> Vec<String> {
    let mut unmatched = Vec::new();

    for record in records {
        match network.lateral_mut(&record.name) {
            Some(lateral) => record.apply_to(lateral),
            None => {
                warn!("no lateral source available for {}", record.name);
                unmatched.push(record.name.clone());
            }
        }
    }

    unmatched
}
