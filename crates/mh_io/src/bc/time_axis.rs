// crates/mh_io/src/bc/time_axis.rs

//! 时间轴单位编解码
//!
//! 时间列的单位字符串编码参考时间和时间粒度：
//! - `seconds since 2020-01-01 00:00:00`
//! - `minutes since 2020-01-01 00:00:00`
//! - `hours since 2020-01-01 00:00:00`
//!
//! 标记区分大小写。解码接受三种粒度，编码始终使用 `minutes since`，
//! 因此格式并不对称。
//!
//! # 使用示例
//!
//! ```
//! use mh_io::bc::time_axis::{TimeAxis, TimeGranularity};
//!
//! let axis = TimeAxis::decode("hours since 2020-01-01 00:00:00").unwrap();
//! assert_eq!(axis.granularity, TimeGranularity::Hours);
//!
//! let t = axis.offset_to_time(24.0).unwrap();
//! assert_eq!(t.format("%Y-%m-%d").to_string(), "2020-01-02");
//! ```

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::bc::section::QuantityColumn;
use crate::error::{BcError, BcResult};

/// 参考时间格式
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 每分钟毫秒数
const MILLIS_PER_MINUTE: f64 = 60_000.0;

// ============================================================
// 时间粒度
// ============================================================

/// 时间粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeGranularity {
    /// 秒
    Seconds,
    /// 分钟
    Minutes,
    /// 小时
    Hours,
}

impl TimeGranularity {
    /// 解码时按此顺序查找标记
    pub const ALL: [Self; 3] = [Self::Seconds, Self::Minutes, Self::Hours];

    /// 单位字符串中的标记
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Seconds => "seconds since",
            Self::Minutes => "minutes since",
            Self::Hours => "hours since",
        }
    }

    /// 一个粒度单位的毫秒数
    pub fn millis(&self) -> f64 {
        match self {
            Self::Seconds => 1_000.0,
            Self::Minutes => MILLIS_PER_MINUTE,
            Self::Hours => 3_600_000.0,
        }
    }
}

impl fmt::Display for TimeGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds => write!(f, "seconds"),
            Self::Minutes => write!(f, "minutes"),
            Self::Hours => write!(f, "hours"),
        }
    }
}

// ============================================================
// 时间轴
// ============================================================

/// 时间轴：参考时间 + 粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    /// 参考时间
    pub reference: NaiveDateTime,
    /// 偏移粒度
    pub granularity: TimeGranularity,
}

impl TimeAxis {
    /// 创建时间轴
    pub fn new(reference: NaiveDateTime, granularity: TimeGranularity) -> Self {
        Self {
            reference,
            granularity,
        }
    }

    /// 以分钟为粒度的时间轴（写出路径使用）
    pub fn minutes_since(reference: NaiveDateTime) -> Self {
        Self::new(reference, TimeGranularity::Minutes)
    }

    /// 解析单位字符串
    ///
    /// 去掉标记后对剩余部分修剪空白，再按 `yyyy-MM-dd HH:mm:ss` 解析。
    pub fn decode(unit: &str) -> BcResult<Self> {
        for granularity in TimeGranularity::ALL {
            let marker = granularity.marker();
            if let Some(pos) = unit.find(marker) {
                let text = unit[pos + marker.len()..].trim();
                let reference = NaiveDateTime::parse_from_str(text, TIME_FORMAT).map_err(|_| {
                    BcError::InvalidReferenceTime {
                        text: text.to_string(),
                    }
                })?;
                return Ok(Self::new(reference, granularity));
            }
        }

        Err(BcError::UnrecognizedUnit {
            unit: unit.to_string(),
        })
    }

    /// 编码为单位字符串
    pub fn encode(&self) -> String {
        format!(
            "{} {}",
            self.granularity.marker(),
            self.reference.format(TIME_FORMAT)
        )
    }

    /// 偏移转换为绝对时间，精确到毫秒
    pub fn offset_to_time(&self, offset: f64) -> BcResult<NaiveDateTime> {
        let millis = (offset * self.granularity.millis()).round();
        // i64 毫秒范围之外的偏移无法表示
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return Err(BcError::OffsetOutOfRange { offset });
        }

        Duration::try_milliseconds(millis as i64)
            .and_then(|delta| self.reference.checked_add_signed(delta))
            .ok_or(BcError::OffsetOutOfRange { offset })
    }

    /// 批量转换原始偏移
    pub fn decode_offsets(&self, column: &QuantityColumn) -> BcResult<Vec<NaiveDateTime>> {
        column
            .numbers()?
            .into_iter()
            .map(|offset| self.offset_to_time(offset))
            .collect()
    }
}

impl fmt::Display for TimeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

// ============================================================
// 写出路径辅助函数
// ============================================================

/// 编码单位字符串，始终为 `minutes since <reference>`
pub fn encode_unit(reference: NaiveDateTime) -> String {
    TimeAxis::minutes_since(reference).encode()
}

/// 每个时间戳相对参考时间的总分钟数（浮点，不取整）
pub fn encode_offsets(reference: NaiveDateTime, times: &[NaiveDateTime]) -> Vec<f64> {
    times
        .iter()
        .map(|t| (*t - reference).num_milliseconds() as f64 / MILLIS_PER_MINUTE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn column(values: &[&str]) -> QuantityColumn {
        let mut c = QuantityColumn::new("time", "");
        c.values = values.iter().map(|v| v.to_string()).collect();
        c
    }

    #[test]
    fn test_decode_all_granularities() {
        let s = TimeAxis::decode("seconds since 2020-01-01 00:00:00").unwrap();
        let m = TimeAxis::decode("minutes since 2020-01-01 00:00:00").unwrap();
        let h = TimeAxis::decode("hours since 2020-01-01 00:00:00").unwrap();

        assert_eq!(s.granularity, TimeGranularity::Seconds);
        assert_eq!(m.granularity, TimeGranularity::Minutes);
        assert_eq!(h.granularity, TimeGranularity::Hours);
        assert_eq!(h.reference, dt(2020, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_decode_trims_remainder() {
        let axis = TimeAxis::decode("minutes since    2021-06-15 12:30:45  ").unwrap();
        assert_eq!(axis.reference, dt(2021, 6, 15, 12, 30, 45));
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        assert!(matches!(
            TimeAxis::decode("Minutes Since 2020-01-01 00:00:00"),
            Err(BcError::UnrecognizedUnit { .. })
        ));
        assert!(matches!(
            TimeAxis::decode("days since 2020-01-01 00:00:00"),
            Err(BcError::UnrecognizedUnit { .. })
        ));
    }

    #[test]
    fn test_bad_reference_time() {
        assert!(matches!(
            TimeAxis::decode("minutes since 2020-01-01"),
            Err(BcError::InvalidReferenceTime { .. })
        ));
        assert!(matches!(
            TimeAxis::decode("minutes since 2020-01-01T00:00:00"),
            Err(BcError::InvalidReferenceTime { .. })
        ));
    }

    #[test]
    fn test_decode_minute_offsets() {
        let axis = TimeAxis::decode("minutes since 2020-01-01 00:00:00").unwrap();
        let times = axis.decode_offsets(&column(&["0", "60"])).unwrap();
        assert_eq!(times, vec![dt(2020, 1, 1, 0, 0, 0), dt(2020, 1, 1, 1, 0, 0)]);
    }

    #[test]
    fn test_decode_fractional_offsets() {
        let axis = TimeAxis::decode("hours since 2020-01-01 00:00:00").unwrap();
        let times = axis.decode_offsets(&column(&["0.5", "-1"])).unwrap();
        assert_eq!(times, vec![dt(2020, 1, 1, 0, 30, 0), dt(2019, 12, 31, 23, 0, 0)]);
    }

    #[test]
    fn test_decode_offsets_rejects_text() {
        let axis = TimeAxis::decode("seconds since 2020-01-01 00:00:00").unwrap();
        assert!(matches!(
            axis.decode_offsets(&column(&["0", "ten"])),
            Err(BcError::ValueParse { .. })
        ));
    }

    #[test]
    fn test_huge_offset_is_rejected() {
        let axis = TimeAxis::decode("hours since 2020-01-01 00:00:00").unwrap();
        assert!(matches!(
            axis.offset_to_time(1e300),
            Err(BcError::OffsetOutOfRange { .. })
        ));
    }

    #[test]
    fn test_encode_unit_always_minutes() {
        assert_eq!(
            encode_unit(dt(2020, 1, 1, 0, 0, 0)),
            "minutes since 2020-01-01 00:00:00"
        );
    }

    #[test]
    fn test_encode_offsets_not_rounded() {
        let start = dt(2020, 1, 1, 0, 0, 0);
        let offsets = encode_offsets(start, &[start, dt(2020, 1, 1, 0, 1, 30), dt(2020, 1, 2, 0, 0, 0)]);
        assert_eq!(offsets, vec![0.0, 1.5, 1440.0]);
    }

    #[test]
    fn test_offsets_round_trip() {
        let start = dt(2020, 3, 1, 6, 0, 0);
        let times = vec![
            start,
            dt(2020, 3, 1, 6, 0, 1),
            dt(2020, 3, 1, 7, 20, 13),
            dt(2021, 2, 28, 23, 59, 59),
        ];

        let offsets = encode_offsets(start, &times);
        let raw: Vec<String> = offsets.iter().map(|v| v.to_string()).collect();
        let mut col = QuantityColumn::new("time", encode_unit(start));
        col.values = raw;

        let axis = TimeAxis::decode(&col.unit).unwrap();
        assert_eq!(axis.decode_offsets(&col).unwrap(), times);
    }
}
