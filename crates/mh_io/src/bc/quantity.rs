// crates/mh_io/src/bc/quantity.rs

//! 物理量关键字表
//!
//! 文件中的物理量关键字（不区分大小写）到已知物理量的映射，
//! 以及物理量到边界子类型（流量 / 水位）的映射。
//! 未列出的关键字不会被静默归入任何子类型。

use crate::error::{BcError, BcResult};

/// 已知物理量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// 时间轴
    Time,
    /// 流量
    Discharge,
    /// 水位
    WaterLevel,
    /// 盐度（由其他子系统处理）
    Salinity,
    /// 风速
    WindSpeed,
    /// 风向
    WindDirection,
}

impl Quantity {
    /// 从关键字解析
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "time" => Some(Self::Time),
            "dischargebnd" | "waterdischarge" | "water_discharge" | "lateral_discharge"
            | "qhbnd discharge" => Some(Self::Discharge),
            "waterlevelbnd" | "waterlevel" | "water_level" | "qhbnd waterlevel" => {
                Some(Self::WaterLevel)
            }
            "water_salinity" | "salinitybnd" => Some(Self::Salinity),
            "wind_speed" => Some(Self::WindSpeed),
            "wind_from_direction" => Some(Self::WindDirection),
            _ => None,
        }
    }

    /// 边界子类型
    pub fn forcing_kind(&self) -> Option<ForcingKind> {
        match self {
            Self::Discharge => Some(ForcingKind::Flow),
            Self::WaterLevel => Some(ForcingKind::WaterLevel),
            Self::Time | Self::Salinity | Self::WindSpeed | Self::WindDirection => None,
        }
    }

    /// 是否为模型级风场物理量
    #[inline]
    pub fn is_wind(&self) -> bool {
        matches!(self, Self::WindSpeed | Self::WindDirection)
    }
}

/// 边界子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForcingKind {
    /// 流量边界
    Flow,
    /// 水位边界
    WaterLevel,
}

/// 将物理量关键字映射到边界子类型，未映射时报错
pub fn forcing_kind(keyword: &str) -> BcResult<ForcingKind> {
    Quantity::from_keyword(keyword)
        .and_then(|q| q.forcing_kind())
        .ok_or_else(|| BcError::UnmappedQuantity {
            quantity: keyword.to_string(),
        })
}

/// 写出时使用的物理量描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityDescriptor {
    /// 物理量关键字
    pub quantity: &'static str,
    /// 单位
    pub unit: &'static str,
}

/// 时间列
pub const TIME: QuantityDescriptor = QuantityDescriptor {
    quantity: "time",
    unit: "",
};

/// 边界流量
pub const BOUNDARY_DISCHARGE: QuantityDescriptor = QuantityDescriptor {
    quantity: "dischargebnd",
    unit: "m3/s",
};

/// 边界水位
pub const BOUNDARY_WATER_LEVEL: QuantityDescriptor = QuantityDescriptor {
    quantity: "waterlevelbnd",
    unit: "m",
};

/// 旁侧入流流量
pub const LATERAL_DISCHARGE: QuantityDescriptor = QuantityDescriptor {
    quantity: "lateral_discharge",
    unit: "m3/s",
};

/// Q-H 表水位列
pub const QH_WATER_LEVEL: QuantityDescriptor = QuantityDescriptor {
    quantity: "qhbnd waterlevel",
    unit: "m",
};

/// Q-H 表流量列
pub const QH_DISCHARGE: QuantityDescriptor = QuantityDescriptor {
    quantity: "qhbnd discharge",
    unit: "m3/s",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(Quantity::from_keyword("WaterLevelBnd"), Some(Quantity::WaterLevel));
        assert_eq!(Quantity::from_keyword("waterDischarge"), Some(Quantity::Discharge));
        assert_eq!(Quantity::from_keyword("waterLevel"), Some(Quantity::WaterLevel));
        assert_eq!(Quantity::from_keyword("TIME"), Some(Quantity::Time));
    }

    #[test]
    fn test_forcing_kind_routing() {
        assert_eq!(forcing_kind("dischargebnd").unwrap(), ForcingKind::Flow);
        assert_eq!(forcing_kind("lateral_discharge").unwrap(), ForcingKind::Flow);
        assert_eq!(forcing_kind("water_level").unwrap(), ForcingKind::WaterLevel);
        assert_eq!(forcing_kind("waterlevelbnd").unwrap(), ForcingKind::WaterLevel);
    }

    #[test]
    fn test_unmapped_quantity_is_an_error() {
        assert!(matches!(
            forcing_kind("velocitybnd"),
            Err(BcError::UnmappedQuantity { .. })
        ));
        // 已知但不是流量或水位
        assert!(forcing_kind("wind_speed").is_err());
        assert!(forcing_kind("time").is_err());
    }

    #[test]
    fn test_descriptors_round_trip_through_table() {
        for d in [BOUNDARY_DISCHARGE, LATERAL_DISCHARGE, QH_DISCHARGE] {
            assert_eq!(forcing_kind(d.quantity).unwrap(), ForcingKind::Flow);
        }
        for d in [BOUNDARY_WATER_LEVEL, QH_WATER_LEVEL] {
            assert_eq!(forcing_kind(d.quantity).unwrap(), ForcingKind::WaterLevel);
        }
        assert_eq!(Quantity::from_keyword(TIME.quantity), Some(Quantity::Time));
    }
}
