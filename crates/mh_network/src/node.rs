// crates/mh_network/src/node.rs

//! 管网节点
//!
//! 节点分为普通节点和检查井（manhole）。检查井由一个或多个隔间组成，
//! 隔间可以被提升为出口隔间（outlet），用于接收地表水位边界。
//! 同一检查井可以有多个出口：按隔间名称指定的段会提升该隔间，
//! 不会撤销已有出口。
//!
//! 提升是单向且幂等的：已经是出口的隔间再次提升不产生任何变化。

use serde::{Deserialize, Serialize};

// ============================================================
// 隔间
// ============================================================

/// 隔间类型
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompartmentKind {
    /// 普通隔间
    #[default]
    Plain,
    /// 出口隔间
    Outlet {
        /// 地表水位 [m]
        surface_water_level: f64,
    },
}

/// 检查井隔间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    /// 隔间名称
    pub name: String,
    /// 隔间类型
    #[serde(default)]
    pub kind: CompartmentKind,
}

impl Compartment {
    /// 创建普通隔间
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CompartmentKind::Plain,
        }
    }

    /// 创建出口隔间
    pub fn outlet(name: impl Into<String>, surface_water_level: f64) -> Self {
        Self {
            name: name.into(),
            kind: CompartmentKind::Outlet {
                surface_water_level,
            },
        }
    }

    /// 是否为出口隔间
    #[inline]
    pub fn is_outlet(&self) -> bool {
        matches!(self.kind, CompartmentKind::Outlet { .. })
    }

    /// 提升为出口隔间，名称保持不变
    ///
    /// 返回是否发生了变化；已是出口时为 no-op。
    pub fn promote_to_outlet(&mut self) -> bool {
        match self.kind {
            CompartmentKind::Outlet { .. } => false,
            CompartmentKind::Plain => {
                self.kind = CompartmentKind::Outlet {
                    surface_water_level: 0.0,
                };
                true
            }
        }
    }

    /// 出口地表水位，普通隔间返回 `None`
    pub fn surface_water_level(&self) -> Option<f64> {
        match self.kind {
            CompartmentKind::Outlet {
                surface_water_level,
            } => Some(surface_water_level),
            CompartmentKind::Plain => None,
        }
    }

    /// 设置出口地表水位
    ///
    /// 普通隔间不接受地表水位，返回 `false`。
    pub fn set_surface_water_level(&mut self, level: f64) -> bool {
        match &mut self.kind {
            CompartmentKind::Outlet {
                surface_water_level,
            } => {
                *surface_water_level = level;
                true
            }
            CompartmentKind::Plain => false,
        }
    }
}

// ============================================================
// 节点
// ============================================================

/// 节点类型
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// 普通节点
    #[default]
    Plain,
    /// 检查井，隔间按声明顺序存储
    Manhole {
        /// 隔间列表
        compartments: Vec<Compartment>,
    },
}

/// 管网节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// 节点名称（区分大小写）
    pub name: String,
    /// 节点类型
    #[serde(default)]
    pub kind: NodeKind,
}

impl Node {
    /// 创建普通节点
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Plain,
        }
    }

    /// 创建检查井
    pub fn manhole(name: impl Into<String>, compartments: Vec<Compartment>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Manhole { compartments },
        }
    }

    /// 是否为检查井
    #[inline]
    pub fn is_manhole(&self) -> bool {
        matches!(self.kind, NodeKind::Manhole { .. })
    }

    /// 隔间列表，普通节点为空
    pub fn compartments(&self) -> &[Compartment] {
        match &self.kind {
            NodeKind::Manhole { compartments } => compartments,
            NodeKind::Plain => &[],
        }
    }

    /// 可变隔间列表，普通节点返回 `None`
    pub fn compartments_mut(&mut self) -> Option<&mut Vec<Compartment>> {
        match &mut self.kind {
            NodeKind::Manhole { compartments } => Some(compartments),
            NodeKind::Plain => None,
        }
    }

    /// 按名称查找隔间（不区分大小写）
    pub fn find_compartment(&self, name: &str) -> Option<usize> {
        self.compartments()
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// 第一个出口隔间的索引
    pub fn outlet_index(&self) -> Option<usize> {
        self.compartments().iter().position(Compartment::is_outlet)
    }

    /// 出口隔间引用
    pub fn outlet(&self) -> Option<&Compartment> {
        self.outlet_index().map(|i| &self.compartments()[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_plain_compartment() {
        let mut c = Compartment::plain("C1");
        assert!(!c.is_outlet());
        assert!(c.promote_to_outlet());
        assert!(c.is_outlet());
        assert_eq!(c.name, "C1");
        assert_eq!(c.surface_water_level(), Some(0.0));
    }

    #[test]
    fn test_promote_is_idempotent() {
        let mut once = Compartment::plain("C1");
        once.promote_to_outlet();
        once.set_surface_water_level(1.5);

        let mut twice = once.clone();
        assert!(!twice.promote_to_outlet());
        assert_eq!(once, twice);
        assert_eq!(twice.surface_water_level(), Some(1.5));
    }

    #[test]
    fn test_plain_rejects_surface_level() {
        let mut c = Compartment::plain("C1");
        assert!(!c.set_surface_water_level(2.0));
        assert_eq!(c.surface_water_level(), None);
    }

    #[test]
    fn test_find_compartment_ignores_case() {
        let node = Node::manhole(
            "MH1",
            vec![Compartment::plain("Inlet"), Compartment::outlet("OUT", 0.0)],
        );
        assert_eq!(node.find_compartment("inlet"), Some(0));
        assert_eq!(node.find_compartment("out"), Some(1));
        assert_eq!(node.outlet_index(), Some(1));
        assert_eq!(node.find_compartment("missing"), None);
    }

    #[test]
    fn test_plain_node_has_no_compartments() {
        let mut node = Node::plain("N1");
        assert!(!node.is_manhole());
        assert!(node.compartments().is_empty());
        assert!(node.compartments_mut().is_none());
        assert!(node.outlet().is_none());
    }
}
