// crates/mh_io/src/bc/resolver.rs

//! 边界目标解析
//!
//! 段名称到边界数据的映射，以及检查井出口隔间的确定：
//!
//! ```text
//! 段名称匹配某隔间?
//!   ├─ 否 ──> 已有出口? ── 是 ──> 使用现有出口
//!   │                   └─ 否 ──> 提升第一个隔间为出口
//!   └─ 是 ──> 该隔间已是出口? ── 是 ──> 直接使用
//!                              └─ 否 ──> 原地提升（保留名称）
//! ```
//!
//! 提升是单向且幂等的：对已是出口的隔间再次提升不产生任何变化。

use mh_network::{Network, Node};

use crate::error::{BcError, BcResult};

/// 解析段对应的边界索引
///
/// 先按段名称精确匹配（区分大小写），未找到时再尝试 `manHoleName`。
/// 都未找到时返回 `None`，调用方应跳过该段。
pub fn resolve_target(network: &Network, name: &str, manhole_name: Option<&str>) -> Option<usize> {
    network
        .boundary_index(name)
        .or_else(|| manhole_name.and_then(|m| network.boundary_index(m)))
}

/// 出口隔间解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutletResolution {
    /// 没有隔间与段名称匹配，使用已有出口
    ExistingOutlet(usize),
    /// 没有隔间与段名称匹配且没有出口，提升第一个隔间
    PromoteFirst(usize),
    /// 匹配的隔间已是出口
    MatchIsOutlet(usize),
    /// 匹配的隔间是普通隔间，原地提升
    PromoteMatch(usize),
}

impl OutletResolution {
    /// 出口隔间索引
    pub fn compartment_index(&self) -> usize {
        match *self {
            Self::ExistingOutlet(i)
            | Self::PromoteFirst(i)
            | Self::MatchIsOutlet(i)
            | Self::PromoteMatch(i) => i,
        }
    }

    /// 是否需要提升
    pub fn promotes(&self) -> bool {
        matches!(self, Self::PromoteFirst(_) | Self::PromoteMatch(_))
    }
}

/// 确定检查井的出口隔间，不修改节点
///
/// `planned` 为同一批次中已决定提升、但尚未应用的隔间索引，
/// 它们被视为出口。
pub fn resolve_outlet(node: &Node, section_name: &str, planned: &[usize]) -> BcResult<OutletResolution> {
    let is_outlet = |i: usize| {
        planned.contains(&i) || node.compartments().get(i).is_some_and(|c| c.is_outlet())
    };

    if let Some(i) = node.find_compartment(section_name) {
        return Ok(if is_outlet(i) {
            OutletResolution::MatchIsOutlet(i)
        } else {
            OutletResolution::PromoteMatch(i)
        });
    }

    if let Some(i) = node.outlet_index().or_else(|| planned.first().copied()) {
        return Ok(OutletResolution::ExistingOutlet(i));
    }

    if node.compartments().is_empty() {
        return Err(BcError::NoCompartments {
            manhole: node.name.clone(),
        });
    }

    Ok(OutletResolution::PromoteFirst(0))
}

/// 应用出口解析结果
///
/// 需要时提升隔间，并在给出地表水位时写入。返回是否有修改。
pub fn apply_outlet(node: &mut Node, resolution: OutletResolution, surface_level: Option<f64>) -> bool {
    let Some(compartment) = node
        .compartments_mut()
        .and_then(|c| c.get_mut(resolution.compartment_index()))
    else {
        return false;
    };

    let mut changed = false;
    if resolution.promotes() {
        changed |= compartment.promote_to_outlet();
    }
    if let Some(level) = surface_level {
        if compartment.surface_water_level() != Some(level) {
            changed |= compartment.set_surface_water_level(level);
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use mh_network::{BoundaryNodeData, Compartment};

    fn manhole(compartments: Vec<Compartment>) -> Node {
        Node::manhole("MH1", compartments)
    }

    #[test]
    fn test_resolve_target_by_name_then_manhole() {
        let mut network = Network::new();
        network.add_node(Node::plain("Node1"));
        network.add_node(manhole(vec![Compartment::plain("C1")]));
        network.add_boundary(BoundaryNodeData::new("Node1"));
        network.add_boundary(BoundaryNodeData::new("MH1"));

        assert_eq!(resolve_target(&network, "Node1", None), Some(0));
        assert_eq!(resolve_target(&network, "C1", Some("MH1")), Some(1));
        assert_eq!(resolve_target(&network, "node1", None), None);
        assert_eq!(resolve_target(&network, "C1", None), None);
    }

    #[test]
    fn test_no_match_promotes_first() {
        let node = manhole(vec![Compartment::plain("C1"), Compartment::plain("C2")]);
        assert_eq!(
            resolve_outlet(&node, "MH1", &[]).unwrap(),
            OutletResolution::PromoteFirst(0)
        );
    }

    #[test]
    fn test_no_match_uses_existing_outlet() {
        let node = manhole(vec![Compartment::plain("C1"), Compartment::outlet("C2", 0.5)]);
        assert_eq!(
            resolve_outlet(&node, "MH1", &[]).unwrap(),
            OutletResolution::ExistingOutlet(1)
        );
    }

    #[test]
    fn test_match_ignores_case() {
        let node = manhole(vec![Compartment::plain("C1"), Compartment::plain("C2")]);
        assert_eq!(
            resolve_outlet(&node, "c2", &[]).unwrap(),
            OutletResolution::PromoteMatch(1)
        );

        let node = manhole(vec![Compartment::plain("C1"), Compartment::outlet("C2", 0.0)]);
        assert_eq!(
            resolve_outlet(&node, "C2", &[]).unwrap(),
            OutletResolution::MatchIsOutlet(1)
        );
    }

    #[test]
    fn test_planned_promotions_count_as_outlets() {
        let node = manhole(vec![Compartment::plain("C1"), Compartment::plain("C2")]);
        assert_eq!(
            resolve_outlet(&node, "MH1", &[1]).unwrap(),
            OutletResolution::ExistingOutlet(1)
        );
        assert_eq!(
            resolve_outlet(&node, "C2", &[1]).unwrap(),
            OutletResolution::MatchIsOutlet(1)
        );
    }

    #[test]
    fn test_manhole_without_compartments() {
        let node = manhole(vec![]);
        assert!(matches!(
            resolve_outlet(&node, "MH1", &[]),
            Err(BcError::NoCompartments { .. })
        ));
    }

    #[test]
    fn test_apply_sets_surface_level() {
        let mut node = manhole(vec![Compartment::plain("C1"), Compartment::plain("C2")]);
        let resolution = resolve_outlet(&node, "C2", &[]).unwrap();

        assert!(apply_outlet(&mut node, resolution, Some(2.35)));
        assert_eq!(node.outlet_index(), Some(1));
        assert_eq!(node.compartments()[1].name, "C2");
        assert_eq!(node.compartments()[1].surface_water_level(), Some(2.35));
        assert!(!node.compartments()[0].is_outlet());
    }

    #[test]
    fn test_promotion_is_idempotent() {
        let mut once = manhole(vec![Compartment::plain("C1"), Compartment::plain("C2")]);
        let resolution = resolve_outlet(&once, "MH1", &[]).unwrap();
        apply_outlet(&mut once, resolution, Some(1.5));

        let mut twice = once.clone();
        let again = resolve_outlet(&twice, "MH1", &[]).unwrap();
        assert_eq!(again.compartment_index(), resolution.compartment_index());
        assert!(!apply_outlet(&mut twice, again, Some(1.5)));

        assert_eq!(once, twice);
    }
}
