// crates/mh_network/src/network.rs

//! 管网容器
//!
//! 持有节点、边界数据和旁侧入流。编解码器从不拥有这些对象，
//! 只在容器中按名称查找并原地修改。

use std::collections::HashSet;
use std::path::Path;

use mh_foundation::ensure;
use mh_foundation::error::{MhError, MhResult};
use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryNodeData;
use crate::lateral::LateralSourceData;
use crate::node::Node;

/// 管网
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// 节点
    #[serde(default)]
    pub nodes: Vec<Node>,

    /// 节点边界数据
    #[serde(default)]
    pub boundary_conditions: Vec<BoundaryNodeData>,

    /// 旁侧入流
    #[serde(default)]
    pub lateral_sources: Vec<LateralSourceData>,
}

impl Network {
    /// 创建空管网
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> MhResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MhError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            MhError::io_with_source(format!("读取管网文件失败: {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(json: &str) -> MhResult<Self> {
        let network: Network =
            serde_json::from_str(json).map_err(|e| MhError::serialization(e.to_string()))?;
        network.validate()?;
        Ok(network)
    }

    /// 保存为 JSON 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> MhResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| MhError::serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证名称唯一性与引用完整性
    pub fn validate(&self) -> MhResult<()> {
        let mut node_names = HashSet::new();
        for node in &self.nodes {
            ensure!(
                node_names.insert(node.name.as_str()),
                MhError::duplicate("节点", &node.name)
            );
        }

        let mut boundary_names = HashSet::new();
        for bc in &self.boundary_conditions {
            ensure!(
                node_names.contains(bc.node_name.as_str()),
                MhError::unknown_reference("节点", &bc.node_name)
            );
            ensure!(
                boundary_names.insert(bc.node_name.as_str()),
                MhError::duplicate("边界", &bc.node_name)
            );
        }

        let mut lateral_names = HashSet::new();
        for lateral in &self.lateral_sources {
            ensure!(
                lateral_names.insert(lateral.name.as_str()),
                MhError::duplicate("旁侧入流", &lateral.name)
            );
        }

        Ok(())
    }

    /// 添加节点
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// 添加边界数据
    pub fn add_boundary(&mut self, boundary: BoundaryNodeData) {
        self.boundary_conditions.push(boundary);
    }

    /// 添加旁侧入流
    pub fn add_lateral(&mut self, lateral: LateralSourceData) {
        self.lateral_sources.push(lateral);
    }

    /// 按名称查找节点（区分大小写）
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// 按名称查找可变节点
    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    /// 按要素名称查找边界索引（区分大小写）
    pub fn boundary_index(&self, feature_name: &str) -> Option<usize> {
        self.boundary_conditions
            .iter()
            .position(|bc| bc.feature_name() == feature_name)
    }

    /// 按要素名称查找边界
    pub fn boundary(&self, feature_name: &str) -> Option<&BoundaryNodeData> {
        self.boundary_index(feature_name)
            .map(|i| &self.boundary_conditions[i])
    }

    /// 按名称查找可变旁侧入流
    pub fn lateral_mut(&mut self, name: &str) -> Option<&mut LateralSourceData> {
        self.lateral_sources.iter_mut().find(|l| l.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Compartment;

    fn sample() -> Network {
        let mut network = Network::new();
        network.add_node(Node::plain("Node1"));
        network.add_node(Node::manhole("MH1", vec![Compartment::plain("C1")]));
        network.add_boundary(BoundaryNodeData::new("Node1"));
        network.add_boundary(BoundaryNodeData::new("MH1"));
        network.add_lateral(LateralSourceData::new("Lat1"));
        network
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let network = sample();
        assert_eq!(network.boundary_index("Node1"), Some(0));
        assert_eq!(network.boundary_index("node1"), None);
        assert!(network.node("MH1").is_some());
        assert!(network.node("mh1").is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_dangling_boundary() {
        let mut network = sample();
        network.add_boundary(BoundaryNodeData::new("Ghost"));
        assert!(matches!(
            network.validate(),
            Err(MhError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_node() {
        let mut network = sample();
        network.add_node(Node::plain("Node1"));
        assert!(matches!(
            network.validate(),
            Err(MhError::DuplicateName { kind: "节点", .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let network = sample();
        let json = serde_json::to_string(&network).unwrap();
        let parsed = Network::from_json_str(&json).unwrap();
        assert_eq!(parsed, network);
    }
}
