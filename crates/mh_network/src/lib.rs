// crates/mh_network/src/lib.rs

//! MariHydro 管网领域模型
//!
//! 边界条件编解码器操作的外部领域对象的最小形态：
//!
//! - [`node`]: 节点、检查井（manhole）与隔间（compartment），含出口隔间提升
//! - [`function`]: 时间序列与 Q-H 关系表函数对象
//! - [`boundary`]: 节点边界数据（流量 / 水位 / Q-H 表）
//! - [`lateral`]: 旁侧入流数据
//! - [`network`]: 以上对象的容器，支持 JSON 读写
//!
//! # 使用示例
//!
//! ```
//! use mh_network::{BoundaryNodeData, Compartment, Network, Node};
//!
//! let mut network = Network::new();
//! network.add_node(Node::manhole("MH1", vec![Compartment::plain("C1")]));
//! network.add_boundary(BoundaryNodeData::new("MH1"));
//!
//! assert!(network.boundary_index("MH1").is_some());
//! assert!(network.node("MH1").unwrap().is_manhole());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod function;
pub mod lateral;
pub mod network;
pub mod node;

// 重导出常用类型
pub use boundary::{BoundaryDataType, BoundaryNodeData};
pub use function::{ExtrapolationType, InterpolationType, QhTable, TimeSeries};
pub use lateral::{LateralDataType, LateralSourceData};
pub use network::Network;
pub use node::{Compartment, CompartmentKind, Node, NodeKind};
