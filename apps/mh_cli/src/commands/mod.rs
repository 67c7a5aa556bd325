// apps/mh_cli/src/commands/mod.rs

//! 子命令实现

pub mod convert;
pub mod info;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use mh_config::BcConfig;
use mh_network::Network;

/// 加载管网文件
pub fn load_network(path: &Path) -> Result<Network> {
    Network::from_file(path).with_context(|| format!("无法加载管网文件: {}", path.display()))
}

/// 加载编解码配置，未指定时使用默认值
pub fn load_config(path: Option<&Path>) -> Result<BcConfig> {
    match path {
        Some(p) => {
            BcConfig::from_file(p).with_context(|| format!("无法加载配置文件: {}", p.display()))
        }
        None => Ok(BcConfig::default()),
    }
}
