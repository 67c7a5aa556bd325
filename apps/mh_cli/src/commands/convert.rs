// apps/mh_cli/src/commands/convert.rs

//! 转换命令
//!
//! 将边界条件文件读入管网，再按统一格式重新写出。

use anyhow::{Context, Result};
use clap::Args;
use mh_io::bc::{apply_lateral_records, read_boundary_file, read_lateral_file, write_boundary_file};
use std::path::PathBuf;
use tracing::info;

use super::{load_config, load_network};

/// 转换参数
#[derive(Args)]
pub struct ConvertArgs {
    /// 输入边界条件文件路径
    pub file: PathBuf,

    /// 管网文件路径 (JSON)
    #[arg(short, long)]
    pub network: PathBuf,

    /// 输出边界条件文件路径
    #[arg(short, long)]
    pub output: PathBuf,

    /// 编解码配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 同时保存更新后的管网
    #[arg(long)]
    pub network_output: Option<PathBuf>,
}

/// 执行转换命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    info!("=== MariHydro 边界条件转换 ===");

    let mut network = load_network(&args.network)?;
    let config = load_config(args.config.as_deref())?;

    let summary = read_boundary_file(&args.file, &mut network, &config)?;
    println!(
        "读入 {} 个边界段, 跳过 {} 个",
        summary.applied,
        summary.skipped.len()
    );

    let records = read_lateral_file(&args.file)?;
    let unmatched = apply_lateral_records(&records, &mut network);
    println!("读入 {} 个旁侧入流段", records.len());
    if !unmatched.is_empty() {
        println!("未匹配的旁侧入流: {}", unmatched.join(", "));
    }

    write_boundary_file(&args.output, &network, &config)?;
    println!("已写出: {}", args.output.display());

    if let Some(path) = &args.network_output {
        network
            .save_to_file(path)
            .with_context(|| format!("无法保存管网文件: {}", path.display()))?;
        println!("已保存管网: {}", path.display());
    }

    Ok(())
}
