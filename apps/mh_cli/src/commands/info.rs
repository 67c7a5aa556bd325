// apps/mh_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 列出文件中每个段的标题、名称、函数类型、物理量与行数。

use anyhow::Result;
use clap::Args;
use mh_io::bc::read_sections;
use mh_io::bc::section::keys;
use std::path::PathBuf;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 边界条件文件路径
    pub file: PathBuf,

    /// 同时显示属性
    #[arg(long)]
    pub properties: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== MariHydro 边界条件文件 ===");

    let sections = read_sections(&args.file)?;
    println!("文件: {}", args.file.display());
    println!("段数: {}", sections.len());

    for section in &sections {
        println!();
        println!(
            "[{}] {} (第{}行)",
            section.header,
            section.name().unwrap_or("<unnamed>"),
            section.line
        );
        if let Some(function) = section.property(keys::FUNCTION) {
            println!("  函数类型: {}", function);
        }

        if args.properties {
            for property in section.properties() {
                println!("  {} = {}", property.key, property.value);
            }
        }

        if !section.table.is_empty() {
            let quantities: Vec<_> = section
                .table
                .iter()
                .map(|c| {
                    if c.unit.is_empty() {
                        c.quantity.clone()
                    } else {
                        format!("{} [{}]", c.quantity, c.unit)
                    }
                })
                .collect();
            println!("  物理量: {}", quantities.join(", "));
            println!("  行数: {}", section.row_count());
        }
    }

    Ok(())
}
