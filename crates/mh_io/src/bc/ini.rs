// crates/mh_io/src/bc/ini.rs

//! `.bc` 文件分词与写出
//!
//! 文件格式：
//!
//! ```text
//! [Boundary]
//!     name                  = Node1
//!     function              = timeseries
//!     timeInterpolation     = linear
//!     quantity              = time
//!     unit                  = minutes since 2020-01-01 00:00:00
//!     quantity              = waterlevelbnd
//!     unit                  = m
//!     0      1.0
//!     60     2.0
//! ```
//!
//! - `[Header]` 开启新段
//! - `key = value  # 说明` 为属性
//! - `quantity` 开启新列，随后的 `unit` 设置该列单位
//! - 其余非空行为数据行，按空白分隔后依次追加到各列
//! - 以 `#` 或 `*` 开头的行为注释

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::bc::section::{keys, BcProperty, BcSection, QuantityColumn};
use crate::error::{IoError, IoResult};

/// 属性键的对齐宽度
const KEY_WIDTH: usize = 22;

/// 数据列的对齐宽度
const VALUE_WIDTH: usize = 16;

// ============================================================
// 读取
// ============================================================

/// 读取文件并分段
///
/// 文件不存在返回 [`IoError::FileNotFound`]，
/// 没有任何段返回 [`IoError::EmptyFile`]。
pub fn read_sections<P: AsRef<Path>>(path: P) -> IoResult<Vec<BcSection>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let sections = parse_sections(&content);
    if sections.is_empty() {
        return Err(IoError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    debug!("读取 {} 个段: {}", sections.len(), path.display());
    Ok(sections)
}

/// 将文本分段
pub fn parse_sections(content: &str) -> Vec<BcSection> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut sections: Vec<BcSection> = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with('*') {
            continue;
        }

        if let Some(header) = parse_header(line) {
            sections.push(BcSection::new(header).at_line(line_no));
            continue;
        }

        let Some(section) = sections.last_mut() else {
            warn!("第{}行位于任何段之前, 已忽略", line_no);
            continue;
        };

        match line.split_once('=') {
            Some((key, rest)) => parse_property(section, key.trim(), rest, line_no),
            None => parse_row(section, line, line_no),
        }
    }

    sections
}

/// 段标题，允许尾随 `#` 注释
fn parse_header(line: &str) -> Option<&str> {
    let line = line.split_once('#').map_or(line, |(head, _)| head).trim_end();
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

fn parse_property(section: &mut BcSection, key: &str, rest: &str, line_no: usize) {
    let (value, description) = match rest.split_once('#') {
        Some((value, comment)) => {
            let comment = comment.trim();
            (value.trim(), (!comment.is_empty()).then(|| comment.to_string()))
        }
        None => (rest.trim(), None),
    };

    if key.eq_ignore_ascii_case(keys::QUANTITY) {
        section.push_column(QuantityColumn::new(value, ""));
    } else if key.eq_ignore_ascii_case(keys::UNIT) {
        match section.table.last_mut() {
            Some(column) => column.unit = value.to_string(),
            None => warn!("第{}行的 unit 之前没有 quantity, 已忽略", line_no),
        }
    } else {
        section.push_property(BcProperty {
            key: key.to_string(),
            value: value.to_string(),
            description,
        });
    }
}

fn parse_row(section: &mut BcSection, line: &str, line_no: usize) {
    if section.table.is_empty() {
        warn!("第{}行数据所在段没有物理量列, 已忽略", line_no);
        return;
    }

    let mut tokens = line.split_whitespace();
    for column in section.table.iter_mut() {
        match tokens.next() {
            Some(token) => column.values.push(token.to_string()),
            None => break,
        }
    }

    let extra = tokens.count();
    if extra > 0 {
        warn!("第{}行有 {} 个多余的值, 已忽略", line_no, extra);
    }
}

// ============================================================
// 写出
// ============================================================

/// 格式化为文本
pub fn format_sections(sections: &[BcSection]) -> String {
    let mut out = String::new();

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // 写入 String 不会失败
        let _ = write_section(&mut out, section);
    }

    out
}

fn write_section(out: &mut String, section: &BcSection) -> std::fmt::Result {
    writeln!(out, "[{}]", section.header)?;

    for property in section.properties() {
        write!(out, "    {:<width$}= {}", property.key, property.value, width = KEY_WIDTH)?;
        if let Some(description) = &property.description {
            write!(out, "  # {}", description)?;
        }
        writeln!(out)?;
    }

    for column in &section.table {
        writeln!(out, "    {:<width$}= {}", keys::QUANTITY, column.quantity, width = KEY_WIDTH)?;
        writeln!(out, "    {:<width$}= {}", keys::UNIT, column.unit, width = KEY_WIDTH)?;
    }

    for row in 0..section.row_count() {
        write!(out, "   ")?;
        for column in &section.table {
            let value = column.values.get(row).map(String::as_str).unwrap_or("");
            write!(out, " {:>width$}", value, width = VALUE_WIDTH)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// 写出文件
pub fn write_sections<P: AsRef<Path>>(path: P, sections: &[BcSection]) -> IoResult<()> {
    let path = path.as_ref();
    fs::write(path, format_sections(sections)).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("写出 {} 个段: {}", sections.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# 注释行
[General]
    fileVersion = 1.01
    fileType    = boundConds

[Boundary]
    name              = Node1   # 上游节点
    function          = timeseries
    quantity          = time
    unit              = minutes since 2020-01-01 00:00:00
    quantity          = waterlevelbnd
    unit              = m
    0     1.0
    60    2.0
* 星号注释
[forcing]
    Name     = MH1
";

    #[test]
    fn test_parse_sections() {
        let sections = parse_sections(SAMPLE);
        assert_eq!(sections.len(), 3);

        assert_eq!(sections[0].header, "General");
        assert_eq!(sections[0].line, 2);
        assert_eq!(sections[0].property("FILEVERSION"), Some("1.01"));

        let boundary = &sections[1];
        assert_eq!(boundary.line, 6);
        assert_eq!(boundary.name(), Some("Node1"));
        assert_eq!(
            boundary.property_entry("name").unwrap().description.as_deref(),
            Some("上游节点")
        );
        assert_eq!(boundary.table.len(), 2);
        assert_eq!(boundary.table[0].unit, "minutes since 2020-01-01 00:00:00");
        assert_eq!(boundary.table[0].values, vec!["0", "60"]);
        assert_eq!(boundary.table[1].values, vec!["1.0", "2.0"]);

        assert_eq!(sections[2].header, "forcing");
        assert_eq!(sections[2].name(), Some("MH1"));
    }

    #[test]
    fn test_quantity_and_unit_are_not_properties() {
        let sections = parse_sections(SAMPLE);
        assert_eq!(sections[1].property("quantity"), None);
        assert_eq!(sections[1].property("unit"), None);
    }

    #[test]
    fn test_lines_outside_sections_are_ignored() {
        let sections = parse_sections("name = orphan\n1 2 3\n[Boundary]\nname = A\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name(), Some("A"));
    }

    #[test]
    fn test_leading_bom_is_stripped() {
        let text = "\u{feff}[Boundary]\nname = Node1\nfunction = constant\nquantity = waterlevelbnd\n2.35\n";
        let sections = parse_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].header, "Boundary");
        assert_eq!(sections[0].line, 1);
        assert_eq!(sections[0].name(), Some("Node1"));
        assert_eq!(sections[0].table[0].values, vec!["2.35"]);
    }

    #[test]
    fn test_header_with_trailing_comment() {
        let text = "\
[Boundary]
name = A
quantity = waterlevelbnd
2.35
[Boundary] # 第二段
name = B
quantity = waterlevelbnd
5
";
        let sections = parse_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].table[0].values, vec!["2.35"]);
        assert_eq!(sections[1].header, "Boundary");
        assert_eq!(sections[1].line, 5);
        assert_eq!(sections[1].name(), Some("B"));
        assert_eq!(sections[1].table[0].values, vec!["5"]);
    }

    #[test]
    fn test_short_row_fills_leading_columns() {
        let text = "[Boundary]\nquantity = a\nquantity = b\n1 2\n3\n";
        let sections = parse_sections(text);
        assert_eq!(sections[0].table[0].values, vec!["1", "3"]);
        assert_eq!(sections[0].table[1].values, vec!["2"]);
    }

    #[test]
    fn test_format_then_parse() {
        let sections = parse_sections(SAMPLE);
        let text = format_sections(&sections);
        let reparsed = parse_sections(&text);

        assert_eq!(reparsed.len(), sections.len());
        for (a, b) in sections.iter().zip(&reparsed) {
            assert_eq!(a.header, b.header);
            assert_eq!(a.properties(), b.properties());
            assert_eq!(a.table, b.table);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_sections("/definitely/not/here.bc").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
