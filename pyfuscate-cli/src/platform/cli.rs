//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文打印。

use pyfuscate_api::PyfuscateError;

/// 打印错误并显示源代码上下文
pub fn print_error_with_source(e: &PyfuscateError, source: &str) {
    eprintln!("❌ {}", e);

    // 获取错误位置
    let line_num = e.line();
    let column = e.column();

    if let (Some(error_line), Some(col)) = (line_num, column) {
        print_source_context(source, error_line, col);
    }
}

/// 打印源代码上下文（显示错误行前后几行）
pub fn print_source_context(source: &str, error_line: usize, error_col: usize) {
    for line in render_source_context(source, error_line, error_col) {
        eprintln!("{}", line);
    }
}

/// 生成源代码上下文（带行号和指向错误列的 `^`）
pub fn render_source_context(source: &str, error_line: usize, error_col: usize) -> Vec<String> {
    const CONTEXT_LINES: usize = 2; // 错误行前后显示的上下文行数

    let mut out = Vec::new();
    let lines = source_lines(source);
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return out;
    }

    // 计算要显示的行范围
    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);

    // 计算行号的最大宽度用于对齐
    let max_line_num_width = end_line.to_string().len();

    // 打印分隔线
    let separator: String = std::iter::repeat('-')
        .take(max_line_num_width + 1)
        .collect();
    out.push(format!("{}|--", separator));

    // 打印上下文行
    for line_idx in start_line..=end_line {
        let line_content = lines[line_idx - 1];
        let line_str = line_idx.to_string();
        let padding_len = max_line_num_width.saturating_sub(line_str.len());
        let padding: String = std::iter::repeat(' ').take(padding_len).collect();

        if line_idx == error_line {
            // 错误行：打印行号和源代码
            out.push(format!("{}{} | {}", padding, line_str, line_content));

            // 打印指向错误位置的标记
            let marker_offset = error_col.saturating_sub(1);
            let marker: String = std::iter::repeat(' ').take(marker_offset).collect();
            let separator_padding: String =
                std::iter::repeat(' ').take(max_line_num_width).collect();
            out.push(format!("{} | {}^", separator_padding, marker));
        } else {
            // 普通上下文行
            out.push(format!("{}{} | {}", padding, line_str, line_content));
        }
    }

    // 打印分隔线
    out.push(format!("{}|--", separator));

    out
}

/// 按 `\n`、`\r\n` 或单独的 `\r` 切分物理行，与词法分析的行号一致
fn source_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\n' => {
                lines.push(&source[start..i]);
                start = i + 1;
            }
            '\r' => {
                lines.push(&source[start..i]);
                start = i + 1;
                if let Some((j, '\n')) = chars.peek().copied() {
                    chars.next();
                    start = j + 1;
                }
            }
            _ => {}
        }
    }
    if start < source.len() {
        lines.push(&source[start..]);
    }
    lines
}
