//! 源码位置
//!
//! 行号与列号从 1 开始，供错误信息使用；字节偏移从 0 开始，用于切片。
//! Python tokenize 报告的列号从 0 开始，见 [`SourcePosition::col_offset`]。

use std::fmt;

/// 源码中的一个位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePosition {
    pub line: usize,
    /// 按字符计数
    pub column: usize,
    pub byte_offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// 第一行第一列
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// 越过字符 `c` 后的位置；单独的 `\r` 也算换行
    pub fn advance(&mut self, c: char) {
        self.byte_offset += c.len_utf8();
        match c {
            '\n' | '\r' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
    }

    /// 越过 `\r\n` 中的 `\r`：只移动字节偏移，换行由随后的 `\n` 完成
    pub fn advance_carriage_return(&mut self) {
        self.byte_offset += 1;
    }

    /// tokenize 风格的列号（0 起）
    pub fn col_offset(&self) -> usize {
        self.column.saturating_sub(1)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// 半开区间 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    /// 空区间，常用于 DEDENT / ENDMARKER
    pub fn at(pos: SourcePosition) -> Self {
        Self::range(pos, pos)
    }

    pub fn range(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start.byte_offset == self.end.byte_offset
    }

    /// 区间是否跨行（三引号字符串、续行）
    pub fn is_multiline(&self) -> bool {
        self.end.line > self.start.line
    }

    /// 从原始源码中取出区间对应的文本
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start.byte_offset..self.end.byte_offset)
    }
}
