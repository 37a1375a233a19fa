//! 字符流抽象
//!
//! 将完整的源文本转换为Unicode字符流，支持位置追踪和任意距离预读。

use super::position::SourcePosition;

/// 字符流
pub struct CharStream {
    /// 已解码的字符
    chars: Vec<char>,
    /// 下一个待读取字符的下标
    index: usize,
    /// 当前位置
    position: SourcePosition,
}

impl CharStream {
    /// 从源文本创建字符流
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            position: SourcePosition::start(),
        }
    }

    /// 获取当前位置
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// 是否已到达末尾
    pub fn is_eof(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// 预读第n个字符（不消费）
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    /// 读取并消费一个字符
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.index += 1;
        if c == '\r' && self.check('\n') {
            self.position.advance_carriage_return();
        } else {
            self.position.advance(c);
        }
        Some(c)
    }

    /// 检查当前字符是否匹配（不消费）
    pub fn check(&self, expected: char) -> bool {
        self.peek(0) == Some(expected)
    }

    /// 检查当前字符是否在集合中（不消费）
    pub fn check_in(&self, chars: &[char]) -> bool {
        matches!(self.peek(0), Some(c) if chars.contains(&c))
    }

    /// 消费当前字符如果匹配
    ///
    /// Returns true if matched and consumed
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 检查从当前位置开始是否为给定字符串（不消费）
    pub fn check_str(&self, expected: &str) -> bool {
        expected
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }
}
