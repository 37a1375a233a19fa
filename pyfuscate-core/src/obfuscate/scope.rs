//! 缩进栈
//!
//! 每层嵌套保存一个缩进前缀，栈顶即当前输出行的前缀。

/// 缩进前缀栈，底层为空字符串且永不弹出
#[derive(Debug, Clone)]
pub struct IndentStack {
    levels: Vec<String>,
}

impl IndentStack {
    pub fn new() -> Self {
        Self {
            levels: vec![String::new()],
        }
    }

    /// INDENT：压入该行的完整前导空白
    pub fn push(&mut self, prefix: impl Into<String>) {
        self.levels.push(prefix.into());
    }

    /// DEDENT：弹出一层，底层保留
    pub fn pop(&mut self) {
        if self.levels.len() > 1 {
            self.levels.pop();
        }
    }

    /// 当前前缀
    pub fn current(&self) -> &str {
        self.levels.last().map(String::as_str).unwrap_or("")
    }

    /// 嵌套深度，顶层为 0
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut stack = IndentStack::new();
        assert_eq!(stack.current(), "");

        stack.push("    ");
        stack.push("        ");
        assert_eq!(stack.current(), "        ");
        assert_eq!(stack.depth(), 2);

        stack.pop();
        assert_eq!(stack.current(), "    ");
    }

    #[test]
    fn test_never_pops_baseline() {
        let mut stack = IndentStack::new();
        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), "");
    }

    #[test]
    fn test_prefix_is_literal() {
        let mut stack = IndentStack::new();
        stack.push("\t");
        assert_eq!(stack.current(), "\t");
    }
}
