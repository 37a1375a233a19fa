//! 限定名解析
//!
//! 从逻辑行的某个位置贪婪匹配 `NAME (. NAME)*`。

use crate::kit::lexer::{PyToken, PyTokenKind};

/// 一条限定名链
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedName {
    /// 按顺序排列的 NAME 段
    pub parts: Vec<String>,
    /// 匹配的 token 数，每个 NAME 和每个 `.` 各计一次
    pub consumed: usize,
}

impl DottedName {
    /// 以 `.` 连接各段
    pub fn joined(&self) -> String {
        self.parts.join(".")
    }
}

/// 从 `tokens[0]` 开始解析限定名
///
/// 交替期望 NAME 与 `.`，遇到不符合的 token 即停止。末尾多出的 `.`
/// 同样计入 `consumed`。
pub fn resolve_dotted(tokens: &[PyToken]) -> DottedName {
    let mut parts = Vec::new();
    let mut consumed = 0;
    let mut expect_name = true;

    for token in tokens {
        if expect_name {
            if token.kind != PyTokenKind::Name {
                break;
            }
            parts.push(token.text.clone());
            expect_name = false;
        } else {
            if !token.is_op(".") {
                break;
            }
            expect_name = true;
        }
        consumed += 1;
    }

    DottedName { parts, consumed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::lexer::tokenize;

    fn resolve(source: &str) -> DottedName {
        let tokens = tokenize(source).unwrap();
        resolve_dotted(&tokens)
    }

    #[test]
    fn test_single_name() {
        let dotted = resolve("widget = 1\n");
        assert_eq!(dotted.parts, vec!["widget"]);
        assert_eq!(dotted.consumed, 1);
    }

    #[test]
    fn test_dotted_chain() {
        let dotted = resolve("os.path.join(a)\n");
        assert_eq!(dotted.parts, vec!["os", "path", "join"]);
        assert_eq!(dotted.consumed, 5);
        assert_eq!(dotted.joined(), "os.path.join");
    }

    #[test]
    fn test_stops_at_adjacent_name() {
        let dotted = resolve("for item in range(3):\n");
        assert_eq!(dotted.parts, vec!["for"]);
        assert_eq!(dotted.consumed, 1);
    }

    #[test]
    fn test_trailing_dot_is_counted() {
        let dotted = resolve("alpha.(1)\n");
        assert_eq!(dotted.parts, vec!["alpha"]);
        assert_eq!(dotted.consumed, 2);
    }

    #[test]
    fn test_non_name_start() {
        let dotted = resolve("(alpha)\n");
        assert!(dotted.parts.is_empty());
        assert_eq!(dotted.consumed, 0);
    }
}
