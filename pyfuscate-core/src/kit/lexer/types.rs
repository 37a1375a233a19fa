//! Python token 类型

use super::scanner::Token;

/// Python 词法单元种类
///
/// 与 Python 标准 tokenize 模块的分类一致，关键字以 `Name` 形式出现。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PyTokenKind {
    /// 标识符或关键字
    Name,
    /// 运算符与分隔符
    Op,
    /// 数字字面量（原样保留）
    Number,
    /// 字符串字面量（含前缀和引号）
    String,
    /// `#` 注释
    Comment,
    /// 非逻辑换行（空行、括号内换行、注释行）
    Nl,
    /// 逻辑行结束
    Newline,
    /// 缩进增加，文本为整行前导空白
    Indent,
    /// 缩进减少，文本为空
    Dedent,
    /// 输入结束
    EndMarker,
}

impl PyTokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            PyTokenKind::Name => "NAME",
            PyTokenKind::Op => "OP",
            PyTokenKind::Number => "NUMBER",
            PyTokenKind::String => "STRING",
            PyTokenKind::Comment => "COMMENT",
            PyTokenKind::Nl => "NL",
            PyTokenKind::Newline => "NEWLINE",
            PyTokenKind::Indent => "INDENT",
            PyTokenKind::Dedent => "DEDENT",
            PyTokenKind::EndMarker => "ENDMARKER",
        }
    }
}

/// Python token
pub type PyToken = Token<PyTokenKind>;

impl PyToken {
    /// 是否为指定文本的运算符
    pub fn is_op(&self, text: &str) -> bool {
        self.kind == PyTokenKind::Op && self.text == text
    }
}
