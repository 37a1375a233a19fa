//! Python 语言 Scanner 实现
//!
//! 产生与标准 tokenize 模块一致的 token 流：
//! - NAME / OP / NUMBER / STRING / COMMENT
//! - NL（非逻辑换行）与 NEWLINE（逻辑行结束）
//! - INDENT / DEDENT（基于缩进栈）
//! - 括号内的隐式续行与 `\` 显式续行
//! - 单引号、三引号字符串及 `r`/`b`/`u`/`f` 前缀

use std::collections::VecDeque;

use super::core::{CharStream, SourcePosition};
use super::scanner::{
    is_identifier_continue, is_identifier_start, ErrorKind, LexError, ScanResult, Scanner,
    TokenBuilder,
};
use super::types::{PyToken, PyTokenKind};

use tracing::{debug, trace};

/// 三字符运算符（最长匹配优先）
const OPERATORS_3: &[&str] = &["**=", "//=", ">>=", "<<=", "..."];

/// 双字符运算符
const OPERATORS_2: &[&str] = &[
    "**", "//", "<<", ">>", "<=", ">=", "==", "!=", "->", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "@=", ":=",
];

/// 单字符运算符与分隔符
const OPERATORS_1: &str = "+-*/%@&|^~<>()[]{},:;.=";

/// 字符串前缀字母
/// 合法的字符串前缀（不区分大小写）
const STRING_PREFIXES: [&str; 8] = ["r", "u", "b", "f", "br", "rb", "fr", "rf"];

/// 制表符宽度
const TAB_SIZE: usize = 8;

/// Python 扫描器
pub struct PythonScanner {
    /// 当前 token 的起始位置（用于构建 span）
    token_start: SourcePosition,
    /// 缩进栈（列宽），始终以 0 为底
    indents: Vec<usize>,
    /// 待发出的 token（INDENT/DEDENT、空行等）
    pending: VecDeque<PyToken>,
    /// `()` `[]` `{}` 嵌套深度
    paren_depth: usize,
    /// 下一个物理行是否需要处理缩进
    at_line_start: bool,
    /// 上一物理行以 `\` 结尾
    continued: bool,
    /// 当前逻辑行是否已产生有效 token
    line_has_tokens: bool,
    /// ENDMARKER 已发出
    finished: bool,
}

impl Scanner for PythonScanner {
    type TokenKind = PyTokenKind;

    fn new() -> Self {
        trace!(target: "pyfuscate::lexer", "Creating new PythonScanner");
        Self {
            token_start: SourcePosition::start(),
            indents: vec![0],
            pending: VecDeque::new(),
            paren_depth: 0,
            at_line_start: true,
            continued: false,
            line_has_tokens: false,
            finished: false,
        }
    }

    fn next_token(&mut self, stream: &mut CharStream) -> ScanResult<PyToken> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return ScanResult::Token(token);
            }
            if self.finished {
                return ScanResult::Eof;
            }

            if self.at_line_start {
                self.at_line_start = false;
                if self.paren_depth == 0 && !self.continued {
                    if let Err(e) = self.scan_indentation(stream) {
                        return ScanResult::Error(e);
                    }
                    // 空行与注释行的换行会重置行首标记，此处已到达实际内容
                    self.at_line_start = false;
                    continue;
                }
                if stream.is_eof() {
                    return ScanResult::Error(LexError::new(
                        ErrorKind::UnexpectedEof,
                        stream.position(),
                    ));
                }
                self.continued = false;
            }

            if let Some(result) = self.scan_token(stream) {
                return result;
            }
        }
    }
}

impl PythonScanner {
    /// 当前缩进深度（不含底层）
    pub fn depth(&self) -> usize {
        self.indents.len() - 1
    }

    /// 处理新语句行首：跳过空行和注释行，比较缩进并排队 INDENT/DEDENT
    fn scan_indentation(&mut self, stream: &mut CharStream) -> Result<(), LexError> {
        loop {
            let start = stream.position();
            let mut column = 0usize;
            let mut text = String::new();

            while let Some(c) = stream.peek(0) {
                match c {
                    ' ' => column += 1,
                    '\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
                    '\x0c' => column = 0,
                    _ => break,
                }
                text.push(c);
                stream.advance();
            }

            match stream.peek(0) {
                // 文件末尾的空白，交给 finish 处理
                None => return Ok(()),
                Some('#') => {
                    self.token_start = stream.position();
                    let comment = self.scan_comment(stream);
                    self.pending.push_back(comment);
                    let nl = self.scan_line_break(stream, PyTokenKind::Nl);
                    self.pending.push_back(nl);
                    continue;
                }
                Some('\n') | Some('\r') => {
                    self.token_start = stream.position();
                    let nl = self.scan_line_break(stream, PyTokenKind::Nl);
                    self.pending.push_back(nl);
                    continue;
                }
                Some(_) => {}
            }

            let here = stream.position();
            let top = self.indents.last().copied().unwrap_or(0);

            if column > top {
                debug!(target: "pyfuscate::lexer", line = here.line, column, "Indent");
                self.indents.push(column);
                self.pending
                    .push_back(TokenBuilder::new(PyTokenKind::Indent, start).build(here, text));
            } else if column < top {
                if !self.indents.contains(&column) {
                    return Err(LexError::new(ErrorKind::InconsistentDedent, here));
                }
                while column < self.indents.last().copied().unwrap_or(0) {
                    self.indents.pop();
                    debug!(target: "pyfuscate::lexer", line = here.line, column, "Dedent");
                    self.pending
                        .push_back(TokenBuilder::new(PyTokenKind::Dedent, here).build(here, ""));
                }
            }
            return Ok(());
        }
    }

    /// 扫描一个 token；返回 None 表示未产生结果，需要继续循环
    fn scan_token(&mut self, stream: &mut CharStream) -> Option<ScanResult<PyToken>> {
        while stream.check_in(&[' ', '\t', '\x0c']) {
            stream.advance();
        }

        self.token_start = stream.position();
        trace!(target: "pyfuscate::lexer",
            line = self.token_start.line,
            column = self.token_start.column,
            "Starting token scan"
        );

        let c = match stream.peek(0) {
            Some(c) => c,
            None => return self.finish(stream),
        };

        let result = match c {
            '#' => ScanResult::Token(self.scan_comment(stream)),
            '\n' | '\r' => {
                let kind = if self.paren_depth == 0 && self.line_has_tokens {
                    PyTokenKind::Newline
                } else {
                    PyTokenKind::Nl
                };
                self.line_has_tokens = false;
                ScanResult::Token(self.scan_line_break(stream, kind))
            }
            '\\' => {
                stream.advance();
                if stream.check('\n') || stream.check('\r') {
                    stream.match_char('\r');
                    stream.match_char('\n');
                    self.continued = true;
                    self.at_line_start = true;
                    return None;
                }
                ScanResult::Error(LexError::new(ErrorKind::InvalidChar('\\'), self.token_start))
            }
            '0'..='9' => {
                let token = self.scan_number(stream);
                self.significant(token)
            }
            '.' if matches!(stream.peek(1), Some(d) if d.is_ascii_digit()) => {
                let token = self.scan_number(stream);
                self.significant(token)
            }
            '"' | '\'' => self.scan_string(stream, 0),
            c if is_identifier_start(c) => match string_prefix_len(stream) {
                Some(len) => self.scan_string(stream, len),
                None => {
                    let token = self.scan_name(stream);
                    self.significant(token)
                }
            },
            _ => self.scan_operator(stream),
        };
        Some(result)
    }

    /// 文件结束：补齐 NEWLINE、关闭所有缩进并发出 ENDMARKER
    fn finish(&mut self, stream: &CharStream) -> Option<ScanResult<PyToken>> {
        let here = stream.position();
        if self.paren_depth > 0 || self.continued {
            return Some(ScanResult::Error(LexError::new(
                ErrorKind::UnexpectedEof,
                here,
            )));
        }

        if self.line_has_tokens {
            self.line_has_tokens = false;
            self.pending
                .push_back(TokenBuilder::new(PyTokenKind::Newline, here).build(here, ""));
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.pending
                .push_back(TokenBuilder::new(PyTokenKind::Dedent, here).build(here, ""));
        }
        self.pending
            .push_back(TokenBuilder::new(PyTokenKind::EndMarker, here).build(here, ""));
        self.finished = true;
        trace!(target: "pyfuscate::lexer", "Reached EOF");
        None
    }

    /// 标记逻辑行已有内容
    fn significant(&mut self, token: PyToken) -> ScanResult<PyToken> {
        self.line_has_tokens = true;
        ScanResult::Token(token)
    }

    /// 扫描注释（不含换行符）
    fn scan_comment(&mut self, stream: &mut CharStream) -> PyToken {
        let mut text = String::new();
        while let Some(c) = stream.peek(0) {
            if c == '\n' || c == '\r' {
                break;
            }
            text.push(c);
            stream.advance();
        }
        TokenBuilder::new(PyTokenKind::Comment, self.token_start).build(stream.position(), text)
    }

    /// 扫描换行（`\n`、`\r\n` 或 `\r`），之后进入行首状态
    fn scan_line_break(&mut self, stream: &mut CharStream, kind: PyTokenKind) -> PyToken {
        let start = stream.position();
        let mut text = String::new();
        if stream.match_char('\r') {
            text.push('\r');
        }
        if stream.match_char('\n') {
            text.push('\n');
        }
        self.at_line_start = true;
        TokenBuilder::new(kind, start).build(stream.position(), text)
    }

    /// 扫描数字字面量，原样保留文本
    fn scan_number(&mut self, stream: &mut CharStream) -> PyToken {
        let mut text = String::new();

        if stream.check('0') && matches!(stream.peek(1), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'))
        {
            push_advance(stream, &mut text);
            push_advance(stream, &mut text);
            push_while(stream, &mut text, |c| c.is_ascii_hexdigit() || c == '_');
        } else {
            push_while(stream, &mut text, |c| c.is_ascii_digit() || c == '_');

            // 小数部分
            if stream.check('.') {
                push_advance(stream, &mut text);
                push_while(stream, &mut text, |c| c.is_ascii_digit() || c == '_');
            }

            // 指数部分
            if stream.check_in(&['e', 'E']) {
                let exponent_follows = match stream.peek(1) {
                    Some('+' | '-') => matches!(stream.peek(2), Some(d) if d.is_ascii_digit()),
                    Some(d) => d.is_ascii_digit(),
                    None => false,
                };
                if exponent_follows {
                    push_advance(stream, &mut text);
                    if stream.check_in(&['+', '-']) {
                        push_advance(stream, &mut text);
                    }
                    push_while(stream, &mut text, |c| c.is_ascii_digit() || c == '_');
                }
            }
        }

        // 虚数后缀
        if stream.check_in(&['j', 'J']) {
            push_advance(stream, &mut text);
        }

        TokenBuilder::new(PyTokenKind::Number, self.token_start).build(stream.position(), text)
    }

    /// 扫描字符串，`prefix_len` 为前缀字母数
    fn scan_string(&mut self, stream: &mut CharStream, prefix_len: usize) -> ScanResult<PyToken> {
        let mut text = String::new();
        for _ in 0..prefix_len {
            push_advance(stream, &mut text);
        }

        let quote = match stream.peek(0) {
            Some(q) => q,
            None => {
                return ScanResult::Error(LexError::new(
                    ErrorKind::UnterminatedString,
                    self.token_start,
                ))
            }
        };
        let triple: String = std::iter::repeat(quote).take(3).collect();

        if stream.check_str(&triple) {
            for _ in 0..3 {
                push_advance(stream, &mut text);
            }
            loop {
                match stream.peek(0) {
                    None => {
                        return ScanResult::Error(LexError::new(
                            ErrorKind::UnterminatedTripleString,
                            self.token_start,
                        ))
                    }
                    Some('\\') => {
                        push_advance(stream, &mut text);
                        push_advance(stream, &mut text);
                    }
                    Some(_) if stream.check_str(&triple) => {
                        for _ in 0..3 {
                            push_advance(stream, &mut text);
                        }
                        break;
                    }
                    Some(_) => push_advance(stream, &mut text),
                }
            }
        } else {
            push_advance(stream, &mut text);
            loop {
                match stream.peek(0) {
                    None | Some('\n') | Some('\r') => {
                        return ScanResult::Error(LexError::new(
                            ErrorKind::UnterminatedString,
                            self.token_start,
                        ))
                    }
                    Some('\\') => {
                        // 转义不解码，反斜杠加换行在字符串内续行
                        push_advance(stream, &mut text);
                        if stream.check('\r') {
                            push_advance(stream, &mut text);
                        }
                        push_advance(stream, &mut text);
                    }
                    Some(c) if c == quote => {
                        push_advance(stream, &mut text);
                        break;
                    }
                    Some(_) => push_advance(stream, &mut text),
                }
            }
        }

        let token =
            TokenBuilder::new(PyTokenKind::String, self.token_start).build(stream.position(), text);
        self.significant(token)
    }

    /// 扫描标识符（关键字同样是 NAME）
    fn scan_name(&mut self, stream: &mut CharStream) -> PyToken {
        let mut text = String::new();
        push_advance(stream, &mut text);
        push_while(stream, &mut text, is_identifier_continue);
        TokenBuilder::new(PyTokenKind::Name, self.token_start).build(stream.position(), text)
    }

    /// 扫描运算符（最长匹配）
    fn scan_operator(&mut self, stream: &mut CharStream) -> ScanResult<PyToken> {
        let matched = OPERATORS_3
            .iter()
            .chain(OPERATORS_2.iter())
            .find(|op| stream.check_str(op))
            .map(|op| op.to_string())
            .or_else(|| {
                stream
                    .peek(0)
                    .filter(|c| OPERATORS_1.contains(*c))
                    .map(|c| c.to_string())
            });

        let op = match matched {
            Some(op) => op,
            None => {
                let c = stream.advance().unwrap_or('\u{FFFD}');
                return ScanResult::Error(LexError::new(
                    ErrorKind::InvalidChar(c),
                    self.token_start,
                ));
            }
        };

        for _ in op.chars() {
            stream.advance();
        }
        match op.as_str() {
            "(" | "[" | "{" => self.paren_depth += 1,
            ")" | "]" | "}" => self.paren_depth = self.paren_depth.saturating_sub(1),
            _ => {}
        }

        let token = TokenBuilder::new(PyTokenKind::Op, self.token_start).build(stream.position(), op);
        self.significant(token)
    }
}

/// 判断当前位置是否为字符串前缀（最多两个字母后接引号），返回前缀长度
fn string_prefix_len(stream: &CharStream) -> Option<usize> {
    let mut prefix = String::new();
    for len in 1..=2 {
        prefix.push(stream.peek(len - 1)?.to_ascii_lowercase());
        if !STRING_PREFIXES.contains(&prefix.as_str()) {
            return None;
        }
        if matches!(stream.peek(len), Some('"' | '\'')) {
            return Some(len);
        }
    }
    None
}

fn push_advance(stream: &mut CharStream, text: &mut String) {
    if let Some(c) = stream.advance() {
        text.push(c);
    }
}

fn push_while(stream: &mut CharStream, text: &mut String, pred: impl Fn(char) -> bool) {
    while let Some(c) = stream.peek(0) {
        if !pred(c) {
            break;
        }
        text.push(c);
        stream.advance();
    }
}
