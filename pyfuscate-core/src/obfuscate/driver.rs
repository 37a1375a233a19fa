//! 逻辑行驱动
//!
//! 逐个接收 token，缓冲到 NEWLINE 为止，然后改写整行并写出。
//! 缩进信号更新缩进栈；已知名字集合与重命名表贯穿整个运行。

use std::io::{self, Write};
use std::sync::Arc;

use pyfuscate_config::{RenameConfig, VocabularyConfig};
use tracing::{debug, trace};

use super::dotted::{resolve_dotted, DottedName};
use super::manifest::Manifest;
use super::rename::RenameTable;
use super::scope::IndentStack;
use super::vocabulary::{ImportWarning, KnownNames};
use super::ObfuscateSummary;
use crate::kit::lexer::{PyToken, PyTokenKind};

/// 改写引擎
pub struct Obfuscator<W: Write> {
    sink: W,
    vocabulary: KnownNames,
    renames: RenameTable,
    indents: IndentStack,
    /// 当前逻辑行
    line: Vec<PyToken>,
    receiver: String,
    lines_written: usize,
    warnings: Vec<ImportWarning>,
}

impl<W: Write> Obfuscator<W> {
    /// 创建引擎；已知名字集合在此一次性预置
    pub fn new(
        sink: W,
        manifest: Arc<Manifest>,
        rename: &RenameConfig,
        vocabulary: &VocabularyConfig,
    ) -> Self {
        Self {
            sink,
            vocabulary: KnownNames::seeded(manifest, vocabulary),
            renames: RenameTable::new(rename.start_counter),
            indents: IndentStack::new(),
            line: Vec::new(),
            receiver: rename.receiver_name.clone(),
            lines_written: 0,
            warnings: Vec::new(),
        }
    }

    /// 写出固定的首行
    pub fn write_header(&mut self, header: &str) -> io::Result<()> {
        writeln!(self.sink, "{}", header)
    }

    /// 接收一个 token
    pub fn push(&mut self, token: PyToken) -> io::Result<()> {
        match token.kind {
            PyTokenKind::Comment | PyTokenKind::Nl | PyTokenKind::EndMarker => Ok(()),
            PyTokenKind::Indent => {
                self.indents.push(token.text);
                Ok(())
            }
            PyTokenKind::Dedent => {
                self.indents.pop();
                Ok(())
            }
            PyTokenKind::Newline => self.flush_line(),
            _ => {
                self.line.push(token);
                Ok(())
            }
        }
    }

    /// 改写一个逻辑行（不含缩进与换行）
    ///
    /// `from` 开头的行返回 None；`import` 开头的行不做重命名。
    pub fn rewrite_line(&mut self, tokens: &[PyToken]) -> Option<String> {
        let first = tokens.first()?;
        if first.text == "from" {
            debug!(target: "pyfuscate::driver", line = first.line(), "Dropped from-import line");
            return None;
        }
        let import_line = first.text == "import";

        let mut out = String::new();
        let mut brackets: Vec<usize> = Vec::new();
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];
            match token.kind {
                PyTokenKind::Name => {
                    let dotted = resolve_dotted(&tokens[index..]);
                    let text = if import_line {
                        self.rewrite_import(&dotted)
                    } else {
                        self.rewrite_chain(&dotted)
                    };
                    out.push_str(&text);
                    out.push(' ');
                    index += dotted.consumed.max(1);
                    continue;
                }
                PyTokenKind::Op if token.text == "(" => {
                    brackets.push(index);
                    out.push_str("(  ");
                }
                PyTokenKind::Op if token.text == ")" => {
                    brackets.pop();
                    out.push_str(")  ");
                }
                _ => {
                    out.push_str(&token.text);
                    out.push(' ');
                }
            }
            index += 1;
        }

        Some(out)
    }

    /// 完成运行，返回输出端与运行摘要
    pub fn finish(mut self) -> io::Result<(W, ObfuscateSummary)> {
        if !self.line.is_empty() {
            self.flush_line()?;
        }
        self.sink.flush()?;

        let summary = ObfuscateSummary {
            lines_written: self.lines_written,
            renamed: self.renames.len(),
            known_names: self.vocabulary.len(),
            next_counter: self.renames.counter(),
            warnings: self.warnings,
        };
        debug!(target: "pyfuscate::driver",
            lines = summary.lines_written,
            renamed = summary.renamed,
            "Finished run"
        );
        Ok((self.sink, summary))
    }

    pub fn vocabulary(&self) -> &KnownNames {
        &self.vocabulary
    }

    pub fn renames(&self) -> &RenameTable {
        &self.renames
    }

    pub fn indentation(&self) -> &str {
        self.indents.current()
    }

    pub fn warnings(&self) -> &[ImportWarning] {
        &self.warnings
    }

    fn flush_line(&mut self) -> io::Result<()> {
        let tokens = std::mem::take(&mut self.line);
        if tokens.is_empty() {
            return Ok(());
        }

        if let Some(text) = self.rewrite_line(&tokens) {
            trace!(target: "pyfuscate::driver",
                depth = self.indents.depth(),
                text = %text,
                "Writing line"
            );
            writeln!(self.sink, "{}{}", self.indents.current(), text)?;
            self.lines_written += 1;
        }
        Ok(())
    }

    /// import 行：限定名原样输出，新模块触发导入展开
    fn rewrite_import(&mut self, dotted: &DottedName) -> String {
        let name = dotted.joined();
        if !self.vocabulary.is_known(&name) {
            match self.vocabulary.import_module(&name) {
                Ok(added) => {
                    debug!(target: "pyfuscate::driver", module = %name, added = added.len(), "Import");
                }
                Err(warning) => {
                    debug!(target: "pyfuscate::driver", module = %warning.module, "Import failed");
                    self.warnings.push(warning);
                }
            }
        }
        name
    }

    /// 普通行：逐段决定保留、沿用或新分配生成名
    fn rewrite_chain(&mut self, dotted: &DottedName) -> String {
        let mut known_chain = false;
        let mut rewritten = Vec::with_capacity(dotted.parts.len());

        for part in &dotted.parts {
            if *part == self.receiver {
                known_chain = false;
            }

            if known_chain {
                // 已知对象上的成员访问视为新词汇
                self.vocabulary.register(part);
                rewritten.push(part.clone());
            } else if self.vocabulary.is_known(part) {
                known_chain = true;
                rewritten.push(part.clone());
            } else {
                rewritten.push(self.renames.rename(part));
            }
        }
        rewritten.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::lexer::tokenize;

    fn obfuscator(start_counter: u64, preserve: &[&str]) -> Obfuscator<Vec<u8>> {
        let rename = RenameConfig {
            start_counter,
            ..Default::default()
        };
        let vocabulary = VocabularyConfig {
            preserve_names: preserve.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        Obfuscator::new(Vec::new(), Manifest::bundled().unwrap(), &rename, &vocabulary)
    }

    fn run_with(mut engine: Obfuscator<Vec<u8>>, source: &str) -> (String, ObfuscateSummary) {
        for token in tokenize(source).unwrap() {
            engine.push(token).unwrap();
        }
        let (sink, summary) = engine.finish().unwrap();
        (String::from_utf8(sink).unwrap(), summary)
    }

    fn run(source: &str) -> String {
        run_with(obfuscator(0, &[]), source).0
    }

    fn rewrite(engine: &mut Obfuscator<Vec<u8>>, source: &str) -> Option<String> {
        let tokens: Vec<_> = tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| {
                !matches!(t.kind, PyTokenKind::Newline | PyTokenKind::EndMarker)
            })
            .collect();
        engine.rewrite_line(&tokens)
    }

    #[test]
    fn test_assignment() {
        assert_eq!(run("x = 1\n"), "name0x0 = 1 \n");
    }

    #[test]
    fn test_header_written_first() {
        let mut engine = obfuscator(0, &[]);
        engine.write_header("#!/usr/bin/python").unwrap();
        let (out, _) = run_with(engine, "x = 1\n");
        assert_eq!(out, "#!/usr/bin/python\nname0x0 = 1 \n");
    }

    #[test]
    fn test_parentheses_get_wide_spacing() {
        assert_eq!(run("print(total)\n"), "print (  name0x0 )  \n");
        assert_eq!(run("alpha[0] = {}\n"), "name0x0 [ 0 ] = { } \n");
    }

    #[test]
    fn test_consistent_rename_across_lines() {
        let out = run("total = 0\nfor item in range(3):\n    total = total + item\n");
        assert_eq!(
            out,
            "name0x0 = 0 \n\
             for name0x1 in range (  3 )  : \n    \
             name0x0 = name0x0 + name0x1 \n"
        );
    }

    #[test]
    fn test_indentation_follows_stack() {
        let out = run("if alpha:\n    if beta:\n        gamma = 1\n    delta = 2\nepsilon = 3\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "if name0x0 : ");
        assert_eq!(lines[1], "    if name0x1 : ");
        assert_eq!(lines[2], "        name0x2 = 1 ");
        assert_eq!(lines[3], "    name0x3 = 2 ");
        assert_eq!(lines[4], "name0x4 = 3 ");
    }

    #[test]
    fn test_blank_and_comment_lines_keep_block_indentation() {
        assert_eq!(
            run("if alpha:\n    beta = 1\n\n    gamma = 2\n"),
            "if name0x0 : \n    name0x1 = 1 \n    name0x2 = 2 \n"
        );
        assert_eq!(
            run("def widget():\n    # note\n\n        # deeper note\n    return 1\n"),
            "def name0x0 (  )  : \n    return 1 \n"
        );
    }

    #[test]
    fn test_comments_and_blank_lines_dropped() {
        assert_eq!(run("# heading\n\nwidget = 1  # note\n"), "name0x0 = 1 \n");
    }

    #[test]
    fn test_strings_and_numbers_verbatim() {
        assert_eq!(
            run("widget = 'text' + 0x1F\n"),
            "name0x0 = 'text' + 0x1F \n"
        );
    }

    #[test]
    fn test_name_shapes() {
        assert_eq!(
            run("_hidden = __secret = plain\n"),
            "_name0x0 = __name0x1 = name0x2 \n"
        );
    }

    #[test]
    fn test_start_counter() {
        let (out, summary) = run_with(obfuscator(10, &[]), "alpha = beta\n");
        assert_eq!(out, "name0xa = name0xb \n");
        assert_eq!(summary.next_counter, 12);
    }

    #[test]
    fn test_import_line_preserved() {
        let mut engine = obfuscator(0, &[]);
        assert_eq!(rewrite(&mut engine, "import os").unwrap(), "import os ");
        assert!(engine.vocabulary().is_known("os"));
        assert!(engine.vocabulary().is_known("getcwd"));
        assert!(engine.renames().is_empty());
    }

    #[test]
    fn test_import_dotted_module() {
        let mut engine = obfuscator(0, &[]);
        assert_eq!(
            rewrite(&mut engine, "import os.path, sys").unwrap(),
            "import os.path , sys "
        );
        assert!(engine.vocabulary().is_known("os.path"));
        assert!(engine.vocabulary().is_known("splitext"));
        assert!(engine.warnings().is_empty());
    }

    #[test]
    fn test_unknown_import_warns() {
        let mut engine = obfuscator(0, &[]);
        assert_eq!(
            rewrite(&mut engine, "import no_such_module").unwrap(),
            "import no_such_module "
        );
        assert_eq!(engine.warnings().len(), 1);
        assert_eq!(engine.warnings()[0].module, "no_such_module");
        // 名字仍被登记，之后不再重命名
        assert_eq!(
            rewrite(&mut engine, "no_such_module.run()").unwrap(),
            "no_such_module.run (  )  "
        );
    }

    #[test]
    fn test_from_import_dropped() {
        let mut engine = obfuscator(0, &[]);
        assert_eq!(rewrite(&mut engine, "from os import path"), None);
        assert_eq!(run("from os import path\nwidget = 1\n"), "name0x0 = 1 \n");
    }

    #[test]
    fn test_member_of_known_becomes_known() {
        let mut engine = obfuscator(0, &[]);
        assert_eq!(
            rewrite(&mut engine, "print.gadget").unwrap(),
            "print.gadget "
        );
        assert!(engine.vocabulary().is_known("gadget"));
        assert_eq!(rewrite(&mut engine, "gadget = 1").unwrap(), "gadget = 1 ");
    }

    #[test]
    fn test_private_chain_renamed_segmentwise() {
        let mut engine = obfuscator(0, &[]);
        assert_eq!(
            rewrite(&mut engine, "widget.gadget.upper()").unwrap(),
            "name0x0.name0x1.upper (  )  "
        );
    }

    #[test]
    fn test_receiver_resets_known_chain() {
        let mut engine = obfuscator(0, &[]);
        let out = rewrite(&mut engine, "def run(self):").unwrap();
        assert_eq!(out, "def name0x0 (  name0x1 )  : ");
        // self 已被重命名，其后成员不会因为前面的已知名字而保留
        let out = rewrite(&mut engine, "print.self.widget").unwrap();
        assert_eq!(out, "print.name0x1.name0x2 ");
    }

    #[test]
    fn test_custom_receiver_name() {
        let rename = RenameConfig {
            receiver_name: "this".to_string(),
            ..Default::default()
        };
        let mut engine = Obfuscator::new(
            Vec::new(),
            Manifest::bundled().unwrap(),
            &rename,
            &VocabularyConfig::default(),
        );
        let out = rewrite(&mut engine, "print.self.this").unwrap();
        assert_eq!(out, "print.self.name0x0 ");
    }

    #[test]
    fn test_preserve_names_kept() {
        let (out, _) = run_with(obfuscator(0, &["widget"]), "widget = gadget\n");
        assert_eq!(out, "widget = name0x0 \n");
    }

    #[test]
    fn test_summary() {
        let (_, summary) = run_with(
            obfuscator(0, &[]),
            "import no_such_module\nalpha = 1\nbeta = alpha\n",
        );
        assert_eq!(summary.lines_written, 3);
        assert_eq!(summary.renamed, 2);
        assert_eq!(summary.next_counter, 2);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.known_names > 0);
    }

    #[test]
    fn test_multiline_brackets_joined() {
        assert_eq!(
            run("widget = max(alpha,\n             beta)\n"),
            "name0x0 = max (  name0x1 , name0x2 )  \n"
        );
    }
}
