//! 词汇清单
//!
//! 预先生成的 Python 环境快照：关键字、内置名字、内置类型成员，
//! 以及「值路径 → 成员名」的映射，用于代替运行时反射。

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// 随二进制打包的 Python 3 清单
const BUNDLED_MANIFEST: &str = include_str!("../../data/python3.json");

static BUNDLED: OnceCell<Arc<Manifest>> = OnceCell::new();

/// 清单加载错误
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 词汇清单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// 生成清单的解释器版本
    pub version: String,
    /// 新模块命名空间中已有的名字
    pub environment: Vec<String>,
    /// 保留关键字
    pub keywords: Vec<String>,
    /// 内置命名空间
    pub builtins: Vec<String>,
    /// `dict` / `list` / `str` / `tuple` 的成员
    pub builtin_types: BTreeMap<String, Vec<String>>,
    /// 值路径 → 成员名
    pub objects: BTreeMap<String, Vec<String>>,
    /// 与另一路径成员完全相同的路径
    pub aliases: BTreeMap<String, String>,
    /// 可导入的模块
    pub modules: BTreeSet<String>,
    /// 解析有副作用、展开时跳过的完整路径
    pub deny: Vec<String>,
}

impl Manifest {
    /// 打包的清单，首次访问时解析
    pub fn bundled() -> Result<Arc<Manifest>, ManifestError> {
        BUNDLED
            .get_or_try_init(|| {
                let manifest = Manifest::from_json(BUNDLED_MANIFEST)?;
                debug!(target: "pyfuscate::vocabulary",
                    version = %manifest.version,
                    objects = manifest.objects.len(),
                    modules = manifest.modules.len(),
                    "Parsed bundled manifest"
                );
                Ok(Arc::new(manifest))
            })
            .map(Arc::clone)
    }

    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// 合并另一份清单，后者的条目追加到已有条目之上
    pub fn merge(&mut self, other: Manifest) {
        if !other.version.is_empty() {
            self.version = other.version;
        }
        extend_unique(&mut self.environment, other.environment);
        extend_unique(&mut self.keywords, other.keywords);
        extend_unique(&mut self.builtins, other.builtins);
        extend_unique(&mut self.deny, other.deny);

        for (name, members) in other.builtin_types {
            extend_unique(self.builtin_types.entry(name).or_default(), members);
        }
        for (path, members) in other.objects {
            // 显式成员优先于别名
            self.aliases.remove(&path);
            extend_unique(self.objects.entry(path).or_default(), members);
        }
        self.aliases.extend(other.aliases);
        self.modules.extend(other.modules);
    }

    /// 路径对应值的成员名（跟随一次别名）
    pub fn members(&self, path: &str) -> Option<&[String]> {
        let target = self.aliases.get(path).map(String::as_str).unwrap_or(path);
        self.objects.get(target).map(Vec::as_slice)
    }

    /// 是否为可导入模块
    pub fn is_module(&self, name: &str) -> bool {
        self.modules.contains(name)
    }
}

fn extend_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_manifest_parses() {
        let manifest = Manifest::bundled().unwrap();
        assert!(manifest.keywords.iter().any(|k| k == "def"));
        assert!(manifest.builtins.iter().any(|b| b == "range"));
        assert!(manifest.is_module("os"));
        assert_eq!(manifest.deny, vec!["wx.TheClipboard"]);
        for ty in ["dict", "list", "str", "tuple"] {
            assert!(manifest.builtin_types.contains_key(ty), "missing {}", ty);
        }
    }

    #[test]
    fn test_bundled_is_shared() {
        let a = Manifest::bundled().unwrap();
        let b = Manifest::bundled().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_members_follow_alias() {
        let manifest = Manifest::from_json(
            r#"{
                "objects": {"str": ["join", "split"]},
                "aliases": {"__name__": "str"}
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.members("str").unwrap().len(), 2);
        assert_eq!(manifest.members("__name__"), manifest.members("str"));
        assert!(manifest.members("missing").is_none());
    }

    #[test]
    fn test_missing_sections_default() {
        let manifest = Manifest::from_json("{}").unwrap();
        assert!(manifest.keywords.is_empty());
        assert!(!manifest.is_module("os"));
    }

    #[test]
    fn test_invalid_json() {
        let err = Manifest::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
        assert!(err.to_string().starts_with("invalid manifest"));
    }

    #[test]
    fn test_merge() {
        let mut base = Manifest::from_json(
            r#"{
                "builtins": ["len"],
                "objects": {"len": ["__call__"], "os.path": ["join"]},
                "aliases": {"print": "len"},
                "modules": ["os"],
                "deny": ["wx.TheClipboard"]
            }"#,
        )
        .unwrap();
        let extra = Manifest::from_json(
            r#"{
                "builtins": ["len", "widgetize"],
                "objects": {"acme": ["launch"], "print": ["flush"]},
                "modules": ["acme"],
                "deny": ["acme.launch"]
            }"#,
        )
        .unwrap();

        base.merge(extra);

        assert_eq!(base.builtins, vec!["len", "widgetize"]);
        assert!(base.is_module("os"));
        assert!(base.is_module("acme"));
        assert_eq!(base.members("acme").unwrap(), ["launch"]);
        assert_eq!(base.members("print").unwrap(), ["flush"]);
        assert_eq!(base.deny.len(), 2);
    }
}
