//! 已知名字集合
//!
//! 记录不能被重命名的标识符：语言关键字、内置名字、内置类型成员、
//! 已导入模块的成员以及用户指定的保留名。集合在一次运行中只增不减。

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use pyfuscate_config::VocabularyConfig;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use super::manifest::Manifest;

/// 模块加载失败（非致命）
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Import error for: {module}")]
pub struct ImportWarning {
    pub module: String,
}

/// 已知名字集合
pub struct KnownNames {
    manifest: Arc<Manifest>,
    known: HashSet<String>,
    /// 可解析为值的根名字（内置、环境名字、已导入模块）
    bound: HashSet<String>,
    deny: HashSet<String>,
}

impl KnownNames {
    /// 空集合，不做任何预置
    pub fn empty(manifest: Arc<Manifest>) -> Self {
        let deny = manifest.deny.iter().cloned().collect();
        Self {
            manifest,
            known: HashSet::new(),
            bound: HashSet::new(),
            deny,
        }
    }

    /// 按固定顺序预置：环境名字与内置名字、关键字、内置类型成员、
    /// 反射展开，最后是保留名
    pub fn seeded(manifest: Arc<Manifest>, config: &VocabularyConfig) -> Self {
        let mut names = Self::empty(Arc::clone(&manifest));
        names.deny.extend(config.deny_list.iter().cloned());

        for name in manifest.environment.iter().chain(&manifest.builtins) {
            names.bound.insert(name.clone());
            names.register(name);
        }
        for keyword in &manifest.keywords {
            names.register(keyword);
        }
        for members in manifest.builtin_types.values() {
            for member in members {
                names.register(member);
            }
        }
        let seeded = names.len();

        names.expand_startup();
        debug!(target: "pyfuscate::vocabulary",
            seeded,
            expanded = names.len() - seeded,
            "Seeded known names"
        );

        for name in &config.preserve_names {
            names.register(name);
        }
        names
    }

    /// 是否为已知名字
    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// 登记名字，返回是否为新名字
    pub fn register(&mut self, name: &str) -> bool {
        if self.known.contains(name) {
            return false;
        }
        trace!(target: "pyfuscate::vocabulary", name, "Registered known name");
        self.known.insert(name.to_string());
        true
    }

    /// 是否在禁止展开列表中
    pub fn is_denied(&self, path: &str) -> bool {
        self.deny.contains(path)
    }

    /// 将路径解析为值并返回其成员名
    ///
    /// 根名字未绑定、路径被禁止或清单中没有该值时返回 None。
    pub fn resolve(&self, path: &str) -> Option<&[String]> {
        let root = path.split('.').next().unwrap_or(path);
        if !self.bound.contains(root) || self.is_denied(path) {
            return None;
        }
        self.manifest.members(path)
    }

    /// 从限定路径展开两层成员，返回新登记的名字
    pub fn expand_from(&mut self, path: &str) -> BTreeSet<String> {
        let mut added = BTreeSet::new();
        let members = match self.resolve(path) {
            Some(members) => members.to_vec(),
            None => return added,
        };

        for member in &members {
            if self.register(member) {
                added.insert(member.clone());
            }
        }
        for member in &members {
            let nested = format!("{}.{}", path, member);
            if self.is_denied(&nested) {
                debug!(target: "pyfuscate::vocabulary", path = %nested, "Skipped denied path");
                continue;
            }
            let inner = match self.resolve(&nested) {
                Some(inner) => inner.to_vec(),
                None => continue,
            };
            for name in inner {
                if self.register(&name) {
                    added.insert(name);
                }
            }
        }
        added
    }

    /// 导入模块：登记名字，加载成功后绑定其根名字并展开成员
    pub fn import_module(&mut self, module: &str) -> Result<BTreeSet<String>, ImportWarning> {
        self.register(module);

        if !self.manifest.is_module(module) {
            debug!(target: "pyfuscate::vocabulary", module, "Module not found in manifest");
            return Err(ImportWarning {
                module: module.to_string(),
            });
        }

        let root = module.split('.').next().unwrap_or(module);
        self.bound.insert(root.to_string());
        let added = self.expand_from(module);
        debug!(target: "pyfuscate::vocabulary",
            module,
            added = added.len(),
            "Imported module"
        );
        Ok(added)
    }

    /// 已知名字数量
    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// 对当前每个名字尝试解析，登记其成员，再对每个成员名单独解析一层
    fn expand_startup(&mut self) {
        let mut snapshot: Vec<String> = self.known.iter().cloned().collect();
        snapshot.sort();

        for name in snapshot {
            let members = match self.resolve(&name) {
                Some(members) => members.to_vec(),
                None => continue,
            };
            for member in &members {
                self.register(member);
            }
            for member in members {
                if self.is_denied(&member) {
                    continue;
                }
                if let Some(inner) = self.resolve(&member).map(<[String]>::to_vec) {
                    for name in inner {
                        self.register(&name);
                    }
                }
            }
        }
    }
}
