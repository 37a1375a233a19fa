//! 重命名表
//!
//! 原名到生成名的持久映射。同一原名在一次运行中总是得到同一生成名，
//! 计数器只在分配新名字时递增。

use std::collections::HashMap;

use tracing::trace;

/// 原名的形态，决定生成名前缀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameShape {
    /// 无前导下划线
    Public,
    /// 一个前导下划线
    Private,
    /// 两个及以上前导下划线
    Mangled,
}

impl NameShape {
    pub fn of(name: &str) -> Self {
        if name.starts_with("__") {
            NameShape::Mangled
        } else if name.starts_with('_') {
            NameShape::Private
        } else {
            NameShape::Public
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            NameShape::Public => "name",
            NameShape::Private => "_name",
            NameShape::Mangled => "__name",
        }
    }
}

/// 按计数器生成名字：前缀加小写十六进制（带 `0x`）
pub fn generated_name(shape: NameShape, counter: u64) -> String {
    format!("{}{:#x}", shape.prefix(), counter)
}

/// 重命名表
#[derive(Debug, Clone)]
pub struct RenameTable {
    names: HashMap<String, String>,
    counter: u64,
}

impl RenameTable {
    /// 以给定起始值创建
    pub fn new(start_counter: u64) -> Self {
        Self {
            names: HashMap::new(),
            counter: start_counter,
        }
    }

    /// 已分配的生成名
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// 返回原名对应的生成名，首次出现时分配
    pub fn rename(&mut self, name: &str) -> String {
        if let Some(existing) = self.names.get(name) {
            return existing.clone();
        }

        let generated = generated_name(NameShape::of(name), self.counter);
        trace!(target: "pyfuscate::driver",
            original = name,
            generated = %generated,
            "Allocated name"
        );
        self.counter += 1;
        self.names.insert(name.to_string(), generated.clone());
        generated
    }

    /// 下一个将被使用的计数值
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for RenameTable {
    fn default() -> Self {
        Self::new(0)
    }
}
