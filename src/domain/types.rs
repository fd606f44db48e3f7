// ==========================================
// 备件查询工具 - 领域类型定义
// ==========================================
// 职责: 标准字段（Canonical Field）、别名表、展示模式
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 标准字段 (Canonical Field)
// ==========================================
// 顺序即 StockRecord 字段顺序（导出列顺序依赖此顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Model,               // 型号
    MaterialDescription, // 物料描述
    Shrm,                // 展厅库存
    Home,                // 仓库库存
    Stock,               // 库存数
    UsedSpares,          // 已用备件
    Price,               // 单价
}

impl CanonicalField {
    /// 全部标准字段（按记录字段顺序）
    pub const ALL: [CanonicalField; 7] = [
        CanonicalField::Model,
        CanonicalField::MaterialDescription,
        CanonicalField::Shrm,
        CanonicalField::Home,
        CanonicalField::Stock,
        CanonicalField::UsedSpares,
        CanonicalField::Price,
    ];

    /// 必须解析成功的字段
    pub const REQUIRED: [CanonicalField; 2] =
        [CanonicalField::Model, CanonicalField::MaterialDescription];

    /// 内部字段名
    pub fn key(&self) -> &'static str {
        match self {
            CanonicalField::Model => "model",
            CanonicalField::MaterialDescription => "material_description",
            CanonicalField::Shrm => "shrm",
            CanonicalField::Home => "home",
            CanonicalField::Stock => "stock",
            CanonicalField::UsedSpares => "used_spares",
            CanonicalField::Price => "price",
        }
    }

    /// 可接受的表头别名（按优先级排列）
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Model => &["model", "partno", "partnumber", "itemcode", "material"],
            CanonicalField::MaterialDescription => &[
                "materialdescription",
                "description",
                "desc",
                "itemdesc",
                "materialdesc",
            ],
            CanonicalField::Shrm => &["shrm", "showroom"],
            CanonicalField::Home => &["home", "godown", "warehouse"],
            CanonicalField::Stock => &["stock", "qty", "quantity", "onhand"],
            CanonicalField::UsedSpares => &["usedspares", "used spares", "used"],
            CanonicalField::Price => &["price", "unitprice", "cost", "salesprice"],
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ==========================================
// 展示模式 (View Mode)
// ==========================================
// 仅影响渲染，不影响申领清单的状态变更路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Compact, // 卡片（移动端友好）
    Table,   // 表格
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Compact => write!(f, "compact"),
            ViewMode::Table => write!(f, "table"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "card" | "cards" | "mobile" => Ok(ViewMode::Compact),
            "table" => Ok(ViewMode::Table),
            other => Err(format!("未知展示模式: {}", other)),
        }
    }
}
