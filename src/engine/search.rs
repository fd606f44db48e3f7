// ==========================================
// 备件查询工具 - 查询/匹配引擎
// ==========================================
// 职责: 型号/描述的大小写不敏感子串匹配
// 规则:
// - 实时过滤: 含 " - " 时 型号包含 AND 描述包含; 否则 型号包含 OR 描述包含
// - 加入清单: 含 " - " 时同上; 否则 型号前缀 OR 描述包含
// - 查询串按字面量匹配,不作为模式解释
// ==========================================

use crate::domain::stock::StockRecord;
use crate::engine::error::SearchError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 型号/描述分隔符
pub const QUERY_SEPARATOR: &str = " - ";

/// 联想列表默认条数上限
pub const DEFAULT_SUGGESTION_LIMIT: usize = 20;

// ==========================================
// 查询串解析
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedQuery {
    /// "型号 - 描述"（两段均已小写）
    Split { model: String, description: String },
    /// 单一关键字（已小写）
    Plain(String),
}

impl ParsedQuery {
    /// 空白查询返回 None
    fn parse(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(match trimmed.split_once(QUERY_SEPARATOR) {
            Some((model, description)) => ParsedQuery::Split {
                model: model.to_lowercase(),
                description: description.to_lowercase(),
            },
            None => ParsedQuery::Plain(trimmed.to_lowercase()),
        })
    }

    /// 实时过滤规则
    fn matches_filter(&self, record: &StockRecord) -> bool {
        match self {
            ParsedQuery::Split { model, description } => {
                contains_ci(&record.model, model)
                    && contains_ci(&record.material_description, description)
            }
            ParsedQuery::Plain(term) => {
                contains_ci(&record.model, term) || contains_ci(&record.material_description, term)
            }
        }
    }

    /// 加入清单规则（型号用前缀匹配）
    fn matches_add(&self, record: &StockRecord) -> bool {
        match self {
            ParsedQuery::Split { .. } => self.matches_filter(record),
            ParsedQuery::Plain(term) => {
                record.model.to_lowercase().starts_with(term.as_str())
                    || contains_ci(&record.material_description, term)
            }
        }
    }
}

/// 大小写不敏感包含（needle 需已小写）
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

// ==========================================
// AddResolution - 加入清单的匹配结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddResolution {
    /// 无匹配（带查询串用于提示）
    NotFound { query: String },
    /// 唯一匹配（记录下标）
    Unique(usize),
    /// 多条匹配,需显式选择（记录下标列表,按表内顺序）
    Ambiguous(Vec<usize>),
}

// ==========================================
// SearchEngine
// ==========================================
pub struct SearchEngine;

impl SearchEngine {
    /// 实时过滤
    ///
    /// # 返回
    /// - 命中记录的下标（按表内顺序）; 空查询返回空列表
    pub fn filter(&self, query: &str, records: &[StockRecord]) -> Vec<usize> {
        let Some(parsed) = ParsedQuery::parse(query) else {
            return Vec::new();
        };

        let hits: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| parsed.matches_filter(record))
            .map(|(idx, _)| idx)
            .collect();

        debug!(query = %query, hits = hits.len(), "实时过滤");
        hits
    }

    /// 加入清单时的匹配判定
    pub fn resolve_for_add(&self, query: &str, records: &[StockRecord]) -> AddResolution {
        let Some(parsed) = ParsedQuery::parse(query) else {
            return AddResolution::NotFound {
                query: query.trim().to_string(),
            };
        };

        let mut hits: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| parsed.matches_add(record))
            .map(|(idx, _)| idx)
            .collect();

        debug!(query = %query, hits = hits.len(), "加入清单匹配");
        match hits.len() {
            0 => AddResolution::NotFound {
                query: query.trim().to_string(),
            },
            1 => AddResolution::Unique(hits.remove(0)),
            _ => AddResolution::Ambiguous(hits),
        }
    }

    /// 在候选集中按序号（0 起）选择
    pub fn select_candidate(&self, candidates: &[usize], index: usize) -> Result<usize, SearchError> {
        candidates
            .get(index)
            .copied()
            .ok_or(SearchError::IndexOutOfRange {
                index,
                count: candidates.len(),
            })
    }

    /// 可用数量: 仅当过滤结果恰好一条时给出
    pub fn available_quantity(&self, matches: &[usize], records: &[StockRecord]) -> Option<i64> {
        match matches {
            [only] => records.get(*only).map(StockRecord::available_quantity),
            _ => None,
        }
    }

    /// 输入联想: "型号 - 描述" 文本包含查询串（大小写不敏感）
    pub fn suggestions(&self, query: &str, records: &[StockRecord], limit: usize) -> Vec<String> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        records
            .iter()
            .map(StockRecord::suggestion_label)
            .filter(|label| label.to_lowercase().contains(&term))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str, description: &str) -> StockRecord {
        StockRecord {
            model: model.to_string(),
            material_description: description.to_string(),
            ..StockRecord::default()
        }
    }

    fn sample() -> Vec<StockRecord> {
        vec![
            record("M100", "Blade"),
            record("M101", "Guard"),
            record("XM1", "Carbon brush"),
            record("B-200", "M1 adapter"),
        ]
    }

    #[test]
    fn test_filter_empty_query() {
        assert!(SearchEngine.filter("", &sample()).is_empty());
        assert!(SearchEngine.filter("   ", &sample()).is_empty());
    }

    #[test]
    fn test_filter_plain_is_union_of_model_and_description() {
        let records = sample();
        assert_eq!(SearchEngine.filter("m1", &records), vec![0, 1, 2, 3]);
        assert_eq!(SearchEngine.filter("BRUSH", &records), vec![2]);
        assert_eq!(SearchEngine.filter("zzz", &records), Vec::<usize>::new());
    }

    #[test]
    fn test_filter_split_is_intersection() {
        let records = sample();
        assert_eq!(SearchEngine.filter("m10 - blade", &records), vec![0]);
        assert_eq!(SearchEngine.filter("M100 - Guard", &records), Vec::<usize>::new());
    }

    #[test]
    fn test_filter_literal_special_characters() {
        let records = vec![record("A.1", "x"), record("AB1", "y"), record("C(1)", "z*")];
        assert_eq!(SearchEngine.filter("a.1", &records), vec![0]);
        assert_eq!(SearchEngine.filter("(1)", &records), vec![2]);
        assert_eq!(SearchEngine.filter("z*", &records), vec![2]);
        assert_eq!(SearchEngine.filter(".*", &records), Vec::<usize>::new());
    }

    #[test]
    fn test_resolve_for_add_model_prefix() {
        let records = sample();
        // "m1" 是 XM1 的子串但不是前缀; B-200 的描述包含 "m1"
        assert_eq!(
            SearchEngine.resolve_for_add("m1", &records),
            AddResolution::Ambiguous(vec![0, 1, 3])
        );
        assert_eq!(
            SearchEngine.resolve_for_add("xm", &records),
            AddResolution::Unique(2)
        );
    }

    #[test]
    fn test_resolve_for_add_split_query() {
        let records = sample();
        assert_eq!(
            SearchEngine.resolve_for_add("M100 - Blade", &records),
            AddResolution::Unique(0)
        );
    }

    #[test]
    fn test_resolve_for_add_not_found() {
        let records = sample();
        assert_eq!(
            SearchEngine.resolve_for_add(" Q9 ", &records),
            AddResolution::NotFound {
                query: "Q9".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_for_add_duplicates_are_distinct() {
        let records = vec![record("M5", "Nut"), record("M5", "Nut")];
        assert_eq!(
            SearchEngine.resolve_for_add("M5 - Nut", &records),
            AddResolution::Ambiguous(vec![0, 1])
        );
    }

    #[test]
    fn test_select_candidate_bounds() {
        let candidates = vec![4, 7, 9];
        assert_eq!(SearchEngine.select_candidate(&candidates, 0), Ok(4));
        assert_eq!(SearchEngine.select_candidate(&candidates, 2), Ok(9));
        assert_eq!(
            SearchEngine.select_candidate(&candidates, 3),
            Err(SearchError::IndexOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_available_quantity_only_for_single_match() {
        let mut records = sample();
        records[0].stock = 5;
        records[0].used_spares = 7;

        assert_eq!(SearchEngine.available_quantity(&[0], &records), Some(-2));
        assert_eq!(SearchEngine.available_quantity(&[0, 1], &records), None);
        assert_eq!(SearchEngine.available_quantity(&[], &records), None);
    }

    #[test]
    fn test_suggestions_limit() {
        let records: Vec<StockRecord> = (0..30)
            .map(|i| record(&format!("P{}", i), "Spring"))
            .collect();

        let hits = SearchEngine.suggestions("spring", &records, DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(hits.len(), 20);
        assert_eq!(hits[0], "P0 - Spring");
        assert!(SearchEngine.suggestions(" ", &records, 5).is_empty());
        // 联想项可直接作为 "型号 - 描述" 查询使用
        assert_eq!(SearchEngine.filter(&hits[3], &records), vec![3]);
    }
}
