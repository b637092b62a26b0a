use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 查询扩展模式：决定最少生成数量和数量引导区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Simple,
    Complex,
}

impl Mode {
    /// 最少查询数量
    pub fn min_queries(self) -> usize {
        match self {
            Mode::Simple => 10,
            Mode::Complex => 20,
        }
    }

    /// 嵌入 prompt 的模式名称
    pub fn label(self) -> &'static str {
        match self {
            Mode::Simple => "AI 總覽 (簡易)",
            Mode::Complex => "AI 模式 (複雜)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Simple => "simple",
            Mode::Complex => "complex",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Mode::Simple),
            "complex" => Ok(Mode::Complex),
            other => Err(format!(
                "unknown mode '{}', expected 'simple' or 'complex'",
                other
            )),
        }
    }
}

/// 查询变换类型（六种）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Reformulation,
    Related,
    Implicit,
    Comparative,
    EntityExpansion,
    Personalized,
}

/// 全部类型，按 prompt 中的枚举顺序
pub const QUERY_TYPES: [QueryType; 6] = [
    QueryType::Reformulation,
    QueryType::Related,
    QueryType::Implicit,
    QueryType::Comparative,
    QueryType::EntityExpansion,
    QueryType::Personalized,
];

impl QueryType {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::Reformulation => "reformulation",
            QueryType::Related => "related",
            QueryType::Implicit => "implicit",
            QueryType::Comparative => "comparative",
            QueryType::EntityExpansion => "entity_expansion",
            QueryType::Personalized => "personalized",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = String;

    /// 宽松解析：忽略大小写，`-` 和空格视作 `_`，容忍 `_query` 后缀
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        let tag = normalized
            .strip_suffix("_queries")
            .or_else(|| normalized.strip_suffix("_query"))
            .unwrap_or(&normalized);

        QUERY_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| format!("unknown query type '{}'", s.trim()))
    }
}

/// 单条合成查询
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    #[serde(rename = "type")]
    pub query_type: QueryType,
    pub user_intent: String,
    pub reasoning: String,
}

/// 模型自报的生成计划
///
/// `target_query_count` 只是模型生成的元数据，不可信任，
/// 仅用于展示和诊断，不能作为循环边界或容量提示。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPlan {
    pub target_query_count: Option<i64>,
    pub reasoning_for_count: Option<String>,
}

impl GenerationPlan {
    /// 目标数量已知且与实际数量不一致时返回 (目标, 实际)
    pub fn count_mismatch(&self, actual: usize) -> Option<(i64, usize)> {
        match self.target_query_count {
            Some(target) if usize::try_from(target).ok() != Some(actual) => Some((target, actual)),
            _ => None,
        }
    }
}

/// 单条记录的校验失败信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIssue {
    /// 在 `expanded_queries` 数组中的位置（从 0 开始）
    pub index: usize,
    pub reason: String,
}

/// 一次成功生成的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub plan: Option<GenerationPlan>,
    pub records: Vec<QueryRecord>,
    pub issues: Vec<RecordIssue>,
    pub generated_at: DateTime<Utc>,
}

impl Generation {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_minimums() {
        assert_eq!(Mode::Simple.min_queries(), 10);
        assert_eq!(Mode::Complex.min_queries(), 20);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("simple".parse::<Mode>().unwrap(), Mode::Simple);
        assert_eq!(" Complex ".parse::<Mode>().unwrap(), Mode::Complex);
        assert!("medium".parse::<Mode>().is_err());
    }

    #[test]
    fn test_query_type_lenient_parse() {
        assert_eq!(
            "entity_expansion".parse::<QueryType>().unwrap(),
            QueryType::EntityExpansion
        );
        assert_eq!(
            "Entity Expansion".parse::<QueryType>().unwrap(),
            QueryType::EntityExpansion
        );
        assert_eq!(
            "related-query".parse::<QueryType>().unwrap(),
            QueryType::Related
        );
        assert_eq!(
            "Comparative Queries".parse::<QueryType>().unwrap(),
            QueryType::Comparative
        );
        assert!("navigational".parse::<QueryType>().is_err());
    }

    #[test]
    fn test_query_record_serde_uses_type_key() {
        let record = QueryRecord {
            query: "q".to_string(),
            query_type: QueryType::EntityExpansion,
            user_intent: "i".to_string(),
            reasoning: "r".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "entity_expansion");
    }

    #[test]
    fn test_count_mismatch() {
        let plan = GenerationPlan {
            target_query_count: Some(15),
            reasoning_for_count: None,
        };
        assert_eq!(plan.count_mismatch(13), Some((15, 13)));
        assert_eq!(plan.count_mismatch(15), None);

        let negative = GenerationPlan {
            target_query_count: Some(-1),
            reasoning_for_count: None,
        };
        assert_eq!(negative.count_mismatch(0), Some((-1, 0)));

        assert_eq!(GenerationPlan::default().count_mismatch(3), None);
    }
}
