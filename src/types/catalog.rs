use crate::error::{CareerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Static description of one assessment pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSpec {
    pub key: &'static str,
    /// Item field that names the facet a response counts toward.
    pub group_key: &'static str,
    pub title: &'static str,
    pub export_prefix: Option<&'static str>,
    pub ranked: bool,
    pub future_fit: bool,
}

const fn pool(
    key: &'static str,
    group_key: &'static str,
    title: &'static str,
    export_prefix: Option<&'static str>,
    ranked: bool,
    future_fit: bool,
) -> PoolSpec {
    PoolSpec {
        key,
        group_key,
        title,
        export_prefix,
        ranked,
        future_fit,
    }
}

pub const POOLS: [PoolSpec; 12] = [
    pool("big5", "trait", "Personality (Big Five)", Some("BIG5"), true, false),
    pool("riasec", "domain", "Interests (RIASEC)", Some("RIASEC"), true, false),
    pool("learning", "modality", "Learning Preferences", Some("LEARN"), false, false),
    pool("academic", "subject", "Academics", Some("ACAD"), true, false),
    pool("skills", "skill", "Skills", Some("SKILL"), true, false),
    pool("values", "value", "Values & Life", Some("VALUE"), true, false),
    pool("extracurricular", "activity", "Extracurriculars", None, false, false),
    pool("ai_future", "facet", "AI & Automation", Some("AI"), true, true),
    pool("creativity", "facet", "Creativity", Some("CRE"), true, true),
    pool("entrepreneurship", "facet", "Entrepreneurship", Some("ENT"), true, true),
    pool("resilience", "facet", "Resilience", Some("RES"), true, true),
    pool("ethics_global", "facet", "Ethics & Global", Some("ETH"), true, true),
];

pub fn pool_spec(key: &str) -> Option<&'static PoolSpec> {
    POOLS.iter().find(|spec| spec.key == key)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub facet: String,
    pub reverse: bool,
}

impl Item {
    pub fn new(id: &str, text: &str, facet: &str, reverse: bool) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            facet: facet.to_string(),
            reverse,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool {
    pub name: String,
    pub items: Vec<Item>,
}

impl Pool {
    pub fn new(name: &str, items: Vec<Item>) -> Self {
        Self {
            name: name.to_string(),
            items,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    pools: BTreeMap<String, Pool>,
}

impl ItemCatalog {
    pub fn from_pools(pools: Vec<Pool>) -> Self {
        Self {
            pools: pools
                .into_iter()
                .map(|pool| (pool.name.clone(), pool))
                .collect(),
        }
    }

    /// Parses `{pool: [item, ...]}` records, reading each item's facet from
    /// the field its pool declares in [`POOLS`]. Pools outside the registry
    /// are returned as skipped names.
    pub fn from_json(content: &str) -> Result<(Self, Vec<String>)> {
        let raw: BTreeMap<String, Vec<Map<String, Value>>> = serde_json::from_str(content)?;
        let mut pools = Vec::new();
        let mut skipped = Vec::new();
        let mut seen_ids = HashSet::new();

        for (name, records) in raw {
            let Some(spec) = pool_spec(&name) else {
                skipped.push(name);
                continue;
            };
            let mut items = Vec::with_capacity(records.len());
            for (index, record) in records.iter().enumerate() {
                let item = parse_item(spec, index, record)?;
                if !seen_ids.insert(item.id.clone()) {
                    return Err(CareerError::AssessmentParse(format!(
                        "duplicate item id: {}",
                        item.id
                    )));
                }
                items.push(item);
            }
            pools.push(Pool::new(&name, items));
        }

        Ok((Self::from_pools(pools), skipped))
    }

    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.get(name)
    }

    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn item_count(&self) -> usize {
        self.pools.values().map(|pool| pool.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.pools
            .values()
            .any(|pool| pool.items.iter().any(|item| item.id == id))
    }
}

fn parse_item(spec: &PoolSpec, index: usize, record: &Map<String, Value>) -> Result<Item> {
    let field = |name: &str| -> Result<String> {
        match record.get(name) {
            Some(Value::String(value)) => Ok(value.clone()),
            _ => Err(CareerError::AssessmentParse(format!(
                "{}[{index}] is missing string field '{name}'",
                spec.key
            ))),
        }
    };

    let id = field("id")?;
    let facet = field(spec.group_key)?;
    let text = match record.get("text") {
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    };
    let reverse = match record.get("reverse") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            return Err(CareerError::AssessmentParse(format!(
                "{}[{index}] ({id}) has a non-boolean 'reverse' flag",
                spec.key
            )))
        }
    };

    Ok(Item {
        id,
        text,
        facet,
        reverse,
    })
}

pub type WeightTable = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(default = "unnamed_cluster")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub weights: WeightTable,
}

fn unnamed_cluster() -> String {
    "(Unnamed)".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMapping {
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub notes: String,
}

impl ClusterMapping {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_five_future_fit_pools() {
        let keys: Vec<_> = POOLS
            .iter()
            .filter(|spec| spec.future_fit)
            .map(|spec| spec.key)
            .collect();
        assert_eq!(
            keys,
            vec![
                "ai_future",
                "creativity",
                "entrepreneurship",
                "resilience",
                "ethics_global"
            ]
        );
    }

    #[test]
    fn catalog_reads_facet_from_pool_group_key() {
        let json = r#"{
            "riasec": [
                {"id": "r1", "text": "I like fixing engines", "domain": "Realistic"},
                {"id": "r2", "text": "I avoid painting", "domain": "Artistic", "reverse": true}
            ],
            "big5": [
                {"id": "b1", "text": "I plan ahead", "trait": "Conscientiousness"}
            ]
        }"#;

        let (catalog, skipped) = ItemCatalog::from_json(json).expect("catalog should parse");
        assert!(skipped.is_empty());
        let riasec = catalog.pool("riasec").expect("riasec pool should exist");
        assert_eq!(
            riasec.items,
            vec![
                Item::new("r1", "I like fixing engines", "Realistic", false),
                Item::new("r2", "I avoid painting", "Artistic", true),
            ]
        );
        assert_eq!(catalog.item_count(), 3);
        assert!(catalog.contains_item("b1"));
    }

    #[test]
    fn catalog_rejects_item_without_group_key() {
        let json = r#"{"big5": [{"id": "b1", "text": "x", "domain": "Realistic"}]}"#;
        let err = ItemCatalog::from_json(json).expect_err("missing trait should fail");
        assert!(err.to_string().contains("'trait'"));
    }

    #[test]
    fn catalog_rejects_duplicate_ids_across_pools() {
        let json = r#"{
            "big5": [{"id": "x1", "trait": "Openness"}],
            "riasec": [{"id": "x1", "domain": "Social"}]
        }"#;
        let err = ItemCatalog::from_json(json).expect_err("duplicate id should fail");
        assert!(err.to_string().contains("duplicate item id: x1"));
    }

    #[test]
    fn catalog_rejects_non_boolean_reverse() {
        let json = r#"{"creativity": [{"id": "c1", "facet": "Novelty", "reverse": "yes"}]}"#;
        assert!(ItemCatalog::from_json(json).is_err());
    }

    #[test]
    fn catalog_skips_unknown_pools() {
        let json = r#"{"astrology": [{"id": "z1", "sign": "Leo"}]}"#;
        let (catalog, skipped) = ItemCatalog::from_json(json).expect("catalog should parse");
        assert!(catalog.is_empty());
        assert_eq!(skipped, vec!["astrology".to_string()]);
    }

    #[test]
    fn mapping_fills_missing_cluster_fields() {
        let mapping = ClusterMapping::from_json(
            r#"{"clusters": [{"weights": {"riasec": {"Realistic": 2.0}}}]}"#,
        )
        .expect("mapping should parse");
        let cluster = &mapping.clusters[0];
        assert_eq!(cluster.name, "(Unnamed)");
        assert!(cluster.description.is_empty());
        assert!(cluster.suggestions.is_empty());
        assert_eq!(cluster.weights["riasec"]["Realistic"], 2.0);
    }

    #[test]
    fn mapping_without_clusters_is_empty() {
        let mapping = ClusterMapping::from_json(r#"{"notes": "draft"}"#).expect("should parse");
        assert!(mapping.clusters.is_empty());
        assert_eq!(mapping.notes, "draft");
    }
}
