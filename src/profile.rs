//! Profile records and the score tree builder.
//!
//! A profile arrives as flat per-trait score lists. [`build_tree`] turns it
//! into the hierarchy the radial layout consumes:
//!
//! ```text
//! root
//! ├── personality ("Big 5")
//! │   └── <representative trait>
//! │       ├── trait ── facet leaves
//! │       └── ...
//! ├── values ("Values")
//! │   └── <representative value> ── value leaves
//! ├── needs ("Needs")
//! │   └── <representative need> ── need leaves
//! └── sbh ("Social Behavior", only when behaviors are present)
//!     └── <representative behavior> ── behavior leaves
//! ```
//!
//! Each representative node copies the id, name, category and score of the
//! child picked by [`most_significant_child`].

use serde::Deserialize;

use crate::errors::{ParseError, SourceContext, ValidationError};

/// Score at which a trait is considered neutral
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Id of the synthetic root node
pub const ROOT_ID: &str = "root";

/// The four record families, in the order their branches appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Personality,
    Values,
    Needs,
    Behavior,
}

impl Category {
    /// Node id of the category branch (also the exclusion key)
    pub fn id(self) -> &'static str {
        match self {
            Category::Personality => "personality",
            Category::Values => "values",
            Category::Needs => "needs",
            Category::Behavior => "sbh",
        }
    }

    /// Display name of the category branch
    pub fn label(self) -> &'static str {
        match self {
            Category::Personality => "Big 5",
            Category::Values => "Values",
            Category::Needs => "Needs",
            Category::Behavior => "Social Behavior",
        }
    }

    pub fn from_id(id: &str) -> Option<Category> {
        match id {
            "personality" => Some(Category::Personality),
            "values" => Some(Category::Values),
            "needs" => Some(Category::Needs),
            "sbh" => Some(Category::Behavior),
            _ => None,
        }
    }
}

// ============================================================================
// Input records
// ============================================================================

/// Anything carrying a leaf metric in `[0, 1]`
pub trait Scored {
    fn id(&self) -> &str;
    fn metric(&self) -> f64;
}

/// A personality trait, need or value as reported by the profiling service
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TraitRecord {
    pub trait_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub percentile: f64,
    /// Facets; only read for personality traits
    #[serde(default)]
    pub children: Vec<TraitRecord>,
}

impl Scored for TraitRecord {
    fn id(&self) -> &str {
        &self.trait_id
    }

    fn metric(&self) -> f64 {
        self.percentile
    }
}

/// A social behavior; reported as `percentage` rather than `percentile`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BehaviorRecord {
    pub trait_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub percentage: f64,
    /// Neutral share for three-way sentiment scores
    #[serde(default)]
    pub perc_neu: Option<f64>,
}

impl Scored for BehaviorRecord {
    fn id(&self) -> &str {
        &self.trait_id
    }

    fn metric(&self) -> f64 {
        self.percentage
    }
}

/// A scored profile as delivered by the profiling service
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProfileRecord {
    #[serde(default)]
    pub personality: Option<Vec<TraitRecord>>,
    #[serde(default)]
    pub needs: Option<Vec<TraitRecord>>,
    #[serde(default)]
    pub values: Option<Vec<TraitRecord>>,
    #[serde(default)]
    pub behavior: Option<Vec<BehaviorRecord>>,
}

impl ProfileRecord {
    /// Parse a profile from JSON; unknown fields are ignored.
    pub fn from_json(source: &str) -> Result<Self, ParseError> {
        Self::from_json_named("<profile>", source)
    }

    /// Like [`ProfileRecord::from_json`], naming the source in diagnostics.
    pub fn from_json_named(name: &str, source: &str) -> Result<Self, ParseError> {
        serde_json::from_str(source).map_err(|e| {
            let ctx = SourceContext::new(name, source);
            ParseError::json(&ctx, &e)
        })
    }

    /// Check required branches and scores without building anything.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("personality", &self.personality),
            ("needs", &self.needs),
            ("values", &self.values),
        ];
        for (branch, records) in required {
            let records = records
                .as_ref()
                .ok_or(ValidationError::MissingBranch { branch })?;
            if records.is_empty() {
                return Err(ValidationError::EmptyBranch { branch });
            }
            for record in records {
                check_score(record)?;
                // Only personality traits keep their children in the tree
                if branch == Category::Personality.id() {
                    for facet in &record.children {
                        check_score(facet)?;
                    }
                }
            }
        }
        for record in self.behavior.iter().flatten() {
            check_score(record)?;
        }
        Ok(())
    }
}

fn check_score(record: &impl Scored) -> Result<(), ValidationError> {
    let value = record.metric();
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidScore {
            id: record.id().to_string(),
            value,
        })
    }
}

// ============================================================================
// Score tree
// ============================================================================

/// One node of the score tree
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreNode {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub score: f64,
    /// Neutral share of a sentiment score, when the source provides one
    pub perc_neu: Option<f64>,
    pub children: Vec<ScoreNode>,
}

impl ScoreNode {
    fn branch(id: &str, name: &str, children: Vec<ScoreNode>) -> Self {
        ScoreNode {
            id: id.to_string(),
            name: name.to_string(),
            category: None,
            score: 0.0,
            perc_neu: None,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaves below (or at) this node
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(ScoreNode::leaf_count).sum()
        }
    }
}

impl From<&TraitRecord> for ScoreNode {
    fn from(record: &TraitRecord) -> Self {
        ScoreNode {
            id: record.trait_id.clone(),
            name: record.name.clone(),
            category: record.category.clone(),
            score: record.percentile,
            perc_neu: None,
            children: Vec::new(),
        }
    }
}

impl From<&BehaviorRecord> for ScoreNode {
    fn from(record: &BehaviorRecord) -> Self {
        ScoreNode {
            id: record.trait_id.clone(),
            name: record.name.clone(),
            category: record.category.clone(),
            score: record.percentage,
            perc_neu: record.perc_neu,
            children: Vec::new(),
        }
    }
}

/// The category tree rooted at a synthetic node
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTree {
    pub root: ScoreNode,
}

impl ProfileTree {
    /// Category branch by id, if present
    pub fn branch(&self, category: Category) -> Option<&ScoreNode> {
        self.root.children.iter().find(|c| c.id == category.id())
    }

    pub fn categories(&self) -> impl Iterator<Item = &ScoreNode> {
        self.root.children.iter()
    }
}

/// Pick the child that represents its siblings.
///
/// Every child whose distance from [`NEUTRAL_SCORE`] reaches the threshold
/// replaces the current pick, and the threshold stays at zero, so the last
/// child with a comparable score always wins. Children with a NaN metric
/// never qualify.
pub fn most_significant_child<T: Scored>(children: &[T]) -> Option<&T> {
    let farthest_distance = 0.0;
    let mut chosen = None;
    for child in children {
        if (child.metric() - NEUTRAL_SCORE).abs() >= farthest_distance {
            chosen = Some(child);
        }
    }
    chosen
}

/// Representative node wrapping the full child list
fn representative<T: Scored>(records: &[T], children: Vec<ScoreNode>) -> Option<ScoreNode>
where
    for<'a> ScoreNode: From<&'a T>,
{
    let chosen = most_significant_child(records)?;
    let mut node = ScoreNode::from(chosen);
    node.children = children;
    Some(node)
}

fn traits_tree(traits: &[TraitRecord]) -> Option<ScoreNode> {
    let children = traits
        .iter()
        .map(|t| {
            let mut node = ScoreNode::from(t);
            node.children = t.children.iter().map(ScoreNode::from).collect();
            node
        })
        .collect();
    representative(traits, children)
}

fn flat_tree(records: &[TraitRecord]) -> Option<ScoreNode> {
    representative(records, records.iter().map(ScoreNode::from).collect())
}

fn behaviors_tree(behaviors: &[BehaviorRecord]) -> Option<ScoreNode> {
    representative(behaviors, behaviors.iter().map(ScoreNode::from).collect())
}

/// Build the category tree from a profile.
///
/// Fails with a [`ValidationError`] before building anything when a required
/// branch is missing or empty, or a score is not finite.
pub fn build_tree(profile: &ProfileRecord) -> Result<ProfileTree, ValidationError> {
    profile.validate()?;

    let mut categories = Vec::with_capacity(4);
    let sections = [
        (Category::Personality, profile.personality.as_deref().and_then(traits_tree)),
        (Category::Values, profile.values.as_deref().and_then(flat_tree)),
        (Category::Needs, profile.needs.as_deref().and_then(flat_tree)),
        (Category::Behavior, profile.behavior.as_deref().and_then(behaviors_tree)),
    ];
    for (category, representative) in sections {
        // An absent or empty behavior list yields no representative
        if let Some(rep) = representative {
            categories.push(ScoreNode::branch(category.id(), category.label(), vec![rep]));
        }
    }

    crate::log::debug!(branches = categories.len(), "built profile tree");
    Ok(ProfileTree {
        root: ScoreNode::branch(ROOT_ID, "", categories),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, percentile: f64) -> TraitRecord {
        TraitRecord {
            trait_id: id.to_string(),
            name: id.to_uppercase(),
            category: Some("personality".to_string()),
            percentile,
            children: Vec::new(),
        }
    }

    fn behavior(id: &str, percentage: f64) -> BehaviorRecord {
        BehaviorRecord {
            trait_id: id.to_string(),
            name: id.to_string(),
            category: Some("behavior".to_string()),
            percentage,
            perc_neu: None,
        }
    }

    fn minimal_profile() -> ProfileRecord {
        let mut trait_a = record("a", 0.8);
        trait_a.children = vec![record("a1", 0.8)];
        ProfileRecord {
            personality: Some(vec![trait_a]),
            needs: Some(vec![record("n1", 0.4)]),
            values: Some(vec![record("v1", 0.6)]),
            behavior: None,
        }
    }

    // ==================== most significant child ====================

    #[test]
    fn most_significant_child_returns_last_child() {
        // Known quirk: the farthest-from-neutral child (0.9) is not chosen.
        let children = [record("low", 0.2), record("high", 0.9), record("mid", 0.5)];
        let chosen = most_significant_child(&children).unwrap();
        assert_eq!(chosen.trait_id, "mid");
        assert_eq!(chosen.percentile, 0.5);
    }

    #[test]
    fn most_significant_child_uses_percentage_for_behaviors() {
        let children = [behavior("b1", 0.1), behavior("b2", 0.55)];
        assert_eq!(most_significant_child(&children).unwrap().trait_id, "b2");
    }

    #[test]
    fn most_significant_child_skips_nan() {
        let children = [record("ok", 0.3), record("nan", f64::NAN)];
        assert_eq!(most_significant_child(&children).unwrap().trait_id, "ok");
    }

    #[test]
    fn most_significant_child_of_empty_is_none() {
        let children: [TraitRecord; 0] = [];
        assert!(most_significant_child(&children).is_none());
    }

    // ==================== build_tree ====================

    #[test]
    fn build_tree_creates_three_branches_without_behavior() {
        let tree = build_tree(&minimal_profile()).unwrap();
        let ids: Vec<_> = tree.categories().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["personality", "values", "needs"]);
        assert_eq!(tree.root.id, ROOT_ID);
    }

    #[test]
    fn build_tree_adds_behavior_branch_when_present() {
        let mut profile = minimal_profile();
        profile.behavior = Some(vec![behavior("sun", 0.3), behavior("mon", 0.2)]);
        let tree = build_tree(&profile).unwrap();
        let sbh = tree.branch(Category::Behavior).unwrap();
        assert_eq!(sbh.name, "Social Behavior");
        let rep = &sbh.children[0];
        assert_eq!(rep.id, "mon");
        assert_eq!(rep.score, 0.2);
        assert_eq!(rep.children.len(), 2);
        assert!(rep.children.iter().all(ScoreNode::is_leaf));
    }

    #[test]
    fn build_tree_omits_empty_behavior_branch() {
        let mut profile = minimal_profile();
        profile.behavior = Some(Vec::new());
        let tree = build_tree(&profile).unwrap();
        assert!(tree.branch(Category::Behavior).is_none());
        assert_eq!(tree.root.children.len(), 3);
    }

    #[test]
    fn personality_keeps_facet_tier() {
        let tree = build_tree(&minimal_profile()).unwrap();
        let big5 = tree.branch(Category::Personality).unwrap();
        let rep = &big5.children[0];
        assert_eq!(rep.id, "a");
        assert_eq!(rep.children[0].id, "a");
        assert_eq!(rep.children[0].children[0].id, "a1");
        assert_eq!(big5.leaf_count(), 1);
    }

    #[test]
    fn needs_drop_nested_children() {
        let mut profile = minimal_profile();
        let mut need = record("n2", 0.7);
        need.children = vec![record("ignored", 0.1)];
        profile.needs = Some(vec![record("n1", 0.4), need]);
        let tree = build_tree(&profile).unwrap();
        let rep = &tree.branch(Category::Needs).unwrap().children[0];
        assert!(rep.children.iter().all(ScoreNode::is_leaf));
    }

    #[test]
    fn representative_score_equals_a_child_score() {
        let mut profile = minimal_profile();
        profile.values = Some(vec![record("v1", 0.1), record("v2", 0.95), record("v3", 0.45)]);
        let tree = build_tree(&profile).unwrap();
        let rep = &tree.branch(Category::Values).unwrap().children[0];
        assert!(rep.children.iter().any(|c| c.score == rep.score));
        assert_eq!(rep.score, 0.45);
    }

    #[test]
    fn sentiment_share_is_carried_on_behavior_leaves() {
        let mut profile = minimal_profile();
        let mut b = behavior("b1", 0.3);
        b.perc_neu = Some(0.3);
        profile.behavior = Some(vec![b]);
        let tree = build_tree(&profile).unwrap();
        let leaf = &tree.branch(Category::Behavior).unwrap().children[0].children[0];
        assert_eq!(leaf.perc_neu, Some(0.3));
    }

    // ==================== validation ====================

    #[test]
    fn missing_required_branch_fails() {
        let mut profile = minimal_profile();
        profile.needs = None;
        assert_eq!(
            build_tree(&profile),
            Err(ValidationError::MissingBranch { branch: "needs" })
        );
    }

    #[test]
    fn empty_required_branch_fails() {
        let mut profile = minimal_profile();
        profile.personality = Some(Vec::new());
        assert_eq!(
            build_tree(&profile),
            Err(ValidationError::EmptyBranch { branch: "personality" })
        );
    }

    #[test]
    fn non_finite_facet_score_fails() {
        let mut profile = minimal_profile();
        if let Some(traits) = profile.personality.as_mut() {
            traits[0].children[0].percentile = f64::INFINITY;
        }
        assert!(matches!(
            build_tree(&profile),
            Err(ValidationError::InvalidScore { ref id, .. }) if id == "a1"
        ));
    }

    #[test]
    fn children_of_flat_branches_are_not_validated() {
        let mut profile = minimal_profile();
        if let Some(needs) = profile.needs.as_mut() {
            needs[0].children = vec![record("n1_detail", f64::NAN)];
        }
        let tree = build_tree(&profile).unwrap();
        let needs = tree.branch(Category::Needs).unwrap();
        assert!(needs.children[0].children.iter().all(ScoreNode::is_leaf));
    }

    // ==================== JSON ====================

    #[test]
    fn from_json_reads_service_shape() {
        let json = r#"{
            "word_count": 3200,
            "personality": [{"trait_id": "big5_openness", "name": "Openness",
                "category": "personality", "percentile": 0.81,
                "children": [{"trait_id": "facet_adventurousness", "name": "Adventurousness",
                    "category": "personality", "percentile": 0.62}]}],
            "needs": [{"trait_id": "need_challenge", "name": "Challenge", "category": "needs", "percentile": 0.4}],
            "values": [{"trait_id": "value_hedonism", "name": "Hedonism", "category": "values", "percentile": 0.6}],
            "behavior": [{"trait_id": "behavior_sunday", "name": "Sunday", "category": "behavior", "percentage": 0.2}]
        }"#;
        let profile = ProfileRecord::from_json(json).unwrap();
        assert_eq!(profile.personality.as_ref().unwrap()[0].children.len(), 1);
        assert_eq!(profile.behavior.as_ref().unwrap()[0].metric(), 0.2);
    }

    #[test]
    fn from_json_reports_span() {
        let err = ProfileRecord::from_json("{\n  \"needs\": [}\n").unwrap_err();
        match err {
            ParseError::InvalidJson { span, .. } => assert!(span.offset() > 0),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
