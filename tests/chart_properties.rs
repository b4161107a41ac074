//! Chart-level properties: partitioning, representative choice, score
//! encoding, default visibility and category exclusion.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use persona_sunburst::host::{ChartOptions, StaticHost};
use persona_sunburst::interaction::ChartEvent;
use persona_sunburst::layout::{Layout, LayoutEngine, LayoutNode};
use persona_sunburst::profile::{
    ProfileRecord, ProfileTree, ScoreNode, TraitRecord, build_tree, most_significant_child,
};
use persona_sunburst::render::sector::{
    bar_length_factor, encode_branch, encode_leaf, right_pad, score_magnitude,
};
use persona_sunburst::render::{RenderOutcome, SvgSurface};
use persona_sunburst::types::{Angle, Radius};
use persona_sunburst::Chart;

const EPSILON: f64 = 1e-9;

fn record(id: &str, percentile: f64, children: Vec<TraitRecord>) -> TraitRecord {
    TraitRecord {
        trait_id: id.to_string(),
        name: id.to_string(),
        category: None,
        percentile,
        children,
    }
}

fn e2e_profile() -> ProfileRecord {
    ProfileRecord {
        personality: Some(vec![record(
            "trait_a",
            0.8,
            vec![record("facet_a1", 0.8, vec![])],
        )]),
        needs: Some(vec![record("n1", 0.4, vec![])]),
        values: Some(vec![record("v1", 0.6, vec![])]),
        behavior: None,
    }
}

fn wide_profile() -> ProfileRecord {
    ProfileRecord {
        personality: Some(vec![
            record(
                "big5_openness",
                0.81,
                vec![record("facet_intellect", 0.93, vec![]), record("facet_imagination", 0.4, vec![])],
            ),
            record("big5_extraversion", 0.12, vec![record("facet_cheerfulness", 0.18, vec![])]),
            record("big5_agreeableness", 0.55, vec![]),
        ]),
        needs: Some(vec![
            record("need_challenge", 0.67, vec![]),
            record("need_harmony", 0.21, vec![]),
            record("need_stability", 0.58, vec![]),
        ]),
        values: Some(vec![record("value_tradition", 0.33, vec![]), record("value_hedonism", 0.79, vec![])]),
        behavior: None,
    }
}

fn lay_out(profile: &ProfileRecord, excluded: &[&str]) -> Layout {
    let tree = build_tree(profile).unwrap();
    let excluded: BTreeSet<String> = excluded.iter().map(|s| s.to_string()).collect();
    LayoutEngine::new(Radius(200.0)).layout(&tree, &excluded)
}

fn keys(layout: &Layout) -> String {
    layout
        .nodes()
        .iter()
        .map(|n| n.key.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

// ==================== partitioning ====================

#[test]
fn children_exactly_partition_their_parent() {
    let layout = lay_out(&wide_profile(), &[]);
    for (index, node) in layout.nodes().iter().enumerate() {
        let children: Vec<&LayoutNode> = layout.children(index).collect();
        if children.is_empty() {
            continue;
        }
        assert!((children[0].x0.raw() - node.x0.raw()).abs() < EPSILON, "{}", node.key);
        assert_eq!(children.last().unwrap().x1, node.x1, "{}", node.key);
        for pair in children.windows(2) {
            assert!((pair[0].x1.raw() - pair[1].x0.raw()).abs() < EPSILON);
        }
        let total: f64 = children.iter().map(|c| c.span().raw()).sum();
        assert!((total - node.span().raw()).abs() < EPSILON, "{}", node.key);
    }
}

#[test]
fn drawn_arcs_stay_inside_the_padded_sector() {
    let layout = lay_out(&wide_profile(), &[]);
    for node in layout.nodes().iter().filter(|n| !n.is_leaf()) {
        let encoding = encode_branch(node, node.score);
        let padded_end = node.x1 - right_pad(node.depth);
        assert!(encoding.arc1.0 == node.x0);
        assert!(encoding.arc1.1 >= node.x0, "{}", node.key);
        assert!(encoding.arc2.1.raw() <= padded_end.raw() + EPSILON, "{}", node.key);
        assert!(encoding.arc2.0 == encoding.arc1.1);
    }
}

// ==================== representative choice ====================

#[test]
fn representative_is_the_last_child_not_the_most_extreme() {
    let children = vec![record("low", 0.2, vec![]), record("high", 0.9, vec![]), record("mid", 0.5, vec![])];
    let chosen = most_significant_child(&children).unwrap();
    assert_eq!(chosen.trait_id, "mid");

    let mut profile = e2e_profile();
    profile.needs = Some(children);
    let tree = build_tree(&profile).unwrap();
    let needs = tree.root.children.iter().find(|c| c.id == "needs").unwrap();
    assert_eq!(needs.children[0].id, "mid");
    assert_eq!(needs.children[0].score, 0.5);
}

// ==================== score encoding ====================

#[test]
fn out_of_range_scores_are_clamped() {
    assert_eq!(score_magnitude(1.3), 1.0);

    let mut profile = e2e_profile();
    profile.values = Some(vec![record("v_over", 1.3, vec![])]);
    let layout = lay_out(&profile, &[]);

    let rep = layout.find("root/values/v_over").unwrap();
    let encoding = encode_branch(rep, rep.score);
    assert!(encoding.arc1.1 <= rep.x1);
    assert!(encoding.arc1.1 - encoding.arc1.0 <= rep.span());

    let leaf = layout.index_of("root/values/v_over/v_over").unwrap();
    let bar = encode_leaf(&layout, leaf, 1.3).unwrap();
    let node = layout.get(leaf).unwrap();
    assert!(((bar.outer - bar.inner).raw() - node.band().raw()).abs() < EPSILON);
}

#[test]
fn neutral_share_sets_potential_and_drops_pad() {
    let node = LayoutNode {
        key: "root/sbh/sentiment_self".into(),
        id: "sentiment_self".into(),
        name: "Self".into(),
        category: Some("sentiment".into()),
        score: 0.3,
        perc_neu: Some(0.3),
        depth: 1,
        x0: Angle(0.25),
        x1: Angle(1.25),
        y0: Radius(40.0),
        y1: Radius(80.0),
        weight: 2,
        parent: Some(0),
        children: vec![2, 3],
        color_key: "sbh".into(),
        expanded: true,
        visible: false,
    };
    // (0.3 + 0.3) * 1.0 < 1.0 - 0.04·2π/3
    let encoding = encode_branch(&node, 0.3);
    assert!((encoding.potential - 0.6).abs() < EPSILON);
    assert_eq!(encoding.pad, Angle::ZERO);
    assert!((encoding.arc2.1.raw() - (0.25 + 0.6)).abs() < EPSILON);
    assert!((encoding.arc1.1.raw() - (0.25 + 0.3)).abs() < EPSILON);
}

#[test]
fn facet_bars_are_full_scale() {
    let layout = lay_out(&e2e_profile(), &[]);
    let facet = layout.index_of("root/personality/trait_a/trait_a/facet_a1").unwrap();
    assert_eq!(layout.get(facet).unwrap().depth, 4);
    assert_eq!(bar_length_factor(&layout, facet), 1.0);
}

#[test]
fn other_deep_leaves_are_stretched() {
    fn node(id: &str, score: f64, children: Vec<ScoreNode>) -> ScoreNode {
        ScoreNode {
            id: id.into(),
            name: id.into(),
            category: None,
            score,
            perc_neu: None,
            children,
        }
    }
    let tree = ProfileTree {
        root: node(
            "root",
            0.0,
            vec![node(
                "sbh",
                0.0,
                vec![node("weekday", 0.4, vec![node("mornings", 0.4, vec![node("b_0800", 0.5, vec![])])])],
            )],
        ),
    };
    let layout = LayoutEngine::new(Radius(200.0)).layout(&tree, &BTreeSet::new());
    let leaf = layout.index_of("root/sbh/weekday/mornings/b_0800").unwrap();
    assert_eq!(layout.get(leaf).unwrap().depth, 4);
    assert_eq!(bar_length_factor(&layout, leaf), 5.0);
}

// ==================== visibility ====================

#[test]
fn only_depth_two_is_visible_after_layout() {
    let layout = lay_out(&wide_profile(), &[]);
    for node in layout.nodes() {
        assert_eq!(node.visible, node.depth == 2, "{}", node.key);
    }
}

// ==================== exclusion ====================

#[test]
fn excluded_category_disappears_and_others_grow() {
    let layout = lay_out(&wide_profile(), &["needs"]);
    assert!(layout.nodes().iter().all(|n| !n.key.starts_with("root/needs")));
    insta::assert_snapshot!(
        keys(&layout)
            .lines()
            .filter(|k| k.matches('/').count() <= 1)
            .collect::<Vec<_>>()
            .join("\n"),
        @r"
    root
    root/personality
    root/values
    "
    );

    // personality has 4 leaves, values 2
    let spans: Vec<f64> = layout
        .nodes()
        .iter()
        .filter(|n| n.depth == 1)
        .map(|n| n.span().raw())
        .collect();
    assert!((spans[0] - TAU * 4.0 / 6.0).abs() < EPSILON);
    assert!((spans[1] - TAU * 2.0 / 6.0).abs() < EPSILON);
}

// ==================== end to end ====================

#[test]
fn end_to_end_three_branch_profile() {
    let layout = lay_out(&e2e_profile(), &[]);
    insta::assert_snapshot!(keys(&layout), @r"
    root
    root/personality
    root/personality/trait_a
    root/personality/trait_a/trait_a
    root/personality/trait_a/trait_a/facet_a1
    root/values
    root/values/v1
    root/values/v1/v1
    root/needs
    root/needs/n1
    root/needs/n1/n1
    ");

    let branches: Vec<&LayoutNode> = layout.nodes().iter().filter(|n| n.depth == 1).collect();
    assert_eq!(branches.len(), 3);
    for branch in &branches {
        assert!((branch.span().raw() - TAU / 3.0).abs() < EPSILON, "{}", branch.key);
    }

    for node in layout.nodes() {
        match node.depth {
            2 => assert!(node.visible, "{}", node.key),
            d if d >= 3 => assert!(!node.visible, "{}", node.key),
            _ => {}
        }
    }

    let representative = layout.find("root/personality/trait_a").unwrap();
    assert_eq!(representative.score, 0.8);
}

#[test]
fn end_to_end_render_and_expand() {
    let mut chart = Chart::new(StaticHost::new(ChartOptions::default().with_id("e2e")));
    chart.set_profile(&e2e_profile()).unwrap();
    let mut surface = SvgSurface::new();

    let outcome = chart.render(&mut surface).unwrap();
    assert_eq!(outcome, RenderOutcome::Rendered { sectors: 11, visible: 3 });

    chart
        .dispatch(ChartEvent::Click("root/personality/trait_a".into()), &mut surface)
        .unwrap();
    assert_eq!(surface.is_visible("root/personality/trait_a/trait_a"), Some(true));
    assert_eq!(surface.is_visible("root/personality/trait_a/trait_a/facet_a1"), Some(false));

    chart
        .dispatch(ChartEvent::Click("root/personality/trait_a".into()), &mut surface)
        .unwrap();
    assert_eq!(surface.is_visible("root/personality/trait_a/trait_a"), Some(false));

    let svg = surface.to_svg_string().unwrap();
    assert!(svg.contains("e2e_root-personality-trait_a.arc_for_label"));
}
