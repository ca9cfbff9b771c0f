use proptest::prelude::*;
use triage_domain::{
    Answer, NodeDescription, StructuralIssue, Target, TreeDescription, normalize_answer,
};

const LEAVES: [(&str, &str); 4] = [
    ("l_pos", "POSITIVE"),
    ("l_neg", "NEGATIVE"),
    ("l_neu", "NEUTRAL"),
    ("l_irr", "IRRELEVANT"),
];

/// Random acyclic description: node `i` may only point at nodes `j > i`
/// or at a leaf, so every generated tree is a DAG rooted at `q00`.
fn acyclic_tree() -> impl Strategy<Value = TreeDescription> {
    prop::collection::vec((any::<usize>(), any::<usize>()), 1..16).prop_map(|choices| {
        let n = choices.len();
        let target = |i: usize, choice: usize| {
            let options = (n - i - 1) + LEAVES.len();
            let pick = choice % options;
            if pick < n - i - 1 {
                format!("q{:02}", i + 1 + pick)
            } else {
                LEAVES[pick - (n - i - 1)].0.to_string()
            }
        };

        let mut desc = TreeDescription::new("q00");
        for (i, (yes, no)) in choices.into_iter().enumerate() {
            desc = desc.with_node(
                format!("q{:02}", i),
                NodeDescription::new("", "Question?\n{article}", target(i, yes), target(i, no)),
            );
        }
        for (name, label) in LEAVES {
            desc = desc.with_leaf(name, label);
        }
        desc
    })
}

proptest! {
    #[test]
    fn acyclic_descriptions_build(desc in acyclic_tree()) {
        prop_assert!(desc.validate().is_empty());
        prop_assert!(desc.build().is_ok());
    }

    #[test]
    fn depth_is_bounded_by_node_count(desc in acyclic_tree()) {
        let tree = desc.build().unwrap();
        prop_assert!(tree.depth() >= 1);
        prop_assert!(tree.depth() <= tree.node_count());
    }

    #[test]
    fn any_answer_sequence_reaches_a_leaf_within_depth(
        desc in acyclic_tree(),
        answers in prop::collection::vec(any::<bool>(), 16),
    ) {
        let tree = desc.build().unwrap();
        let mut target = Target::Node(tree.root());
        let mut steps = 0;
        for yes in answers {
            let Target::Node(id) = target else { break };
            let node = tree.node(id);
            target = if yes { node.on_yes() } else { node.on_no() };
            steps += 1;
        }
        prop_assert!(matches!(target, Target::Leaf(_)));
        prop_assert!(steps <= tree.depth());
    }

    #[test]
    fn self_reference_is_always_rejected(desc in acyclic_tree(), pick in any::<usize>()) {
        let names: Vec<String> = desc.nodes.keys().cloned().collect();
        let name = names[pick % names.len()].clone();
        let mut node = desc.nodes[&name].clone();
        node.if_yes = name.clone();
        let desc = desc.with_node(name, node);

        let err = desc.build().unwrap_err();
        let has_cycle = err
            .issues()
            .iter()
            .any(|i| matches!(i, StructuralIssue::CycleDetected { .. }));
        prop_assert!(has_cycle, "expected a cycle issue, got {:?}", err.issues());
    }

    #[test]
    fn description_roundtrip(desc in acyclic_tree()) {
        let tree = desc.build().unwrap();
        prop_assert_eq!(tree.to_description(), desc);
    }

    #[test]
    fn yes_no_survive_case_and_punctuation(
        upper in any::<bool>(),
        yes in any::<bool>(),
        suffix in "[.!,:;]{0,3}( [a-z ]{0,20})?",
    ) {
        let word = match (yes, upper) {
            (true, true) => "YES",
            (true, false) => "yes",
            (false, true) => "NO",
            (false, false) => "no",
        };
        let expected = if yes { Answer::Yes } else { Answer::No };
        prop_assert_eq!(normalize_answer(&format!("{word}{suffix}")), expected);
    }

    #[test]
    fn words_outside_vocabulary_are_unparseable(word in "[a-z]{4,12}") {
        prop_assume!(word != "true" && word != "false");
        prop_assert_eq!(normalize_answer(&word), Answer::Unparseable);
    }

    #[test]
    fn normalization_never_panics(raw in ".{0,200}") {
        let _ = normalize_answer(&raw);
    }
}
