use lexint_recog::prelude::*;
use lexint_tests::{families::path, random::interval_graph};
use lexint_trees::prelude::*;
use pretty_assertions::assert_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn stabbing_a_model_yields_cliques() {
    let mut rng = StdRng::seed_from_u64(0x57ab);
    for _ in 0..40 {
        let n = rng.random_range(1..30);
        let (g, _) = interval_graph(&mut rng, n, n);
        let model = interval_model(&g).unwrap();
        let tree = model.to_interval_tree();
        tree.audit().unwrap();
        assert_eq!(tree.len(), n);
        for rank in 0..n {
            let hit = tree.stabbing_query(rank).into_iter().map(|(_, v)| *v).collect::<Vec<_>>();
            // the vertex ranked here is always hit
            assert!(hit.iter().any(|v| model.get(v).map(|iv| iv.start()) == Some(rank)));
            for (i, &u) in hit.iter().enumerate() {
                for &w in &hit[i + 1..] {
                    assert!(g.has_edge(u, w));
                }
            }
        }
    }
}

#[test]
fn tree_outlives_removals_of_a_model() {
    let model = interval_model(&path(8)).unwrap();
    let mut tree = model.to_interval_tree();
    for (v, iv) in model.iter() {
        if v % 2 == 0 {
            assert_eq!(tree.remove(iv), Some(*v));
        }
    }
    tree.audit().unwrap();
    assert_eq!(tree.len(), 4);
    assert!(tree.inorder_values().iter().all(|v| *v % 2 == 1));
    assert!(tree.overlap_query(&Interval::new(0, 100).unwrap()).len() == 4);
}

#[test]
fn p_node_empties_after_one_removal_per_child() {
    let mut rng = StdRng::seed_from_u64(3);
    for k in 0..12u32 {
        let mut tree = PQTree::new();
        let p = tree.p_node();
        tree.set_root(p).unwrap();
        for v in 0..k {
            let leaf = tree.leaf([v]);
            tree.add_child(p, leaf).unwrap();
        }
        let mut seen = Vec::new();
        for _ in 0..k {
            for _ in 0..rng.random_range(0..3) {
                tree.advance(p).unwrap();
            }
            let child = tree.remove_current_child(p).unwrap().unwrap();
            assert_eq!(tree.parent(child), None);
            seen.extend(tree.set_b(child).iter().copied());
            tree.audit(p).unwrap();
        }
        assert_eq!(tree.remove_current_child(p), Ok(None));
        assert!(tree.set_b(p).is_empty());
        seen.sort();
        assert_eq!(seen, (0..k).collect::<Vec<_>>());
    }
}

#[test]
fn commits_reach_the_root() {
    let mut tree = PQTree::new();
    let root = tree.q_node();
    tree.set_root(root).unwrap();
    let p = tree.p_node();
    let (a, b, c) = (tree.leaf(['a']), tree.leaf(['b']), tree.leaf(['c']));
    tree.add_child(p, a).unwrap();
    tree.add_child(p, b).unwrap();
    tree.push_section(root, p, End::Right).unwrap();
    tree.push_section(root, c, End::Right).unwrap();
    assert_eq!(tree.frontier(root), vec!['a', 'b', 'c']);

    tree.add_to_set_a(a, ['x', 'y']);
    assert!(tree.is_pending());
    tree.add_set_a_to_set_b(a).unwrap();
    assert!(tree.set_b(root).contains(&'x'));
    assert!(tree.set_b(p).contains(&'y'));
    tree.audit(root).unwrap();

    // an inner commit that only names known vertices leaves the sets as they are
    tree.add_to_set_a(root, ['y', 'c']);
    tree.add_set_a_to_set_b(root).unwrap();
    assert_eq!(tree.set_b(root).len(), 5);

    assert_eq!(tree.remove_current_child(p), Ok(Some(a)));
    assert!(!tree.set_b(root).contains(&'x'));
    assert!(tree.has_at_most_one_son(p));
    assert_eq!(tree.collapse(p), Ok(Some(b)));
    let section = tree.parent(b).unwrap();
    assert_eq!(tree.kind(section), Kind::Section);
    assert_eq!(tree.parent(section), Some(root));
    assert_eq!(tree.frontier(root), vec!['b', 'c']);
    assert_eq!(tree.kind(root), Kind::Q);
    tree.audit(root).unwrap();
}
