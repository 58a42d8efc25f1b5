use lexint_recog::graph::{SimpleGraph, UndirectedGraph};
use lexint_tests::{families::*, recognize_case};
use pretty_assertions::assert_eq;

recognize_case!(empty, SimpleGraph::<usize>::new(), true);
recognize_case!(single_vertex, path(1), true);
recognize_case!(isolated_vertices, SimpleGraph::with_vertices(0..5usize), true);
recognize_case!(isolated_and_an_edge, sparse(6), true);
recognize_case!(path_6, path(6), true);
recognize_case!(path_20, path(20), true);
recognize_case!(triangle, cycle(3), true);
recognize_case!(complete_5, complete(5), true);
recognize_case!(claw, star(3), true);
recognize_case!(star_10, star(10), true);
recognize_case!(two_triangles, triangles(2), true);
recognize_case!(three_triangles, triangles(3), true);

recognize_case!(cycle_4, cycle(4), false);
recognize_case!(cycle_5, cycle(5), false);
recognize_case!(cycle_6, cycle(6), false);
recognize_case!(cycle_12, cycle(12), false);
recognize_case!(biclaw_is_not_interval, biclaw(), false);
recognize_case!(net_is_not_interval, net(), false);
recognize_case!(tent_is_not_interval, tent(), false);

#[test]
fn a_hole_beside_an_interval_component_is_found() {
    let mut g = cycle(4);
    for (u, v) in [(10, 11), (11, 12), (12, 10)] {
        g.add_edge(u, v);
    }
    assert!(!lexint_recog::is_interval_graph(&g));
    assert!(lexint_recog::is_interval_graph(&triangles(4)));
}

#[test]
fn models_rebuild_their_graph() {
    for g in [path(7), complete(4), star(5), triangles(2), sparse(4)] {
        let model = lexint_recog::interval_model(&g).unwrap();
        let rebuilt = model.intersection_graph();
        assert_eq!(rebuilt.vertex_count(), g.vertex_count());
        assert_eq!(rebuilt.edge_count(), g.edge_count());
        model.verify(&g).unwrap();
        // a model of the rebuilt graph describes the same graph again
        lexint_recog::interval_model(&rebuilt).unwrap().verify(&g).unwrap();
    }
}

#[test]
fn recognizer_takes_shared_graphs() {
    use std::{rc::Rc, sync::Arc};
    let g = path(5);
    let by_ref = lexint_recog::IntervalGraphRecognizer::new(&&g).unwrap();
    let by_rc = lexint_recog::IntervalGraphRecognizer::new(&Rc::new(g.clone())).unwrap();
    let by_arc = lexint_recog::IntervalGraphRecognizer::new(&Arc::new(g.clone())).unwrap();
    assert_eq!(by_ref.ordering(), by_rc.ordering());
    assert_eq!(by_rc.ordering(), by_arc.ordering());
    assert_eq!(Rc::new(g.clone()).edge_count(), 4);
}

#[test]
fn configured_limits_and_start() {
    use lexint_recog::{IntervalGraphRecognizer, RecogConf, RecogError};
    let conf = "start = \"last\"\nverify_model = true\nmax_vertices = 6".parse::<RecogConf>().unwrap();
    let recog = IntervalGraphRecognizer::with_conf(&path(6), &conf).unwrap();
    assert_eq!(recog.sweeps()[0].first(), Some(5));
    assert!(recog.is_interval());
    assert_eq!(
        IntervalGraphRecognizer::with_conf(&path(7), &conf).map(|r| r.is_interval()),
        Err(RecogError::TooLarge { what: "vertices", found: 7, limit: 6 })
    );
}
