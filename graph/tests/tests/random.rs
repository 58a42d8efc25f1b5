use lexint_recog::prelude::*;
use lexint_tests::{
    init_logger, naive,
    random::{gnp, interval_graph, shuffled},
};
use pretty_assertions::assert_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn random_interval_graphs_are_recognized() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0x1e7b);
    for round in 0..200 {
        let n = rng.random_range(1..40);
        let span = [n / 2 + 1, n, 2 * n, 4 * n][round % 4];
        let (g, intervals) = interval_graph(&mut rng, n, span);
        let recog = IntervalGraphRecognizer::new(&g).unwrap();
        assert!(recog.is_interval(), "round {}: {:?}", round, intervals);
        let model = recog.model().unwrap();
        model.verify(&g).unwrap();
        assert_eq!(model.intersection_graph().edge_count(), g.edge_count());
        assert!(umbrella_free(&g, recog.ordering()).unwrap());
    }
}

#[test]
fn small_graphs_agree_with_exhaustive_search() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0xbad5eed);
    let mut positives = 0;
    for round in 0..400 {
        let n = rng.random_range(0..=7);
        let p = [0.2, 0.4, 0.6, 0.8][round % 4];
        let g = gnp(&mut rng, n, p);
        let expected = naive::has_umbrella_free_ordering(&g);
        assert_eq!(is_interval_graph(&g), expected, "round {}: {:?}", round, g);
        positives += expected as usize;
    }
    log::info!("{} of 400 random graphs were interval graphs", positives);
    assert!(positives > 0 && positives < 400);
}

#[test]
fn engine_sweeps_match_labelled_lex_bfs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..300 {
        let n = rng.random_range(1..=12);
        let p = rng.random_range(0.1..0.9);
        let g = gnp(&mut rng, n, p);
        let start = rng.random_bool(0.5).then(|| rng.random_range(0..n));

        let s0 = lex_bfs(&g, start).unwrap();
        assert_eq!(s0.to_vec(), naive::lex_bfs(&g, start));
        assert!(naive::is_lex_bfs_ordering(&g, &s0.to_vec()));

        let prior = VertexOrdering::from_sequence(shuffled(&mut rng, &g)).unwrap();
        let s1 = lex_bfs_plus(&g, start, &prior).unwrap();
        assert_eq!(s1.to_vec(), naive::lex_bfs_plus(&g, start, &prior));
        assert!(naive::is_lex_bfs_ordering(&g, &s1.to_vec()));
        if start.is_none() {
            assert_eq!(s1.first(), prior.last());
        }

        let other = VertexOrdering::from_sequence(shuffled(&mut rng, &g)).unwrap();
        let s2 = lex_bfs_star(&g, start, &prior, &other).unwrap();
        assert_eq!(s2.to_vec(), naive::lex_bfs_star(&g, start, &prior, &other));
        assert!(naive::is_lex_bfs_ordering(&g, &s2.to_vec()));
    }
}

#[test]
fn recognizer_chains_its_sweeps() {
    let mut rng = StdRng::seed_from_u64(0xc4a1);
    for _ in 0..50 {
        let n = rng.random_range(1..=15);
        let g = gnp(&mut rng, n, 0.4);
        let recog = IntervalGraphRecognizer::new(&g).unwrap();
        let s = recog.sweeps();
        assert_eq!(s[0], lex_bfs(&g, None).unwrap());
        for i in 1..5 {
            assert_eq!(s[i], lex_bfs_plus(&g, None, &s[i - 1]).unwrap());
        }
        assert_eq!(s[5], lex_bfs_star(&g, s[3].last(), &s[3], &s[4]).unwrap());
        assert_eq!(recog.ordering(), &s[5]);
    }
}

#[test]
fn umbrella_check_agrees_with_triples() {
    let mut rng = StdRng::seed_from_u64(0x0b5e);
    for _ in 0..300 {
        let n = rng.random_range(0..=10);
        let p = rng.random_range(0.1..0.9);
        let g = gnp(&mut rng, n, p);
        let order = shuffled(&mut rng, &g);
        let ordering = VertexOrdering::from_sequence(order.iter().copied()).unwrap();
        let triples = naive::umbrellas(&g, &order);
        assert_eq!(umbrella_free(&g, &ordering).unwrap(), triples.is_empty());
        match find_umbrella(&g, &ordering).unwrap() {
            | Some(u) => assert!(triples.contains(&u)),
            | None => assert!(triples.is_empty()),
        }
    }
}
