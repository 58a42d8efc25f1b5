pub mod families {
    //! Small named graphs over `0..n`.

    use lexint_recog::graph::SimpleGraph;

    pub type Graph = SimpleGraph<usize>;

    pub fn path(n: usize) -> Graph {
        let mut g = SimpleGraph::with_vertices(0..n);
        for i in 1..n {
            g.add_edge(i - 1, i);
        }
        g
    }

    pub fn cycle(n: usize) -> Graph {
        let mut g = path(n);
        if n > 2 {
            g.add_edge(n - 1, 0);
        }
        g
    }

    pub fn complete(n: usize) -> Graph {
        let mut g = SimpleGraph::with_vertices(0..n);
        for u in 0..n {
            for v in u + 1..n {
                g.add_edge(u, v);
            }
        }
        g
    }

    /// Centre 0 with leaves `1..=leaves`.
    pub fn star(leaves: usize) -> Graph {
        SimpleGraph::from_edges((1..=leaves).map(|v| (0, v)))
    }

    /// A claw with every leaf extended by a pendant vertex.
    pub fn biclaw() -> Graph {
        SimpleGraph::from_edges([(0, 1), (0, 2), (0, 3), (1, 4), (2, 5), (3, 6)])
    }

    /// A triangle with one pendant vertex per corner.
    pub fn net() -> Graph {
        SimpleGraph::from_edges([(0, 1), (1, 2), (2, 0), (0, 3), (1, 4), (2, 5)])
    }

    /// A triangle with one vertex on each side, adjacent to both ends of that side.
    pub fn tent() -> Graph {
        let mut g = cycle(3);
        for (v, a, b) in [(3, 0, 1), (4, 1, 2), (5, 2, 0)] {
            g.add_edge(v, a);
            g.add_edge(v, b);
        }
        g
    }

    /// `k` disjoint triangles.
    pub fn triangles(k: usize) -> Graph {
        let mut g = SimpleGraph::new();
        for t in 0..k {
            let (a, b, c) = (3 * t, 3 * t + 1, 3 * t + 2);
            g.add_edge(a, b);
            g.add_edge(b, c);
            g.add_edge(c, a);
        }
        g
    }

    /// `n` isolated vertices and one edge between the last two.
    pub fn sparse(n: usize) -> Graph {
        let mut g = SimpleGraph::with_vertices(0..n);
        if n >= 2 {
            g.add_edge(n - 2, n - 1);
        }
        g
    }
}

pub mod random {
    //! Seeded graph generators.

    use crate::families::Graph;
    use lexint_recog::graph::{SimpleGraph, UndirectedGraph};
    use lexint_trees::interval::Interval;
    use rand::{Rng, seq::SliceRandom};

    /// The intersection graph of `n` random intervals with ends in `0..=span`, relabelled
    /// by a random permutation.
    pub fn interval_graph(rng: &mut impl Rng, n: usize, span: usize) -> (Graph, Vec<Interval<usize>>) {
        let mut labels = (0..n).collect::<Vec<_>>();
        labels.shuffle(rng);
        let mut intervals = Vec::with_capacity(n);
        for _ in 0..n {
            let (a, b) = (rng.random_range(0..=span), rng.random_range(0..=span));
            intervals.push(Interval::new(a.min(b), a.max(b)).expect("ordered ends"));
        }
        let mut g = SimpleGraph::with_vertices(labels.iter().copied());
        for u in 0..n {
            for v in u + 1..n {
                if intervals[u].overlaps(&intervals[v]) {
                    g.add_edge(labels[u], labels[v]);
                }
            }
        }
        let mut by_label = vec![Interval::point(0); n];
        for (u, iv) in intervals.into_iter().enumerate() {
            by_label[labels[u]] = iv;
        }
        (g, by_label)
    }

    /// An Erdős–Rényi graph over `0..n`.
    pub fn gnp(rng: &mut impl Rng, n: usize, p: f64) -> Graph {
        let mut g = SimpleGraph::with_vertices(0..n);
        for u in 0..n {
            for v in u + 1..n {
                if rng.random_bool(p) {
                    g.add_edge(u, v);
                }
            }
        }
        g
    }

    /// A random ordering of the vertices of `g`.
    pub fn shuffled(rng: &mut impl Rng, g: &Graph) -> Vec<usize> {
        let mut order = g.vertices().collect::<Vec<_>>();
        order.shuffle(rng);
        order
    }
}

pub mod naive {
    //! Slow reference implementations.

    use crate::families::Graph;
    use lexint_recog::{graph::UndirectedGraph, order::VertexOrdering, umbrella::Umbrella};
    use std::collections::HashMap;

    /// LexBFS with explicit labels. `choose` receives the unvisited vertices sharing the
    /// largest label, in vertex order.
    pub fn lex_bfs_with(
        g: &Graph, start: Option<usize>, mut choose: impl FnMut(&[usize]) -> usize,
    ) -> Vec<usize> {
        let vertices = g.vertices().collect::<Vec<_>>();
        let n = vertices.len();
        let mut labels = vertices.iter().map(|&v| (v, Vec::new())).collect::<HashMap<_, _>>();
        let mut order = Vec::with_capacity(n);
        for step in 0..n {
            let v = match start {
                | Some(s) if step == 0 => s,
                | _ => {
                    let unvisited =
                        vertices.iter().copied().filter(|v| !order.contains(v)).collect::<Vec<_>>();
                    let best = unvisited.iter().map(|v| labels[v].clone()).max().expect("unvisited");
                    let tied = unvisited.into_iter().filter(|v| labels[v] == best).collect::<Vec<_>>();
                    choose(&tied)
                }
            };
            order.push(v);
            for w in g.neighbors(v) {
                if !order.contains(&w) {
                    labels.get_mut(&w).expect("known vertex").push(n - step);
                }
            }
        }
        order
    }

    pub fn lex_bfs(g: &Graph, start: Option<usize>) -> Vec<usize> {
        lex_bfs_with(g, start, |tied| tied[0])
    }

    fn latest(tied: &[usize], by: &VertexOrdering<usize>) -> usize {
        *tied.iter().max_by_key(|v| by.rank(v)).expect("nonempty tie")
    }

    pub fn lex_bfs_plus(g: &Graph, start: Option<usize>, prior: &VertexOrdering<usize>) -> Vec<usize> {
        lex_bfs_with(g, start, |tied| latest(tied, prior))
    }

    pub fn lex_bfs_star(
        g: &Graph, start: Option<usize>, a: &VertexOrdering<usize>, b: &VertexOrdering<usize>,
    ) -> Vec<usize> {
        let later = |v: usize, by: &VertexOrdering<usize>| {
            g.neighbors(v).filter(|w| by.rank(w) > by.rank(&v)).collect::<Vec<_>>()
        };
        lex_bfs_with(g, start, |tied| {
            let (alpha, beta) = (latest(tied, a), latest(tied, b));
            let witnesses = later(beta, b);
            if later(alpha, a).iter().all(|x| witnesses.contains(x)) { alpha } else { beta }
        })
    }

    /// Every triple `i < j < k` with `v_i ~ v_k` and `v_i ≁ v_j`, in rank order.
    pub fn umbrellas(g: &Graph, order: &[usize]) -> Vec<Umbrella<usize>> {
        let mut found = Vec::new();
        for i in 0..order.len() {
            for j in i + 1..order.len() {
                for k in j + 1..order.len() {
                    let (left, middle, right) = (order[i], order[j], order[k]);
                    if g.has_edge(left, right) && !g.has_edge(left, middle) {
                        found.push(Umbrella { left, middle, right });
                    }
                }
            }
        }
        found
    }

    /// Whether some ordering of `g` is umbrella-free, by exhaustive search with pruning.
    /// Only usable for a handful of vertices.
    pub fn has_umbrella_free_ordering(g: &Graph) -> bool {
        fn extend(g: &Graph, rest: &mut Vec<usize>, prefix: &mut Vec<usize>) -> bool {
            if rest.is_empty() {
                return true;
            }
            for idx in 0..rest.len() {
                let w = rest[idx];
                // placing `w` last closes every triple that ends in it
                let clean = prefix.iter().enumerate().all(|(i, &u)| {
                    !g.has_edge(u, w) || prefix[i + 1..].iter().all(|&m| g.has_edge(u, m))
                });
                if !clean {
                    continue;
                }
                rest.swap_remove(idx);
                prefix.push(w);
                if extend(g, rest, prefix) {
                    return true;
                }
                prefix.pop();
                rest.push(w);
                let last = rest.len() - 1;
                rest.swap(idx, last);
            }
            false
        }
        let mut rest = g.vertices().collect::<Vec<_>>();
        extend(g, &mut rest, &mut Vec::new())
    }

    /// The four-point condition of LexBFS orderings: whenever `a < b < c`, `a ~ c` and
    /// `a ≁ b`, some `d < a` has `d ~ b` and `d ≁ c`.
    pub fn is_lex_bfs_ordering(g: &Graph, order: &[usize]) -> bool {
        let n = order.len();
        for ia in 0..n {
            for ib in ia + 1..n {
                for ic in ib + 1..n {
                    let (a, b, c) = (order[ia], order[ib], order[ic]);
                    if g.has_edge(a, c)
                        && !g.has_edge(a, b)
                        && !order[..ia].iter().any(|&d| g.has_edge(d, b) && !g.has_edge(d, c))
                    {
                        return false;
                    }
                }
            }
        }
        true
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One `#[test]` per named graph. A positive verdict must come with a model whose
/// intersection graph is the input, a negative one with an umbrella of the final ordering.
/// Small graphs are also checked by exhaustive search.
#[macro_export]
macro_rules! recognize_case {
    ($name:ident, $graph:expr, $interval:expr) => {
        #[test]
        fn $name() {
            use ::lexint_recog::prelude::*;
            ::lexint_tests::init_logger();
            let graph = $graph;
            let recog = IntervalGraphRecognizer::new(&graph).unwrap();
            assert_eq!(recog.is_interval(), $interval, "{}", stringify!($name));
            if graph.vertex_count() <= 8 {
                assert_eq!(::lexint_tests::naive::has_umbrella_free_ordering(&graph), $interval);
            }
            match recog.model() {
                | Some(model) => model.verify(&graph).unwrap(),
                | None => {
                    let u = recog.umbrella().unwrap();
                    let order = recog.ordering().to_vec();
                    assert!(::lexint_tests::naive::umbrellas(&graph, &order).contains(u));
                }
            }
        }
    };
}
