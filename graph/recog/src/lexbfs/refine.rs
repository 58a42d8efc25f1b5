//! Partition refinement over dense vertex indices.
//!
//! The unvisited vertices are kept in an ordered list of cells; every cell is a class of
//! vertices with equal LexBFS label, and the first cell holds the largest label. Each cell
//! carries one member list per view. A view is a priority order over the vertices, and
//! every member list stays sorted by descending priority, so the head of a list is the
//! vertex that view prefers.

use indexmap::IndexSet;
use lexint_utils::arena::ArenaDense;

lexint_utils::new_key_type! {
    struct CellId;
}

#[derive(Clone, Copy, Debug, Default)]
struct Ends {
    head: Option<usize>,
    tail: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Link {
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug)]
struct Cell {
    prev: Option<CellId>,
    next: Option<CellId>,
    /// member list per view
    ends: Vec<Ends>,
    len: usize,
    /// the cell split off in front of this one, stamped with the step that did it
    split: Option<(usize, CellId)>,
    /// the cell this one was split from
    origin: Option<CellId>,
}

impl Cell {
    fn new(views: usize) -> Self {
        Cell {
            prev: None,
            next: None,
            ends: vec![Ends::default(); views],
            len: 0,
            split: None,
            origin: None,
        }
    }
}

#[derive(Clone, Debug)]
struct View {
    /// neighbours sorted by descending priority of this view
    adj: Vec<Vec<usize>>,
    links: Vec<Link>,
}

#[derive(Clone, Debug)]
pub(crate) struct Partition {
    cells: ArenaDense<CellId, Cell>,
    first: Option<CellId>,
    views: Vec<View>,
    cell_of: Vec<CellId>,
    visited: Vec<bool>,
    step: usize,
}

impl Partition {
    /// `priorities[k][v]` is the priority of `v` in view `k`, larger preferred; each must
    /// be a permutation of `0..n`.
    pub(crate) fn new(adj: &[Vec<usize>], priorities: &[&[usize]]) -> Self {
        let n = adj.len();
        let mut cells = ArenaDense::default();
        let whole = cells.alloc(Cell::new(priorities.len()));
        let mut views = Vec::with_capacity(priorities.len());
        let mut descending = Vec::with_capacity(priorities.len());
        for prio in priorities {
            debug_assert_eq!(prio.len(), n);
            let mut desc = vec![0; n];
            for (v, &p) in prio.iter().enumerate() {
                desc[n - 1 - p] = v;
            }
            // bucket sort: scanning in descending priority keeps every list sorted
            let mut sorted = vec![Vec::new(); n];
            for &x in &desc {
                for &u in &adj[x] {
                    sorted[u].push(x);
                }
            }
            views.push(View { adj: sorted, links: vec![Link::default(); n] });
            descending.push(desc);
        }
        let mut partition = Partition {
            cells,
            first: (n > 0).then_some(whole),
            views,
            cell_of: vec![whole; n],
            visited: vec![false; n],
            step: 0,
        };
        for (k, desc) in descending.into_iter().enumerate() {
            for v in desc {
                partition.push_back(k, whole, v);
            }
        }
        partition.cells[&whole].len = n;
        partition
    }

    /// The preferred vertex of view `k` within the first cell.
    pub(crate) fn head(&self, k: usize) -> Option<usize> {
        self.first.and_then(|c| self.cells[&c].ends[k].head)
    }

    fn push_back(&mut self, k: usize, c: CellId, v: usize) {
        let tail = self.cells[&c].ends[k].tail;
        self.views[k].links[v] = Link { prev: tail, next: None };
        match tail {
            | Some(t) => self.views[k].links[t].next = Some(v),
            | None => self.cells[&c].ends[k].head = Some(v),
        }
        self.cells[&c].ends[k].tail = Some(v);
    }

    fn unlink(&mut self, k: usize, c: CellId, v: usize) {
        let Link { prev, next } = std::mem::take(&mut self.views[k].links[v]);
        match prev {
            | Some(p) => self.views[k].links[p].next = next,
            | None => self.cells[&c].ends[k].head = next,
        }
        match next {
            | Some(x) => self.views[k].links[x].prev = prev,
            | None => self.cells[&c].ends[k].tail = prev,
        }
    }

    fn drop_cell(&mut self, c: CellId) {
        let (prev, next) = (self.cells[&c].prev, self.cells[&c].next);
        match prev {
            | Some(p) => self.cells[&p].next = next,
            | None => self.first = next,
        }
        if let Some(x) = next {
            self.cells[&x].prev = prev;
        }
    }

    /// Open a new, empty cell right in front of `c` for the current step.
    fn split_before(&mut self, c: CellId) -> CellId {
        let prev = self.cells[&c].prev;
        let mut cell = Cell::new(self.views.len());
        cell.prev = prev;
        cell.next = Some(c);
        cell.origin = Some(c);
        let nc = self.cells.alloc(cell);
        match prev {
            | Some(p) => self.cells[&p].next = Some(nc),
            | None => self.first = Some(nc),
        }
        let old = &mut self.cells[&c];
        old.prev = Some(nc);
        old.split = Some((self.step, nc));
        nc
    }

    /// Number `v` next: take it out of its cell, then move its unvisited neighbours of
    /// every cell into a cell right in front of it.
    pub(crate) fn visit(&mut self, v: usize) {
        debug_assert!(!self.visited[v], "vertex {} visited twice", v);
        let home = self.cell_of[v];
        for k in 0..self.views.len() {
            self.unlink(k, home, v);
        }
        self.cells[&home].len -= 1;
        if self.cells[&home].len == 0 {
            self.drop_cell(home);
        }
        self.visited[v] = true;

        let step = self.step;
        let mut touched = Vec::new();
        // view 0 decides the moves; the other views follow them
        for i in 0..self.views[0].adj[v].len() {
            let u = self.views[0].adj[v][i];
            if self.visited[u] {
                continue;
            }
            let c = self.cell_of[u];
            let split = self.cells[&c].split;
            let nc = match split {
                | Some((s, nc)) if s == step => nc,
                | _ => {
                    touched.push(c);
                    self.split_before(c)
                }
            };
            self.unlink(0, c, u);
            self.push_back(0, nc, u);
            self.cells[&c].len -= 1;
            self.cells[&nc].len += 1;
            self.cell_of[u] = nc;
        }
        for k in 1..self.views.len() {
            for i in 0..self.views[k].adj[v].len() {
                let u = self.views[k].adj[v][i];
                if self.visited[u] {
                    continue;
                }
                let nc = self.cell_of[u];
                let Some(c) = self.cells[&nc].origin else { continue };
                self.unlink(k, c, u);
                self.push_back(k, nc, u);
            }
        }
        for c in touched {
            if self.cells[&c].len == 0 {
                self.drop_cell(c);
            }
        }
        self.step += 1;
    }
}

/// How to pick among the vertices of the first cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tie {
    /// the head of view 0
    Head,
    /// LBFS*: view 0 and view 1 are the two prior rankings
    Star,
}

/// Run one sweep and return the visiting order.
pub(crate) fn sweep(
    adj: &[Vec<usize>], priorities: &[&[usize]], start: Option<usize>, tie: Tie,
) -> Vec<usize> {
    run(adj, priorities, start, tie).0
}

/// [`sweep`], also returning the number of witness entries LBFS* inspected.
fn run(
    adj: &[Vec<usize>], priorities: &[&[usize]], start: Option<usize>, tie: Tie,
) -> (Vec<usize>, usize) {
    let n = adj.len();
    let mut partition = Partition::new(adj, priorities);
    let mut witnesses = match tie {
        | Tie::Head => None,
        | Tie::Star => Some(Witnesses::new(adj, priorities[0], priorities[1])),
    };
    let mut order = Vec::with_capacity(n);
    for step in 0..n {
        let pivot = match start {
            | Some(s) if step == 0 => s,
            | _ => {
                let Some(alpha) = partition.head(0) else { break };
                match &mut witnesses {
                    | None => alpha,
                    | Some(w) => w.choose(alpha, partition.head(1).unwrap_or(alpha), step),
                }
            }
        };
        partition.visit(pivot);
        order.push(pivot);
    }
    debug_assert_eq!(order.len(), n);
    (order, witnesses.map_or(0, |w| w.checks))
}

/// The later neighbourhoods LBFS* compares: `later_a[v]` lists the neighbours that
/// ranking A puts after `v`, and `later_b` holds every pair `(v, x)` with `x` a neighbour
/// that ranking B puts after `v`.
struct Witnesses {
    later_a: Vec<Vec<usize>>,
    later_b: IndexSet<(usize, usize)>,
    checks: usize,
}

impl Witnesses {
    fn new(adj: &[Vec<usize>], rank_a: &[usize], rank_b: &[usize]) -> Self {
        let mut later_a = vec![Vec::new(); adj.len()];
        let mut later_b = IndexSet::new();
        for (v, ns) in adj.iter().enumerate() {
            for &x in ns {
                if rank_a[x] > rank_a[v] {
                    later_a[v].push(x);
                }
                if rank_b[x] > rank_b[v] {
                    later_b.insert((v, x));
                }
            }
        }
        Witnesses { later_a, later_b, checks: 0 }
    }

    /// Choose between the heads `alpha` of ranking A and `beta` of ranking B: `alpha`
    /// wins exactly when its later A-neighbours are all later B-neighbours of `beta`.
    ///
    /// The scan stops at the first entry outside `beta`'s set, so a losing `alpha` costs
    /// at most one entry more than the size of that set. The loser's bill is thus paid by
    /// the vertex visited next, and a sweep inspects O(n + m) entries overall.
    fn choose(&mut self, alpha: usize, beta: usize, step: usize) -> usize {
        if alpha == beta {
            return alpha;
        }
        self.checks += 1;
        let mut covered = true;
        for &x in &self.later_a[alpha] {
            self.checks += 1;
            if !self.later_b.contains(&(beta, x)) {
                covered = false;
                break;
            }
        }
        let chosen = if covered { alpha } else { beta };
        log::trace!("LBFS* step {}: alpha {} beta {} -> {}", step, alpha, beta, chosen);
        chosen
    }
}
