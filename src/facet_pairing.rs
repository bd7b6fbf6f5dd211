//! `FacetPairing<K>`: a symmetric matching of simplex facets (or "boundary"
//! markers), its canonical-form test, automorphism extraction, and its
//! text/Graphviz representations.
//!
//! This is the component the whole pipeline hinges on: `is_canonical`/
//! `is_canonical_internal` decide, in one pass, both whether a pairing is
//! the lexicographically-minimal representative of its isomorphism class and
//! (as a side effect) what its full automorphism group is. The algorithm
//! exploits the tree-like structure of the facet-pairing search rather than
//! treating this as a general graph-isomorphism problem.

use crate::facet::FacetSpec;
use crate::isomorphism::Isomorphism;
use crate::perm::Perm;
use crate::triangulation::Triangulation;
use std::cmp::Ordering;
use std::fmt::Write as _;

/// A facet pairing on `n` simplices of dimension `K - 1`: for each facet of
/// each simplex, either its partner facet or "boundary".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetPairing<const K: usize> {
    size: usize,
    partner: Vec<FacetSpec>,
}

impl<const K: usize> FacetPairing<K> {
    const D: usize = K - 1;

    /// Allocates a new pairing on `n` simplices with every facet's partner
    /// initialised to itself, a marker meaning "not yet assigned", used
    /// only by [`crate::pairing_enumerator::PairingEnumerator`] while it
    /// builds a pairing up facet by facet.
    pub fn new(n: usize) -> Self {
        let mut partner = Vec::with_capacity(n * K);
        for s in 0..n {
            for f in 0..K {
                partner.push(FacetSpec::new(s as i32, f as i32));
            }
        }
        FacetPairing { size: n, partner }
    }

    /// Reads the facet pairing described by an already-built triangulation:
    /// unglued facets become `boundary(n)`.
    pub fn from_triangulation(tri: &Triangulation<K>) -> Self {
        let n = tri.len();
        let mut partner = Vec::with_capacity(n * K);
        for s in 0..n {
            for f in 0..K {
                match tri.simplex(s).adjacent_full(f) {
                    Some((other, other_facet, _perm)) => {
                        partner.push(FacetSpec::new(other as i32, other_facet as i32));
                    }
                    None => partner.push(FacetSpec::boundary(n)),
                }
            }
        }
        FacetPairing { size: n, partner }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, f: FacetSpec) -> usize {
        debug_assert!((f.simplex as usize) < self.size && (f.facet as usize) < K);
        f.simplex as usize * K + f.facet as usize
    }

    pub fn dest(&self, s: usize, f: usize) -> FacetSpec {
        self.partner[s * K + f]
    }

    pub fn dest_of(&self, f: FacetSpec) -> FacetSpec {
        self.partner[self.idx(f)]
    }

    pub fn set_partner(&mut self, f: FacetSpec, to: FacetSpec) {
        let i = self.idx(f);
        self.partner[i] = to;
    }

    pub fn is_unmatched(&self, f: FacetSpec) -> bool {
        self.dest_of(f).is_boundary(self.size)
    }

    pub fn is_closed(&self) -> bool {
        let mut f = FacetSpec::new(0, 0);
        while !f.is_past_end(self.size, true) {
            if self.is_unmatched(f) {
                return false;
            }
            f.inc(Self::D);
        }
        true
    }

    // ---- text representation -------------------------------------------

    pub fn to_text_rep(&self) -> String {
        let mut out = String::new();
        let mut f = FacetSpec::new(0, 0);
        let mut first = true;
        while !f.is_past_end(self.size, true) {
            if !first {
                out.push(' ');
            }
            first = false;
            let d = self.dest_of(f);
            write!(out, "{} {}", d.simplex, d.facet).unwrap();
            f.inc(Self::D);
        }
        out
    }

    /// Parses a [`Self::to_text_rep`] string back into a pairing, checking
    /// the token count, per-value ranges, and partner symmetry.
    pub fn from_text_rep(rep: &str) -> Option<Self> {
        let tokens: Vec<&str> = rep.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() % (2 * K) != 0 {
            return None;
        }
        let n = tokens.len() / (2 * K);
        let mut partner = vec![FacetSpec::new(0, 0); n * K];
        for i in 0..(n * K) {
            let s: i32 = tokens[2 * i].parse().ok()?;
            let f: i32 = tokens[2 * i + 1].parse().ok()?;
            if s < 0 || s as usize > n {
                return None;
            }
            if f < 0 || f as usize >= K {
                return None;
            }
            partner[i] = FacetSpec::new(s, f);
        }

        let ans = FacetPairing { size: n, partner };

        // Sanity check: every non-boundary destination must be symmetric.
        let mut f = FacetSpec::new(0, 0);
        while !f.is_past_end(n, true) {
            let dest = ans.dest_of(f);
            if dest.simplex as usize == n {
                if dest.facet != 0 {
                    return None;
                }
            } else if ans.dest_of(dest) != f {
                return None;
            }
            f.inc(Self::D);
        }

        Some(ans)
    }

    /// `"<dest_0,0> <dest_0,1> … | <dest_1,0> …"`, each destination either
    /// `"bdry"` or `"s:f"`.
    pub fn to_string_pretty(&self) -> String {
        let mut out = String::new();
        let mut f = FacetSpec::new(0, 0);
        while !f.is_past_end(self.size, true) {
            if f.facet == 0 && f.simplex > 0 {
                out.push_str(" | ");
            } else if f.simplex != 0 || f.facet != 0 {
                out.push(' ');
            }
            let d = self.dest_of(f);
            if d.is_boundary(self.size) {
                out.push_str("bdry");
            } else {
                write!(out, "{}:{}", d.simplex, d.facet).unwrap();
            }
            f.inc(Self::D);
        }
        out
    }

    // ---- Graphviz export -------------------------------------------------

    pub fn dot_header(graph_name: &str) -> String {
        let name = if graph_name.is_empty() { "G" } else { graph_name };
        format!(
            "graph {} {{\nedge [color=black];\nnode [shape=circle,style=filled,height=0.15,fixedsize=true,label=\"\",fontsize=9,fontcolor=\"#751010\"];\n",
            name
        )
    }

    pub fn to_dot(&self, prefix: &str, subgraph: bool, labels: bool) -> String {
        let prefix = if prefix.is_empty() { "g" } else { prefix };
        let mut out = String::new();
        if subgraph {
            writeln!(out, "subgraph pairing_{} {{", prefix).unwrap();
        } else {
            out.push_str(&Self::dot_header(&format!("{}_graph", prefix)));
        }

        for p in 0..self.size {
            write!(out, "{}_{} [label=\"", prefix, p).unwrap();
            if labels {
                write!(out, "{}", p).unwrap();
            }
            writeln!(out, "\"]").unwrap();
        }

        for p in 0..self.size {
            for f in 0..K {
                let adj = self.dest(p, f);
                if adj.is_boundary(self.size)
                    || (adj.simplex as usize) < p
                    || (adj.simplex as usize == p && (adj.facet as usize) < f)
                {
                    continue;
                }
                writeln!(out, "{}_{} -- {}_{};", prefix, p, prefix, adj.simplex).unwrap();
            }
        }
        out.push_str("}\n");
        out
    }

    // ---- canonicity -------------------------------------------------------

    /// Cheap necessary conditions for canonicity, checked before the
    /// expensive `is_canonical_internal` walk. Encodes the normal form the
    /// pairing enumerator builds pairings in.
    fn meets_preconditions(&self) -> bool {
        for simp in 0..self.size {
            for facet in 0..Self::D {
                let a = self.dest(simp, facet + 1);
                let b = self.dest(simp, facet);
                if a < b && a != FacetSpec::new(simp as i32, facet as i32) {
                    return false;
                }
            }
            if simp > 0 && self.dest(simp, 0).simplex >= simp as i32 {
                return false;
            }
            if simp > 1 {
                let cur = self.dest(simp, 0);
                let prev = self.dest(simp - 1, 0);
                if cur <= prev {
                    return false;
                }
            }
        }
        true
    }

    /// Full canonicity test: cheap preconditions, then
    /// [`Self::is_canonical_internal`].
    pub fn is_canonical(&self) -> bool {
        if !self.meets_preconditions() {
            return false;
        }
        self.is_canonical_internal().is_some()
    }

    /// The heart of the algorithm. Builds every automorphism of `self` one
    /// facet at a time (preimage of facet 0, then the facet after it, …),
    /// pruning branches that would produce a lexicographically smaller
    /// pairing. Returns `Some(automorphisms)` if `self` is canonical
    /// (lexicographically minimal in its isomorphism class), `None`
    /// otherwise.
    ///
    /// Walks the facet order, at each step either extending every live
    /// automorphism candidate by its forced image or discarding it, so the
    /// whole automorphism group falls out of the same pass that decides
    /// canonicity.
    pub fn is_canonical_internal(&self) -> Option<Vec<Isomorphism<K>>> {
        let n = self.size;
        let d = Self::D;
        let mut list: Vec<Isomorphism<K>> = Vec::new();

        let first_face = FacetSpec::new(0, 0);

        if self.is_unmatched(first_face) {
            // A single simplex with no gluings at all: every facet
            // permutation is an automorphism.
            for i in 0..Perm::<K>::count() {
                let mut ans = Isomorphism::<K>::new(1);
                ans.set_simplex_image(0, 0);
                ans.set_facet_perm(0, Perm::from_index(i));
                list.push(ans);
            }
            return Some(list);
        }

        let total = n * K;
        let mut image = vec![FacetSpec::before_start(d); total];
        let mut pre_image = vec![FacetSpec::before_start(d); total];

        let first_face_dest = self.dest_of(first_face);

        let mut pre0 = first_face;
        loop {
            if pre0.is_past_end(n, true) {
                break;
            }

            if self.is_unmatched(pre0) {
                pre0.inc(d);
                continue;
            }

            let first_dest_pre = self.dest_of(pre0);
            if first_face_dest.simplex == 0 && first_dest_pre.simplex != pre0.simplex {
                pre0.inc(d);
                continue;
            }
            if first_face_dest.simplex != 0 && first_dest_pre.simplex == pre0.simplex {
                return None;
            }

            image[self.idx(pre0)] = first_face;
            pre_image[self.idx(first_face_dest)] = first_dest_pre;
            image[self.idx(first_dest_pre)] = first_face_dest;

            let mut trying = first_face;
            trying.inc(d);
            if trying == first_face_dest {
                trying.inc(d);
            }

            while trying != first_face {
                let mut step_down = false;

                if trying.is_past_end(n, true) {
                    let mut ans = Isomorphism::<K>::new(n);
                    for i in 0..n {
                        let img0 = image[i * K];
                        ans.set_simplex_image(i, img0.simplex as usize);
                        let mut perm_img = [0u8; K];
                        for (j, slot) in perm_img.iter_mut().enumerate() {
                            *slot = image[i * K + j].facet as u8;
                        }
                        ans.set_facet_perm(i, Perm::from_image(perm_img));
                    }
                    list.push(ans);
                    step_down = true;
                } else {
                    let pre_slot = self.idx(trying);
                    let mut pre = pre_image[pre_slot];

                    if !pre.is_before_start() && pre.facet as usize == d {
                        pre.set_before_start(d);
                        step_down = true;
                    } else {
                        if pre.is_before_start() {
                            pre.simplex = pre_image[trying.simplex as usize * K].simplex;
                            pre.facet = 0;
                        } else {
                            pre.facet += 1;
                        }

                        let mut broke_canonical = false;
                        while (pre.facet as usize) <= d {
                            if !image[self.idx(pre)].is_before_start() {
                                pre.facet += 1;
                                continue;
                            }
                            let trying_unmatched = self.is_unmatched(trying);
                            let pre_unmatched = self.is_unmatched(pre);
                            if !trying_unmatched && pre_unmatched {
                                pre.facet += 1;
                                continue;
                            }
                            if trying_unmatched && !pre_unmatched {
                                broke_canonical = true;
                            }
                            break;
                        }
                        if broke_canonical {
                            return None;
                        }

                        while (pre.facet as usize) <= d && !image[self.idx(pre)].is_before_start()
                        {
                            pre.facet += 1;
                        }
                        if pre.facet as usize == d + 1 {
                            pre.set_before_start(d);
                            step_down = true;
                        }
                    }
                    pre_image[pre_slot] = pre;
                }

                if !step_down {
                    let pre = pre_image[self.idx(trying)];
                    image[self.idx(pre)] = trying;

                    if !self.is_unmatched(pre) {
                        let f_pre = self.dest_of(pre);
                        if image[self.idx(f_pre)].is_before_start() {
                            let mut assigned = false;
                            for i in 0..K {
                                let cand = image[f_pre.simplex as usize * K + i];
                                if !cand.is_before_start() {
                                    let simp = cand.simplex as usize;
                                    let mut facet = 0usize;
                                    while !pre_image[simp * K + facet].is_before_start() {
                                        facet += 1;
                                    }
                                    image[self.idx(f_pre)] =
                                        FacetSpec::new(simp as i32, facet as i32);
                                    assigned = true;
                                    break;
                                }
                            }
                            if !assigned {
                                let mut simp = trying.simplex as usize + 1;
                                while !pre_image[simp * K].is_before_start() {
                                    simp += 1;
                                }
                                image[self.idx(f_pre)] = FacetSpec::new(simp as i32, 0);
                            }
                            let f_img = image[self.idx(f_pre)];
                            pre_image[self.idx(f_img)] = f_pre;
                        }
                    }

                    loop {
                        let f_img = self.dest_of(trying);
                        let mut f_pre = self.dest_of(pre_image[self.idx(trying)]);
                        if !f_pre.is_boundary(n) {
                            f_pre = image[self.idx(f_pre)];
                        }

                        match f_img.cmp(&f_pre) {
                            Ordering::Less => step_down = true,
                            Ordering::Greater => return None,
                            Ordering::Equal => {}
                        }

                        trying.inc(d);
                        if step_down
                            || trying.is_past_end(n, true)
                            || pre_image[self.idx(trying)].is_before_start()
                        {
                            break;
                        }
                    }
                }

                if step_down {
                    trying.dec(d);
                    loop {
                        let f_pre = pre_image[self.idx(trying)];
                        if !self.is_unmatched(f_pre) {
                            let f_pre_dest = self.dest_of(f_pre);
                            if image[self.idx(f_pre_dest)] < trying {
                                trying.dec(d);
                                continue;
                            }
                        }
                        break;
                    }

                    let f_pre = pre_image[self.idx(trying)];
                    image[self.idx(f_pre)].set_before_start(d);
                    if !self.is_unmatched(f_pre) {
                        let f_pre_dest = self.dest_of(f_pre);
                        let f_img = image[self.idx(f_pre_dest)];
                        pre_image[self.idx(f_img)].set_before_start(d);
                        image[self.idx(f_pre_dest)].set_before_start(d);
                    }
                }
            }

            pre0.inc(d);
        }

        Some(list)
    }

    /// Returns the isomorphism `alpha` that canonicalises an arbitrary
    /// pairing: `alpha . self` is in canonical form. Isolated simplices
    /// (no gluings at all) are pushed to the tail, represented as a trailing
    /// run of `isolated_count` simplices rather than physically relocated.
    pub fn make_canonical(&self) -> Isomorphism<K> {
        let n = self.size;
        let d = Self::D;

        let is_isolated = |s: usize| (0..K).all(|f| self.is_unmatched(FacetSpec::new(s as i32, f as i32)));
        let num_isolated = (0..n).filter(|&s| is_isolated(s)).count();
        let start = (0..n).find(|&s| !is_isolated(s));

        let start = match start {
            None => {
                // Every simplex is isolated: already canonical.
                return Isomorphism::<K>::identity(n);
            }
            Some(s) => s,
        };
        let _ = start; // the walk below always starts from facet (0,0); kept for clarity.

        let total = n * K;
        let mut best = vec![FacetSpec::before_start(d); total];
        for s in 0..n {
            for f in 0..K {
                best[s * K + f] = self.dest(s, f);
            }
        }
        let mut image = vec![FacetSpec::before_start(d); total];
        let mut pre_image = vec![FacetSpec::before_start(d); total];

        let first_face = FacetSpec::new(0, 0);
        let mut best_ans: Option<Isomorphism<K>> = None;
        let mut is_better_at: Option<usize> = None;

        let mut pre0 = first_face;
        loop {
            if pre0.is_past_end(n, true) {
                break;
            }
            if self.is_unmatched(pre0) {
                pre0.inc(d);
                continue;
            }

            image[self.idx(pre0)] = first_face;

            let mut trying = first_face;
            trying.inc(d);

            let first_face_dest = self.dest_of(pre0);
            if first_face_dest.simplex == pre0.simplex {
                image[self.idx(first_face_dest)] = FacetSpec::new(0, 1);
                pre_image[self.idx(FacetSpec::new(0, 1))] = first_face_dest;
                trying.inc(d);
            } else {
                image[self.idx(first_face_dest)] = FacetSpec::new(1, 0);
                pre_image[self.idx(FacetSpec::new(1, 0))] = first_face_dest;
            }

            let fixed_image = image[self.idx(first_face_dest)];
            match fixed_image.cmp(&best[0]) {
                Ordering::Less => {
                    is_better_at = Some(0);
                }
                Ordering::Greater => {
                    image[self.idx(pre0)].set_before_start(d);
                    image[self.idx(first_face_dest)].set_before_start(d);
                    pre_image[self.idx(FacetSpec::new(0, 1))].set_before_start(d);
                    pre_image[self.idx(FacetSpec::new(1, 0))].set_before_start(d);
                    pre0.inc(d);
                    continue;
                }
                Ordering::Equal => {
                    is_better_at = None;
                }
            }

            while trying != first_face {
                let mut step_down = false;

                if trying.is_past_end(n - num_isolated, true) {
                    if best_ans.is_none() || is_better_at.is_some() {
                        let mut ans = Isomorphism::<K>::new(n);
                        let mut k = 0usize;
                        for i in 0..n {
                            if image[i * K].is_before_start() {
                                ans.set_simplex_image(i, n - num_isolated + k);
                                k += 1;
                                ans.set_facet_perm(i, Perm::identity());
                            } else {
                                ans.set_simplex_image(i, image[i * K].simplex as usize);
                                let mut perm_img = [0u8; K];
                                for (j, slot) in perm_img.iter_mut().enumerate() {
                                    *slot = image[i * K + j].facet as u8;
                                }
                                ans.set_facet_perm(i, Perm::from_image(perm_img));
                            }

                            if pre_image[i * K].is_before_start() {
                                for f in 0..K {
                                    best[i * K + f] = FacetSpec::boundary(n);
                                }
                            } else {
                                for f in 0..K {
                                    let other = self.dest_of(pre_image[i * K + f]);
                                    if !other.is_boundary(n) {
                                        best[i * K + f] = image[self.idx(other)];
                                    } else {
                                        best[i * K + f] = FacetSpec::boundary(n);
                                    }
                                }
                            }
                        }
                        best_ans = Some(ans);
                        is_better_at = None;
                    }
                    step_down = true;
                } else {
                    let pre_slot = self.idx(trying);
                    let mut pre = pre_image[pre_slot];

                    if !pre.is_before_start() && pre.facet as usize == d {
                        pre.set_before_start(d);
                        step_down = true;
                    } else {
                        if pre.is_before_start() {
                            pre.simplex = pre_image[trying.simplex as usize * K].simplex;
                            pre.facet = 0;
                        } else {
                            pre.facet += 1;
                        }
                        while (pre.facet as usize) <= d && !image[self.idx(pre)].is_before_start()
                        {
                            pre.facet += 1;
                        }
                        if pre.facet as usize == d + 1 {
                            pre.set_before_start(d);
                            step_down = true;
                        }
                    }
                    pre_image[pre_slot] = pre;
                }

                if !step_down {
                    let pre = pre_image[self.idx(trying)];
                    image[self.idx(pre)] = trying;

                    if !self.is_unmatched(pre) {
                        let f_pre = self.dest_of(pre);
                        if image[self.idx(f_pre)].is_before_start() {
                            let mut assigned = false;
                            for i in 0..K {
                                let cand = image[f_pre.simplex as usize * K + i];
                                if !cand.is_before_start() {
                                    let simp = cand.simplex as usize;
                                    let mut facet = 0usize;
                                    while !pre_image[simp * K + facet].is_before_start() {
                                        facet += 1;
                                    }
                                    image[self.idx(f_pre)] =
                                        FacetSpec::new(simp as i32, facet as i32);
                                    assigned = true;
                                    break;
                                }
                            }
                            if !assigned {
                                let mut simp = trying.simplex as usize + 1;
                                while !pre_image[simp * K].is_before_start() {
                                    simp += 1;
                                }
                                image[self.idx(f_pre)] = FacetSpec::new(simp as i32, 0);
                            }
                            let f_img = image[self.idx(f_pre)];
                            pre_image[self.idx(f_img)] = f_pre;
                        }
                    }

                    loop {
                        if is_better_at.is_none() {
                            let f_img = best[self.idx(trying)];
                            let mut f_pre = self.dest_of(pre_image[self.idx(trying)]);
                            if !f_pre.is_boundary(n) {
                                f_pre = image[self.idx(f_pre)];
                            }
                            match f_img.cmp(&f_pre) {
                                Ordering::Less => step_down = true,
                                Ordering::Greater => is_better_at = Some(self.idx(trying)),
                                Ordering::Equal => {}
                            }
                        }
                        trying.inc(d);
                        if step_down
                            || trying.is_past_end(n, true)
                            || pre_image[self.idx(trying)].is_before_start()
                        {
                            break;
                        }
                    }
                }

                if step_down {
                    trying.dec(d);
                    loop {
                        let f_pre = pre_image[self.idx(trying)];
                        if !self.is_unmatched(f_pre) {
                            let f_pre_dest = self.dest_of(f_pre);
                            if image[self.idx(f_pre_dest)] < trying {
                                trying.dec(d);
                                continue;
                            }
                        }
                        break;
                    }

                    if let Some(at) = is_better_at {
                        if at >= self.idx(trying) {
                            is_better_at = None;
                        }
                    }

                    let f_pre = pre_image[self.idx(trying)];
                    image[self.idx(f_pre)].set_before_start(d);
                    if !self.is_unmatched(f_pre) {
                        let f_pre_dest = self.dest_of(f_pre);
                        let f_img = image[self.idx(f_pre_dest)];
                        pre_image[self.idx(f_img)].set_before_start(d);
                        image[self.idx(f_pre_dest)].set_before_start(d);
                    }
                }
            }

            pre0.inc(d);
        }

        best_ans.unwrap_or_else(|| Isomorphism::<K>::identity(n))
    }

    /// Applies an isomorphism to produce the conjugated pairing
    /// `alpha . self`.
    pub fn apply_isomorphism(&self, alpha: &Isomorphism<K>) -> Self {
        let n = self.size;
        let mut partner = vec![FacetSpec::new(0, 0); n * K];
        for s in 0..n {
            for f in 0..K {
                let src = FacetSpec::new(s as i32, f as i32);
                let image_src = alpha.apply(src);
                let dest = self.dest_of(src);
                let image_dest = if dest.is_boundary(n) {
                    FacetSpec::boundary(n)
                } else {
                    alpha.apply(dest)
                };
                partner[image_src.simplex as usize * K + image_src.facet as usize] = image_dest;
            }
        }
        FacetPairing { size: n, partner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The two canonical 2-simplex pairings on 2 triangles (edges: d+1=3,
    /// so K=3).
    fn two_triangle_pairings() -> Vec<String> {
        vec![
            // All three edges of triangle 0 glued to triangle 1 (a sphere).
            "1 0 1 1 1 2 0 0 0 1 0 2".to_string(),
            // Two edges glued straight across, one pair self-folded... the
            // second canonical form: edges 0<->1 of each triangle glued to
            // each other, and each triangle's own edge 2 self-glued.
            "1 0 1 1 0 2 0 0 0 1 1 2".to_string(),
        ]
    }

    #[test]
    fn text_rep_roundtrip() {
        for rep in two_triangle_pairings() {
            let pairing = FacetPairing::<3>::from_text_rep(&rep).expect("should parse");
            assert_eq!(pairing.to_text_rep(), rep);
        }
    }

    #[test]
    fn single_simplex_no_gluings_is_canonical_with_full_automorphisms() {
        let pairing = FacetPairing::<3>::new(1);
        let autos = pairing.is_canonical_internal().expect("must be canonical");
        assert_eq!(autos.len(), Perm::<3>::count());
    }

    #[test]
    fn known_canonical_pairings_pass_is_canonical() {
        for rep in two_triangle_pairings() {
            let pairing = FacetPairing::<3>::from_text_rep(&rep).unwrap();
            assert!(pairing.is_canonical(), "expected canonical: {rep}");
        }
    }

    #[test]
    fn make_canonical_is_idempotent_on_already_canonical_input() {
        let pairing = FacetPairing::<3>::from_text_rep(&two_triangle_pairings()[0]).unwrap();
        let alpha = pairing.make_canonical();
        let canon = pairing.apply_isomorphism(&alpha);
        assert!(canon.is_canonical());
    }

    #[test]
    fn dot_header_has_expected_attribute_lines() {
        let header = FacetPairing::<4>::dot_header("G");
        assert!(header.contains("edge [color=black];"));
        assert!(header.contains(
            "node [shape=circle,style=filled,height=0.15,fixedsize=true,label=\"\",fontsize=9,fontcolor=\"#751010\"];"
        ));
    }

    #[test]
    fn from_text_rep_rejects_asymmetric_input() {
        // facet (0,0) claims partner (1,0), but (1,0) claims partner (1,1)
        // instead of (0,0), so the pairing isn't symmetric.
        let bad = "1 0 1 1 1 2 1 1 0 1 0 2";
        assert!(FacetPairing::<3>::from_text_rep(bad).is_none());
    }
}
