type HashMap<K,V> = std::collections::hash_map::HashMap<K,V,nohash::BuildNoHashHasher<usize>>;
type HashSet<K> = std::collections::hash_set::HashSet<K,nohash::BuildNoHashHasher<usize>>;

fn empty_set() -> HashSet<usize> {
    HashSet::with_hasher(nohash::BuildNoHashHasher::default())
}

// three colour bookkeeping for the depth first cycle search
// a node in neither set is unvisited, no node is in both
struct Visited {
    on_path:HashSet<usize>,
    finished:HashSet<usize>
}

impl From<&DirectedGraph> for Visited {
    fn from(value: &DirectedGraph) -> Self {
        Self {
            on_path:empty_set(),
            finished:HashSet::with_capacity_and_hasher(
                value.nodes_len(), nohash::BuildNoHashHasher::default()
            )
        }
    }
}

impl Visited {
    fn enter(&mut self,node:usize) {
        debug_assert!(!self.finished.contains(&node));
        self.on_path.insert(node);
    }
    fn leave(&mut self,node:usize) {
        debug_assert!(self.on_path.contains(&node));
        self.on_path.remove(&node);
        self.finished.insert(node);
    }
    fn is_on_path(&self,node:&usize) -> bool {
        self.on_path.contains(node)
    }
    fn is_finished(&self,node:&usize) -> bool {
        if self.finished.contains(node) {
            debug_assert!(!self.on_path.contains(node));
            return true;
        }
        false
    }
}

// A directed graph over usize node ids
// re-inserting an existing pair is a no-op, there are no multi-edges
#[derive(Clone,Debug)]
pub struct DirectedGraph {
    edges_len:usize,
    // successors of every node
    nodes:HashMap<usize,HashSet<usize>>
}

impl Default for DirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self {edges_len:0,nodes:HashMap::with_hasher(nohash::BuildNoHashHasher::default())}
    }
    pub fn nodes_len(&self) -> usize {
        self.nodes.len()
    }
    pub fn edges_len(&self) -> usize {
        self.edges_len
    }
    pub fn is_empty(&self) -> bool {
        if self.nodes_len() == 0 {
            debug_assert!(self.edges_len() == 0);
            return true;
        }
        false
    }
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges_len = 0;
    }
    pub fn contains_pair(&self,start:usize,end:usize) -> bool {
        self.nodes.get(&start).is_some_and(|next| next.contains(&end))
    }
    // successors of a node, ascending by id
    pub fn next_nodes(&self,node:usize) -> Vec<usize> {
        let Some(successors) = self.nodes.get(&node)
            else {return vec![]};
        let mut next:Vec<usize> = successors.iter().copied().collect();
        next.sort_unstable();
        next
    }
    #[cfg(debug_assertions)]
    fn assert_cond(&self) {
        for successors in self.nodes.values() {
            for node in successors {
                if !self.nodes.contains_key(node) {
                    panic!("Node edges contained a non-existent node {node}")
                }
            }
        }
    }
    #[cfg(debug_assertions)]
    fn assert_pair(&self,start:usize,end:usize) {
        let (Some(successors),true) = (self.nodes.get(&start),self.nodes.contains_key(&end))
            else {panic!("Edge {start} -> {end} defined, but an endpoint is non-existent")};

        if !successors.contains(&end) {
            panic!("Edge {start} -> {end} defined, but {end} is not in {start}'s successors");
        }
    }
    // insert a node without adding edges
    pub fn push_node(&mut self,node:usize) {
        self.nodes.entry(node).or_insert_with(empty_set);
    }
    // returns false if the pair was already present
    pub fn push_pair(&mut self,start:usize,end:usize) -> bool {
        let is_new = self.nodes.entry(start).or_insert_with(empty_set).insert(end);
        self.push_node(end);

        if is_new {
            self.edges_len += 1;
        }

        #[cfg(debug_assertions)]
        self.assert_pair(start, end);
        #[cfg(debug_assertions)]
        self.assert_cond();

        is_new
    }

    // iterative depth first search, O(V + E)
    // start nodes and successors are tried in ascending id order, so the result is deterministic
    // returns the nodes of the first cycle met, first node repeated at the end
    pub fn find_cycle(&self) -> Option<Vec<usize>> {
        let mut visited:Visited = self.into();
        let mut starts:Vec<usize> = self.nodes.keys().copied().collect();
        starts.sort_unstable();

        for start in starts {
            if visited.is_finished(&start) {
                continue;
            }
            let mut path = vec![start];
            // successors still to explore for every node on the path, reversed so pop() yields the smallest
            let mut pending = vec![self.pending_from(start)];
            visited.enter(start);

            while let Some(successors) = pending.last_mut() {
                match successors.pop() {
                    Some(next) if visited.is_on_path(&next) => {
                        let cycle_start = path.iter().position(|n| *n == next)?;
                        let mut cycle = path.split_off(cycle_start);
                        cycle.push(next);
                        return Some(cycle);
                    }
                    Some(next) if visited.is_finished(&next) => {}
                    Some(next) => {
                        visited.enter(next);
                        path.push(next);
                        pending.push(self.pending_from(next));
                    }
                    None => {
                        pending.pop();
                        if let Some(done) = path.pop() {
                            visited.leave(done);
                        }
                    }
                }
            }
        }
        None
    }

    fn pending_from(&self,node:usize) -> Vec<usize> {
        let mut next = self.next_nodes(node);
        next.reverse();
        next
    }
}
