use crate::domain::error::GraphError;
use crate::domain::graph::{Adjacency, Graph};
use crate::domain::model::SccResult;
use crate::domain::traits::SccDetector;

pub struct TarjanSccDetector;

impl SccDetector for TarjanSccDetector {
    fn compute_scc(&self, graph: &Graph) -> Result<SccResult, GraphError> {
        if !graph.is_directed() {
            return Err(GraphError::InvalidGraphMode("graph must be directed"));
        }

        let adj = graph.adjacency();
        let components = tarjan_scc(&adj);

        let cyclic_component = components
            .iter()
            .map(|comp| match comp.as_slice() {
                [only] => adj.edges[*only].contains(only),
                _ => true,
            })
            .collect();

        let names = graph.vertices();
        let components = components
            .iter()
            .map(|comp| comp.iter().map(|&v| names[v].clone()).collect())
            .collect();

        Ok(SccResult {
            components,
            cyclic_component,
        })
    }
}

const UNVISITED: usize = usize::MAX;

struct TarjanState {
    next_index: usize,
    index: Vec<usize>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
}

impl TarjanState {
    fn visit(&mut self, v: usize) {
        self.index[v] = self.next_index;
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }
}

/// Components come out in the order their roots finish, which is reverse
/// topological order of the condensation. Members are listed in discovery
/// order.
fn tarjan_scc(adj: &Adjacency) -> Vec<Vec<usize>> {
    let n = adj.node_count();
    let mut st = TarjanState {
        next_index: 0,
        index: vec![UNVISITED; n],
        lowlink: vec![0; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
    };
    let mut components: Vec<Vec<usize>> = Vec::new();

    for root in 0..n {
        if st.index[root] != UNVISITED {
            continue;
        }

        st.visit(root);
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let (v, next_i) = *frame;

            if next_i < adj.edges[v].len() {
                frame.1 += 1;
                let w = adj.edges[v][next_i];
                if st.index[w] == UNVISITED {
                    st.visit(w);
                    frames.push((w, 0));
                } else if st.on_stack[w] {
                    st.lowlink[v] = st.lowlink[v].min(st.index[w]);
                }
                continue;
            }

            frames.pop();

            if st.lowlink[v] == st.index[v] {
                let mut comp = Vec::new();
                while let Some(w) = st.stack.pop() {
                    st.on_stack[w] = false;
                    comp.push(w);
                    if w == v {
                        break;
                    }
                }
                comp.reverse();
                components.push(comp);
            }

            if let Some(&(parent, _)) = frames.last() {
                st.lowlink[parent] = st.lowlink[parent].min(st.lowlink[v]);
            }
        }
    }

    components
}
