#![allow(dead_code)]

use mesh_complex::prelude::*;

/// Push `n` top-level nodes on a line.
pub fn push_nodes(m: &mut MeshComplex3, n: usize) {
    for i in 0..n {
        m.push_node(Node::new([i as f64, 0.0, 0.0]), Link::TopLevel)
            .expect("push node");
    }
}

/// Two tetrahedra glued on the face {1, 2, 3}.
pub fn two_tets() -> MeshComplex3 {
    let mut m = MeshComplex3::new();
    push_nodes(&mut m, 5);
    m.push_cell(Tetra::new([0, 1, 2, 3]), Link::TopLevel).unwrap();
    m.push_cell(Tetra::new([1, 2, 3, 4]), Link::TopLevel).unwrap();
    m
}

/// Node index of lattice point `(i, j, k)` in an `n`-cube grid.
pub fn lattice(n: u32, i: u32, j: u32, k: u32) -> u32 {
    (k * (n + 1) + j) * (n + 1) + i
}

/// Kuhn triangulation of an `n x n x n` block of unit cubes: six tets per
/// cube, conforming across cube faces. Node indices follow [`lattice`].
pub fn kuhn_cells(n: u32) -> Vec<[u32; 4]> {
    const PERMS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let mut cells = Vec::with_capacity((n * n * n * 6) as usize);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                for p in PERMS {
                    let mut at = [i, j, k];
                    let mut tet = [lattice(n, i, j, k); 4];
                    for (step, &axis) in p.iter().enumerate() {
                        at[axis] += 1;
                        tet[step + 1] = lattice(n, at[0], at[1], at[2]);
                    }
                    cells.push(tet);
                }
            }
        }
    }
    cells
}

/// Complex holding the lattice nodes of an `n`-cube grid and no cells.
pub fn grid_nodes(n: u32) -> MeshComplex3 {
    let side = (n + 1) as usize;
    let hint = CapacityHint {
        nodes: side * side * side,
        cells: (n * n * n * 6) as usize,
        ..CapacityHint::default()
    };
    let mut m = MeshComplex3::with_config(ComplexConfig::default().with_capacity(hint));
    for k in 0..=n {
        for j in 0..=n {
            for i in 0..=n {
                m.push_node(Node::new([i as f64, j as f64, k as f64]), Link::TopLevel)
                    .expect("push node");
            }
        }
    }
    m
}

/// Full Kuhn grid pushed top-level.
pub fn kuhn_grid(n: u32) -> MeshComplex3 {
    let mut m = grid_nodes(n);
    for c in kuhn_cells(n) {
        m.push_cell(Tetra::new(c), Link::TopLevel).expect("push cell");
    }
    m
}

/// Sorted node tuples of every live entity of `dim`, sorted.
pub fn face_set(m: &MeshComplex3, dim: Dim) -> Vec<Vec<u32>> {
    fn sorted(nodes: &[u32]) -> Vec<u32> {
        let mut v = nodes.to_vec();
        v.sort_unstable();
        v
    }
    let mut out: Vec<Vec<u32>> = match dim {
        Dim::Node => m.nodes().map(|(id, _)| vec![id.get()]).collect(),
        Dim::Edge => m.edges().map(|(_, e)| sorted(&e.node)).collect(),
        Dim::Tria => m.trias().map(|(_, t)| sorted(&t.node)).collect(),
        Dim::Cell => m.cells().map(|(_, c)| sorted(&c.node)).collect(),
    };
    out.sort();
    out
}
