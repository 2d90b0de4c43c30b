mod common;

use common::{face_set, grid_nodes, kuhn_cells};
use mesh_complex::prelude::*;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A random subset of the 2-cube Kuhn grid, in random order.
fn shuffled_subset(seed: u64, keep: usize) -> Vec<[u32; 4]> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut cells = kuhn_cells(2);
    cells.shuffle(&mut rng);
    cells.truncate(keep);
    cells
}

fn build(cells: &[[u32; 4]]) -> MeshComplex3 {
    let mut m = grid_nodes(2);
    for &c in cells {
        m.push_cell(Tetra::new(c), Link::TopLevel).unwrap();
    }
    m
}

proptest! {
    #[test]
    fn insertion_order_does_not_change_the_complex(seed in any::<u64>(), keep in 1usize..=48) {
        let cells = shuffled_subset(seed, keep);
        let mut reversed = cells.clone();
        reversed.reverse();
        let a = build(&cells);
        let b = build(&reversed);
        prop_assert_eq!(a.live_counts(), b.live_counts());
        for d in Dim::ALL {
            prop_assert_eq!(face_set(&a, d), face_set(&b, d));
        }
        a.validate_invariants().unwrap();
    }

    #[test]
    fn insert_then_remove_everything_empties_the_complex(seed in any::<u64>(), keep in 1usize..=48) {
        let cells = shuffled_subset(seed, keep);
        let mut m = build(&cells);
        let mut order = cells.clone();
        order.shuffle(&mut SmallRng::seed_from_u64(seed.wrapping_add(1)));
        for c in order {
            m.pop_cell(c);
            m.validate_invariants().unwrap();
        }
        prop_assert_eq!(m.live_counts(), [27, 0, 0, 0]);
        for d in [Dim::Edge, Dim::Tria, Dim::Cell] {
            prop_assert_eq!(m.dictionary_len(d), 0);
        }
        for n in 0..27 {
            m.pop_node(n, None);
        }
        prop_assert!(m.is_empty());
        m.validate_invariants().unwrap();
    }

    #[test]
    fn find_is_idempotent_under_unrelated_edits(seed in any::<u64>()) {
        let cells = shuffled_subset(seed, 48);
        let (stay, churn) = cells.split_at(24);
        let mut m = build(stay);
        let probe = stay[0];
        let before = m.find_cell(probe).unwrap();
        let faces: Vec<_> = (0..4)
            .map(|skip| {
                let mut t = [0u32; 3];
                let mut k = 0;
                for (i, &n) in probe.iter().enumerate() {
                    if i != skip {
                        t[k] = n;
                        k += 1;
                    }
                }
                (t, m.find_tria(t).unwrap())
            })
            .collect();
        for &c in churn {
            m.push_cell(Tetra::new(c), Link::TopLevel).unwrap();
        }
        for &c in churn {
            m.pop_cell(c);
        }
        prop_assert_eq!(m.find_cell(probe), Some(before));
        for (t, id) in faces {
            prop_assert_eq!(m.find_tria(t), Some(id));
        }
    }
}
