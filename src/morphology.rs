use std::collections::HashSet;

use ndarray::Array2;

/// Binary dilation with a 3x3 square kernel (8-connectivity), repeated
/// `iterations` times. `0` iterations returns the mask unchanged.
pub fn dilate(mask: &Array2<bool>, iterations: u32) -> Array2<bool> {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = dilate_once(&current);
    }
    current
}

/// A pixel becomes true if ANY pixel in its 3x3 neighborhood is true.
/// Out-of-bounds neighbors are treated as false.
fn dilate_once(mask: &Array2<bool>) -> Array2<bool> {
    let (height, width) = mask.dim();
    let mut result = Array2::from_elem((height, width), false);

    for row in 0..height {
        for col in 0..width {
            let mut any_true = false;
            for dr in -1..=1_i32 {
                for dc in -1..=1_i32 {
                    let nr = row as i32 + dr;
                    let nc = col as i32 + dc;
                    if nr >= 0
                        && nr < height as i32
                        && nc >= 0
                        && nc < width as i32
                        && mask[[nr as usize, nc as usize]]
                    {
                        any_true = true;
                        break;
                    }
                }
                if any_true {
                    break;
                }
            }
            result[[row, col]] = any_true;
        }
    }

    result
}

/// Connected component labeling of `true` cells via stack-based flood fill,
/// 8-connectivity. Label `0` is reserved for `false` cells and is never a
/// component. Returns the label grid and the number of components.
pub fn label_components(fillable: &Array2<bool>) -> (Array2<u32>, u32) {
    let (height, width) = fillable.dim();
    let mut labels = Array2::<u32>::zeros((height, width));
    let mut current_label = 0_u32;
    let mut stack = Vec::new();

    for row in 0..height {
        for col in 0..width {
            if !fillable[[row, col]] || labels[[row, col]] != 0 {
                continue;
            }

            current_label += 1;
            labels[[row, col]] = current_label;
            stack.push((row, col));

            while let Some((r, c)) = stack.pop() {
                for dr in -1..=1_i32 {
                    for dc in -1..=1_i32 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let nr = r as i32 + dr;
                        let nc = c as i32 + dc;
                        if nr < 0 || nr >= height as i32 || nc < 0 || nc >= width as i32 {
                            continue;
                        }
                        let (nr, nc) = (nr as usize, nc as usize);
                        if fillable[[nr, nc]] && labels[[nr, nc]] == 0 {
                            // Labeled on push so a cell is never queued twice.
                            labels[[nr, nc]] = current_label;
                            stack.push((nr, nc));
                        }
                    }
                }
            }
        }
    }

    (labels, current_label)
}

/// Distinct positive labels appearing on the four border lines of the grid
/// (top row, bottom row, left column, right column).
pub fn edge_labels(labels: &Array2<u32>) -> HashSet<u32> {
    let mut edge = HashSet::new();
    let (height, width) = labels.dim();
    if height == 0 || width == 0 {
        return edge;
    }

    for col in 0..width {
        edge.insert(labels[[0, col]]);
        edge.insert(labels[[height - 1, col]]);
    }
    for row in 0..height {
        edge.insert(labels[[row, 0]]);
        edge.insert(labels[[row, width - 1]]);
    }

    edge.remove(&0);
    edge
}

/// Boolean mask of cells whose label belongs to `wanted`.
pub fn mask_of_labels(labels: &Array2<u32>, wanted: &HashSet<u32>) -> Array2<bool> {
    labels.map(|label| *label != 0 && wanted.contains(label))
}
