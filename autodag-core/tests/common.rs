use autodag_core::{Graph, Matrix, Op, Parameter};

/// `F[a] = x·a² + a`, built as `add_a(mult_a(mult_a(x)))`.
#[allow(dead_code)]
pub fn scalar_graph(a: &Parameter) -> Graph {
    let mut graph = Graph::new();
    let x = graph.input("x");
    let m2 = graph
        .node("multiplication node 2", Op::mult(a.clone()).expect("scalar a"), &[x])
        .expect("valid input");
    let m1 = graph
        .node("multiplication node 1", Op::mult(a.clone()).expect("scalar a"), &[m2])
        .expect("valid input");
    graph
        .node("addition node", Op::add(a.clone()).expect("scalar a"), &[m1])
        .expect("valid input");
    graph.seal().expect("graph seals");
    graph
}

/// Mean squared error of `X·w + b` against `y` over `samples` rows.
#[allow(dead_code)]
pub fn regression_graph(w: &Parameter, b: &Parameter, samples: usize) -> Graph {
    let mut graph = Graph::new();
    let x = graph.input("x");
    let y = graph.input("y");
    let proj = graph
        .node("projection", Op::projection(w.clone()), &[x])
        .expect("valid input");
    let biased = graph
        .node("bias", Op::bias(b.clone()), &[proj])
        .expect("valid input");
    let residual = graph
        .node("residual", Op::subtract(), &[biased, y])
        .expect("valid inputs");
    let sq = graph
        .node("norm square", Op::norm_square(), &[residual])
        .expect("valid input");
    graph
        .node("mse", Op::const_mult(1.0 / samples as f64), &[sq])
        .expect("valid input");
    graph.seal().expect("graph seals");
    graph
}

/// Four rows generated exactly by `w = [3, -2, 0.5]`, `b = 1`.
#[allow(dead_code)]
pub fn regression_data() -> (Matrix, Matrix) {
    let x = Matrix::from_rows(vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![1.0, 1.0, 1.0],
    ])
    .expect("rectangular rows");
    let y = Matrix::column_vector(vec![4.0, -1.0, 1.5, 2.5]);
    (x, y)
}

#[allow(dead_code)]
pub const TRUE_WEIGHTS: [f64; 3] = [3.0, -2.0, 0.5];
#[allow(dead_code)]
pub const TRUE_BIAS: f64 = 1.0;
