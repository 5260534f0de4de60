//! Takes the exponential of a small diagonal matrix, then solves a 3x3
//! linear system and checks the solution against the right-hand side.

use densegauss::{Matrix, Vector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let m = Matrix::from_rows(&[
        [1.0, 0.0, 0.0],
        [0.0, 2.0, 0.0],
        [0.0, 0.0, -1.0],
    ]);
    println!("m =\n{}", m);

    let e = m.exp(1e-10)?;
    println!("exp(m) =\n{}", e);

    let a = Matrix::from_rows(&[
        [2.0, 1.0, -1.0],
        [-3.0, -1.0, 2.0],
        [-2.0, 1.0, 2.0],
    ]);
    let b = Vector::from_slice(&[8.0, -11.0, -3.0]);
    println!("a =\n{}", a);
    println!("b =\n{}", b);

    let x = a.solve(&b)?;
    println!("x =\n{}", x);

    let residual = &a.try_mul_vector(&x)? - &b;
    println!("a * x - b =\n{}", residual);
    println!("residual norm: {:e}", residual.norm());
    Ok(())
}
