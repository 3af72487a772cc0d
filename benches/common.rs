// Problems shared by the benchmarks.

/// A test problem: the function, its derivative, a bracketing
/// interval \[a, b\] and a starting point for the open methods.
pub struct Problem {
    pub name: &'static str,
    pub f: fn(f64) -> f64,
    pub df: fn(f64) -> f64,
    pub a: f64,
    pub b: f64,
    pub x0: f64,
}

fn x_cos(x: f64) -> f64 { x - x.cos() }
fn d_x_cos(x: f64) -> f64 { 1. + x.sin() }

fn x2_10(x: f64) -> f64 { x * x - 10. }
fn d_x2_10(x: f64) -> f64 { 2. * x }

fn cubic(x: f64) -> f64 { x * x * x - 2. * x - 5. }
fn d_cubic(x: f64) -> f64 { 3. * x * x - 2. }

fn sin_half(x: f64) -> f64 { x.sin() - x / 2. }
fn d_sin_half(x: f64) -> f64 { x.cos() - 0.5 }

fn exp_2(x: f64) -> f64 { x.exp() - 2. }

#[inline]
pub fn problems() -> [Problem; 5] {
    use std::f64::consts::PI;
    [Problem { name: "x-cos(x)", f: x_cos, df: d_x_cos,
               a: 0., b: 1., x0: 0.5 },
     Problem { name: "x^2-10", f: x2_10, df: d_x2_10,
               a: 3., b: 4., x0: 3. },
     Problem { name: "x^3-2x-5", f: cubic, df: d_cubic,
               a: 2., b: 3., x0: 2. },
     Problem { name: "sin(x)-x/2", f: sin_half, df: d_sin_half,
               a: 0.5 * PI, b: PI, x0: 2. },
     Problem { name: "exp(x)-2", f: exp_2, df: f64::exp,
               a: 0., b: 1., x0: 0. }]
}

/// Convergence criterion of the "roots" crate matching a finder of
/// threshold `epsilon`.
pub struct Tol {
    pub epsilon: f64,
    pub maxiter: usize,
}

impl roots::Convergency<f64> for Tol {
    fn is_root_found(&mut self, y: f64) -> bool {
        y.abs() <= self.epsilon
    }

    fn is_converged(&mut self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.epsilon
    }

    fn is_iteration_limit_reached(&mut self, iter: usize) -> bool {
        iter > self.maxiter
    }
}
