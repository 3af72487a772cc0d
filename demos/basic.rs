// Find √10 with the three methods.  Run with `RUST_LOG=rootfinder=debug`
// (or `trace`) to see the iterations.

use std::error::Error;
use rootfinder::RootFinder;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let f = |x: f64| x * x - 10.;
    let df = |x: f64| 2. * x;
    let rf = RootFinder::new(6, 100, f).derivative(df);

    let s = rf.bisection(3., 4.)?;
    println!("after {} iters, found the root: {} with Bisection method.",
             s.iterations, s.root);

    let s = rf.newton_raphson(3.)?;
    println!("after {} iters, found the root: {} with Newton-Raphson method.",
             s.iterations, s.root);

    let s = rf.secant(&[0., 1.])?;
    println!("after {} iters, found the root: {} with Secant method.",
             s.iterations, s.root);

    // Failures are ordinary values.
    match rf.bisection(-1., 1.) {
        Ok(s) => println!("unexpected root {}", s.root),
        Err(e) => println!("bisection on [-1, 1]: {}", e),
    }
    Ok(())
}
