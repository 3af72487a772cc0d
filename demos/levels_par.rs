//! Solve x sin(x) = level on \[0, 2\] for many random levels, in
//! parallel.

use std::{error::Error, iter, time::Instant};
use rootfinder::RootFinder;
use rand::prelude::*;
use rayon::prelude::*;

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    const N: usize = 100_000;
    let levels: Vec<_> = iter::from_fn(|| Some(1.5 * random::<f64>()))
        .take(N).collect();

    let now = Instant::now();
    let out = levels
        .par_iter()
        .map(|lv| RootFinder::new(10, 100, |x: f64| x * x.sin() - lv)
             .bisection(0., 2.))
        .collect::<Result<Vec<_>, _>>()?;
    let iterations: usize = out.iter().map(|s| s.iterations).sum();
    println!("bisection: {} secs, {:.2} iterations on average",
             now.elapsed().as_secs_f64(), iterations as f64 / N as f64);

    let now = Instant::now();
    let out = levels
        .par_iter()
        .map(|lv| RootFinder::new(10, 100, |x: f64| x * x.sin() - lv)
             .derivative(|x: f64| x.sin() + x * x.cos())
             .newton_raphson(1.))
        .collect::<Result<Vec<_>, _>>()?;
    let iterations: usize = out.iter().map(|s| s.iterations).sum();
    println!("newton_raphson: {} secs, {:.2} iterations on average",
             now.elapsed().as_secs_f64(), iterations as f64 / N as f64);

    Ok(())
}
