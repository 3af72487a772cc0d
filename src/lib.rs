//! Root finding to a fixed decimal precision.
//!
//! This crate locates a real root of a function `f` from ℝ to ℝ
//! using one of three classical iterative methods:
//!
//! - [bisection][RootFinder::bisection], which needs an interval
//!   \[a, b\] on which `f` changes sign;
//! - [Newton-Raphson][RootFinder::newton_raphson], which needs a
//!   starting point and uses the derivative of `f` (an analytic one if
//!   you provide it, a forward finite difference otherwise);
//! - [secant][RootFinder::secant], which needs two starting points.
//!
//! A [`RootFinder`] is configured once with a *precision* `p` (a number
//! of decimals) and an iteration budget.  The precision sets the
//! convergence threshold `ε = 10⁻ᵖ` and the returned root is rounded to
//! `p` decimals.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rootfinder::RootFinder;
//! let finder = RootFinder::new(6, 100, |x: f64| x * x - 10.)
//!     .derivative(|x: f64| 2. * x);
//! let s = finder.newton_raphson(3.)?;
//! assert!((s.root - 10f64.sqrt()).abs() <= 1e-6);
//! assert_eq!(s.root, 3.162278);
//! # Ok(()) }
//! ```
//!
//! All methods return a [`Result`] whose error, an [`Error`], says why
//! no root was produced.  The library emits diagnostics through
//! [`tracing`] and never installs a subscriber itself.

use std::{
    fmt::{self, Debug, Display, Formatter},
    result::Result,
};
use thiserror::Error;
use tracing::{debug, trace, warn};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// Precision used when a non-positive one is requested.
pub const DEFAULT_PRECISION: i32 = 2;
/// Iteration budget used when a non-positive one is requested.
pub const DEFAULT_MAX_ITERATION: usize = 100;
/// Largest precision honoured: `10⁻ᵖ` must be a normal `f64` and
/// `1 / ε` must remain finite.
pub const MAX_PRECISION: i32 = 307;

////////////////////////////////////////////////////////////////////////
//
// Errors

/// The root finding methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Bisection,
    NewtonRaphson,
    Secant,
}

impl Method {
    /// Name of the method, as used in error messages and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Method::Bisection => "bisection",
            Method::NewtonRaphson => "newton-raphson",
            Method::Secant => "secant",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that may be returned by the root finding methods.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// `f(a)` and `f(b)` have the same sign so the bisection cannot
    /// assume that \[a, b\] contains a root.
    #[error("[{a}, {b}] is an invalid interval: f(a) = {fa} and \
             f(b) = {fb} have the same sign")]
    InvalidInterval { a: f64, fa: f64, b: f64, fb: f64 },
    /// A bound of the bisection interval is infinite or NaN.
    #[error("the interval bound {bound} is not finite")]
    InfiniteBound { bound: f64 },
    /// The value of the function at a bound of the bisection interval
    /// is not finite.
    #[error("evaluating the function at {x} yields {fx} which is not finite")]
    NotFinite { x: f64, fx: f64 },
    /// The iteration budget was exhausted before convergence.  `last`
    /// is the estimate of the root at that moment (not rounded).
    #[error("{method}: root not found after {iterations} iterations \
             (last estimate {last})")]
    NotFound { method: Method, iterations: usize, last: f64 },
    /// The update at `x` divides by zero (a vanishing derivative for
    /// Newton-Raphson, a horizontal secant line for the secant method)
    /// or produces a non-finite iterate.
    #[error("{method}: degenerate step at x = {x} after {iterations} \
             iterations (zero or non-finite denominator)")]
    Degenerate { method: Method, x: f64, iterations: usize },
}

impl Error {
    /// Number of iterations performed before the failure.
    pub fn iterations(&self) -> usize {
        match self {
            Error::NotFound { iterations, .. }
            | Error::Degenerate { iterations, .. } => *iterations,
            Error::InvalidInterval { .. }
            | Error::InfiniteBound { .. }
            | Error::NotFinite { .. } => 0,
        }
    }
}

////////////////////////////////////////////////////////////////////////
//
// Options

/// Precision and iteration budget of a [`RootFinder`].
///
/// Out of range values are replaced by the defaults, so any `Options`
/// value is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    precision: i32,
    max_iteration: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            precision: DEFAULT_PRECISION,
            max_iteration: DEFAULT_MAX_ITERATION,
        }
    }
}

impl Options {
    /// Options with [`DEFAULT_PRECISION`] and [`DEFAULT_MAX_ITERATION`].
    pub fn new() -> Self { Self::default() }

    /// Set the number of decimals of the root.  Set the default value
    /// ([`DEFAULT_PRECISION`]) if `p` is ≤ 0.  Values larger than
    /// [`MAX_PRECISION`] are capped.
    pub fn precision(mut self, p: i32) -> Self {
        self.precision = if p <= 0 { DEFAULT_PRECISION }
                         else { p.min(MAX_PRECISION) };
        self
    }

    /// Set the iteration budget.  Set the default value
    /// ([`DEFAULT_MAX_ITERATION`]) if `n` is ≤ 0.
    pub fn max_iteration(mut self, n: i32) -> Self {
        self.max_iteration = if n <= 0 { DEFAULT_MAX_ITERATION }
                             else { n as usize };
        self
    }

    /// The number of decimals of the roots.
    pub fn decimals(&self) -> i32 { self.precision }

    /// The convergence threshold `10⁻ᵖ`.
    pub fn epsilon(&self) -> f64 {
        // 10ᵖ is exact for p ≤ 22 so this is the correctly rounded 10⁻ᵖ.
        1. / 10f64.powi(self.precision)
    }

    /// The iteration budget.  Methods may perform one more iteration.
    pub fn iteration_budget(&self) -> usize { self.max_iteration }
}

////////////////////////////////////////////////////////////////////////
//
// Root finder

/// Successful result of a root finding method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// The root, rounded to the precision of the finder (except for
    /// the bounds returned as is by [`RootFinder::bisection`]).
    pub root: f64,
    /// Number of updates of the estimate.
    pub iterations: usize,
}

/// Root finder for the function `F` with optional derivative `D`.
///
/// The finder is immutable: every method may be called any number of
/// times, from several threads if `F` and `D` are [`Sync`], and
/// identical calls give identical results.
pub struct RootFinder<F, D = fn(f64) -> f64> {
    f: F,
    df: Option<D>,
    precision: i32,
    epsilon: f64,
    max_iteration: usize,
}

impl<F> RootFinder<F> {
    /// Return a finder for the function `f` with `precision` decimals
    /// and at most `max_iteration` iterations (plus one, see the
    /// methods).  Non-positive values of `precision` and
    /// `max_iteration` select [`DEFAULT_PRECISION`] and
    /// [`DEFAULT_MAX_ITERATION`] respectively.
    ///
    /// Newton-Raphson uses a forward finite difference of `f` until a
    /// derivative is given with [`RootFinder::derivative`].
    #[must_use]
    pub fn new(precision: i32, max_iteration: i32, f: F) -> Self
    where F: Fn(f64) -> f64 {
        let options = Options::new()
            .precision(precision)
            .max_iteration(max_iteration);
        Self::with_options(options, f)
    }

    /// Return a finder for `f` configured by `options`.
    #[must_use]
    pub fn with_options(options: Options, f: F) -> Self
    where F: Fn(f64) -> f64 {
        RootFinder {
            f,
            df: None,
            precision: options.decimals(),
            epsilon: options.epsilon(),
            max_iteration: options.iteration_budget(),
        }
    }
}

impl<F, D> RootFinder<F, D> {
    /// Use `df` as the derivative of the function in
    /// [`newton_raphson`][RootFinder::newton_raphson].
    #[must_use]
    pub fn derivative<E>(self, df: E) -> RootFinder<F, E>
    where E: Fn(f64) -> f64 {
        RootFinder {
            f: self.f,
            df: Some(df),
            precision: self.precision,
            epsilon: self.epsilon,
            max_iteration: self.max_iteration,
        }
    }

    /// The number of decimals of the roots.
    pub fn decimals(&self) -> i32 { self.precision }

    /// The convergence threshold `10⁻ᵖ`, also the rounding grain.
    pub fn epsilon(&self) -> f64 { self.epsilon }

    /// The iteration budget (see [`Options::iteration_budget`]).
    pub fn max_iteration(&self) -> usize { self.max_iteration }

    /// Whether an analytic derivative was provided.
    pub fn has_derivative(&self) -> bool { self.df.is_some() }

    /// Round `x` to the precision of the finder.  When `x` scaled by
    /// `1 / ε` overflows, the grain is finer than `x` can resolve and
    /// `x` is returned as is.
    #[inline]
    pub fn round(&self, x: f64) -> f64 {
        let scale = 1. / self.epsilon;
        let y = x * scale;
        if y.is_finite() { y.round() / scale } else { x }
    }
}

impl<F, D> Debug for RootFinder<F, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootFinder")
            .field("precision", &self.precision)
            .field("epsilon", &self.epsilon)
            .field("max_iteration", &self.max_iteration)
            .field("has_derivative", &self.has_derivative())
            .finish()
    }
}

impl<F, D> RootFinder<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    /// Value of the derivative at `x`.  Without an analytic derivative,
    /// this is the forward difference (f(x + ε) - f(x)) / ε.
    #[inline]
    fn slope(&self, x: f64, fx: f64) -> f64 {
        match &self.df {
            Some(df) => df(x),
            None => ((self.f)(x + self.epsilon) - fx) / self.epsilon,
        }
    }

    /// Stopping criterion of bisection and Newton-Raphson.
    #[inline]
    fn within_tolerance(&self, fx1: f64, x0: f64, x1: f64) -> bool {
        fx1.abs() <= self.epsilon || (x1 - x0).abs() <= self.epsilon
    }

    fn found(&self, method: Method, x: f64, iterations: usize) -> Solution {
        let root = self.round(x);
        debug!(%method, iterations, root, "root found");
        Solution { root, iterations }
    }

    fn exhausted(&self, method: Method, last: f64, iterations: usize) -> Error {
        debug!(%method, iterations, last, "iteration budget exhausted");
        Error::NotFound { method, iterations, last }
    }

    fn degenerate(&self, method: Method, x: f64, iterations: usize) -> Error {
        debug!(%method, iterations, x, "degenerate step");
        Error::Degenerate { method, x, iterations }
    }

    /// Reject a bisection bound `x` with value `fx` that is not usable.
    fn check_bound(&self, x: f64, fx: f64) -> Result<(), Error> {
        let method = Method::Bisection;
        if !x.is_finite() {
            debug!(%method, bound = x, "infinite bound");
            return Err(Error::InfiniteBound { bound: x })
        }
        if !fx.is_finite() {
            debug!(%method, x, fx, "function not finite at bound");
            return Err(Error::NotFinite { x, fx })
        }
        Ok(())
    }

    /// Find a root of the function on \[`a`, `b`\] using the
    /// bisection algorithm.
    ///
    /// If |f(`a`)| ≤ ε (resp. |f(`b`)| ≤ ε), `a` (resp. `b`) is
    /// returned as is with 0 iterations.  Otherwise `f(a)` and `f(b)`
    /// must have opposite signs, or [`Error::InvalidInterval`] is
    /// returned.  The order of `a` and `b` does not matter.
    ///
    /// Each iteration halves the interval keeping a sign change and
    /// moves the estimate to the middle of the new interval.  The
    /// method stops as soon as |f(x)| ≤ ε or the estimate moved by at
    /// most ε.  A midpoint at which f vanishes exactly is returned at
    /// once.  If none of this has happened after `max_iteration + 1`
    /// iterations, [`Error::NotFound`] is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # fn main() -> Result<(), rootfinder::Error> {
    /// use rootfinder::RootFinder;
    /// let finder = RootFinder::new(6, 100, |x: f64| x - x.cos());
    /// assert!((finder.bisection(0., 1.)?.root - 0.739085).abs() <= 1e-6);
    /// # Ok(()) }
    /// ```
    pub fn bisection(&self, a: f64, b: f64) -> Result<Solution, Error> {
        let f = &self.f;
        let mut fa = f(a);
        let fb = f(b);
        if fa.abs() <= self.epsilon {
            debug!(method = %Method::Bisection, root = a, "f(a) ≈ 0");
            return Ok(Solution { root: a, iterations: 0 })
        }
        if fb.abs() <= self.epsilon {
            debug!(method = %Method::Bisection, root = b, "f(b) ≈ 0");
            return Ok(Solution { root: b, iterations: 0 })
        }
        self.check_bound(a, fa)?;
        self.check_bound(b, fb)?;
        if fa * fb > 0. {
            debug!(method = %Method::Bisection, a, fa, b, fb,
                   "no sign change");
            return Err(Error::InvalidInterval { a, fa, b, fb })
        }

        let mut a = a;
        let mut b = b;
        let mut x0 = (a + b) / 2.;
        let mut fx0 = f(x0);
        let mut iterations = 0;
        loop {
            // The sign test cannot choose a half when f(x0) = 0.
            if fx0 == 0. {
                return Ok(self.found(Method::Bisection, x0, iterations))
            }
            iterations += 1;
            if fa * fx0 < 0. { b = x0 }
            else { a = x0;  fa = fx0 }
            let x1 = (a + b) / 2.;
            let fx1 = f(x1);
            trace!(iterations, a, b, x = x1, fx = fx1, "bisection step");
            if self.within_tolerance(fx1, x0, x1) {
                return Ok(self.found(Method::Bisection, x1, iterations))
            }
            if iterations > self.max_iteration {
                return Err(self.exhausted(Method::Bisection, x1, iterations))
            }
            x0 = x1;
            fx0 = fx1;
        }
    }

    /// Find a root of the function with the Newton-Raphson method
    /// starting from `initial_guess`.
    ///
    /// The update is x ← x - f(x)/f'(x) where f' is the derivative set
    /// with [`RootFinder::derivative`] or, if none was given, the
    /// forward difference (f(x + ε) - f(x)) / ε.  The stopping
    /// criterion and the iteration budget are those of
    /// [`bisection`][RootFinder::bisection].
    ///
    /// A derivative that vanishes (or is not finite) at an iterate,
    /// as well as a non-finite update, yields [`Error::Degenerate`].
    pub fn newton_raphson(&self, initial_guess: f64) -> Result<Solution, Error> {
        let f = &self.f;
        let mut x0 = initial_guess;
        let mut fx0 = f(x0);
        let mut iterations = 0;
        loop {
            let dfx0 = self.slope(x0, fx0);
            let x1 = x0 - fx0 / dfx0;
            if dfx0 == 0. || !dfx0.is_finite() || !x1.is_finite() {
                return Err(self.degenerate(Method::NewtonRaphson, x0,
                                           iterations))
            }
            iterations += 1;
            let fx1 = f(x1);
            trace!(iterations, x = x1, fx = fx1, dfx = dfx0, "newton step");
            if self.within_tolerance(fx1, x0, x1) {
                return Ok(self.found(Method::NewtonRaphson, x1, iterations))
            }
            if iterations > self.max_iteration {
                return Err(self.exhausted(Method::NewtonRaphson, x1,
                                          iterations))
            }
            x0 = x1;
            fx0 = fx1;
        }
    }

    /// Find a root of the function with the secant method.
    ///
    /// The first two values of `guesses` are the starting points `x0`
    /// and `x1`; missing ones default to `x0 = 0` and `x1 = 1`.
    /// Further values are ignored.
    ///
    /// Unlike the other methods, convergence is judged only on the
    /// step: the method stops when two consecutive estimates are at
    /// most ε apart.  If f takes the same value at both points of a
    /// step (or the step is not finite), [`Error::Degenerate`] is
    /// returned.
    ///
    /// # Example
    ///
    /// ```
    /// # fn main() -> Result<(), rootfinder::Error> {
    /// use rootfinder::RootFinder;
    /// let finder = RootFinder::new(5, 100, |x: f64| x * x * x - 2. * x - 5.);
    /// assert!((finder.secant(&[2., 3.])?.root - 2.09455).abs() <= 1e-5);
    /// # Ok(()) }
    /// ```
    pub fn secant(&self, guesses: &[f64]) -> Result<Solution, Error> {
        let f = &self.f;
        let (mut x0, mut x1) = match guesses {
            [] => (0., 1.),
            [x0] => (*x0, 1.),
            [x0, x1, rest @ ..] => {
                if !rest.is_empty() {
                    warn!(ignored = rest.len(),
                          "secant uses only two initial guesses");
                }
                (*x0, *x1)
            }
        };
        let mut fx0 = f(x0);
        let mut fx1 = f(x1);
        let mut iterations = 0;
        loop {
            let x2 = (x0 * fx1 - x1 * fx0) / (fx1 - fx0);
            if fx1 == fx0 || !x2.is_finite() {
                return Err(self.degenerate(Method::Secant, x1, iterations))
            }
            iterations += 1;
            x0 = x1;
            fx0 = fx1;
            x1 = x2;
            fx1 = f(x1);
            trace!(iterations, x = x1, fx = fx1, "secant step");
            if (x1 - x0).abs() <= self.epsilon {
                return Ok(self.found(Method::Secant, x1, iterations))
            }
            if iterations > self.max_iteration {
                return Err(self.exhausted(Method::Secant, x1, iterations))
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////
//
// Builder

/// Step by step construction of a [`RootFinder`].
///
/// ```
/// use rootfinder::Builder;
/// let finder = Builder::new()
///     .function(|x: f64| x * x - 2.)
///     .derivative(|x: f64| 2. * x)
///     .precision(8)
///     .build();
/// assert_eq!(finder.epsilon(), 1e-8);
/// assert!(finder.has_derivative());
/// ```
///
/// The function is mandatory: [`Builder::build`] panics if it was not
/// set.
#[derive(Clone)]
pub struct Builder<F, D> {
    function: Option<F>,
    derivative: Option<D>,
    options: Options,
}

impl Builder<fn(f64) -> f64, fn(f64) -> f64> {
    pub fn new() -> Self {
        Builder { function: None, derivative: None, options: Options::new() }
    }
}

impl Default for Builder<fn(f64) -> f64, fn(f64) -> f64> {
    fn default() -> Self { Self::new() }
}

impl<F, D> Builder<F, D> {
    /// Set the function whose root is sought.
    pub fn function<G>(self, f: G) -> Builder<G, D>
    where G: Fn(f64) -> f64 {
        Builder {
            function: Some(f),
            derivative: self.derivative,
            options: self.options,
        }
    }

    /// Set the derivative of the function.
    pub fn derivative<E>(self, df: E) -> Builder<F, E>
    where E: Fn(f64) -> f64 {
        Builder {
            function: self.function,
            derivative: Some(df),
            options: self.options,
        }
    }

    /// See [`Options::precision`].
    pub fn precision(mut self, p: i32) -> Self {
        self.options = self.options.precision(p);
        self
    }

    /// See [`Options::max_iteration`].
    pub fn max_iteration(mut self, n: i32) -> Self {
        self.options = self.options.max_iteration(n);
        self
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Return the configured finder.
    ///
    /// # Panics
    ///
    /// If no function was given with [`Builder::function`].
    pub fn build(self) -> RootFinder<F, D>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let f = match self.function {
            Some(f) => f,
            None => panic!("function is required"),
        };
        RootFinder {
            f,
            df: self.derivative,
            precision: self.options.decimals(),
            epsilon: self.options.epsilon(),
            max_iteration: self.options.iteration_budget(),
        }
    }
}

////////////////////////////////////////////////////////////////////////
//
// Tests

#[cfg(test)]
macro_rules! assert_approx_eq {
    ($a: expr, $b: expr, $err: expr) => {
        let a = $a;
        let b = $b;
        if ! ((a - b).abs() <= $err) {
            panic!("|left - right| ≤ {:e}\n  left: {}\n right: {}",
                   $err, a, b);
        }
    }
}
