use anyhow::{ensure, Result};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::time::Instant;

use cownum_core::prelude::*;

const H_100_NUMER: &str = "14466636279520351160221518043104131447711";
const H_100_DENOM: &str = "2788815009188499086581352357412492142272";

pub fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    timed("factorial of 10000", || {
        let n = Integer::factorial(10_000);
        ensure!(n.to_string().len() == 35_660, "wrong digit count");
        Ok(())
    })?;

    timed("1000 digits of pi", || {
        let (pi, _) = IeeeFloat::pi(3_400, Round::Nearest);
        let digits = pi.to_string_radix(10, 1_000);
        ensure!(
            digits.contains("14159265358979323846264338327950288"),
            "wrong digits: {}",
            &digits[..40],
        );
        Ok(())
    })?;

    timed("harmonic number H(100)", || {
        let h = (1..=100)
            .map(|k| Rational::new(1, k))
            .sum::<cownum_core::Result<Rational>>()?;
        ensure!(h.numer() == H_100_NUMER.parse::<Integer>()?, "wrong numerator");
        ensure!(h.denom() == H_100_DENOM.parse::<Integer>()?, "wrong denominator");
        Ok(())
    })?;

    timed("Monte Carlo estimate of pi", || {
        let samples = 200_000;
        let mut state = RandomState::mersenne_twister();
        state.seed_u64(2024);
        let mut inside = 0_u64;
        for _ in 0..samples {
            let x = state.random_float(64).to_f64();
            let y = state.random_float(64).to_f64();
            if x * x + y * y < 1.0 {
                inside += 1;
            }
        }
        let estimate = Rational::new(4 * inside, samples)?;
        info!("estimate is {}", estimate.to_f64());
        ensure!(
            (estimate.to_f64() - std::f64::consts::PI).abs() < 0.05,
            "estimate too far from pi",
        );
        Ok(())
    })?;

    Ok(())
}

fn timed(name: &str, f: impl FnOnce() -> Result<()>) -> Result<()> {
    info!("Running {} ...", name);
    let start = Instant::now();
    f()?;
    info!("Took {:.3?}", start.elapsed());
    Ok(())
}
