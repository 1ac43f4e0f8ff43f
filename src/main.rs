use gridmdp::*;
use rand::prelude::*;
use std::collections::HashMap;
use std::env;
use tracing::{info, Level};

/// Russell & Norvig's 4x3 world.
const FOUR_BY_THREE: &str = r#"{
    "grid": [
        [-0.04, -0.04, -0.04, 1.0],
        [-0.04, null, -0.04, -1.0],
        [-0.04, -0.04, -0.04, -0.04]
    ],
    "terminals": [[3, 2], [3, 1]],
    "init": [0, 0],
    "gamma": 0.9
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = match env::args().nth(1) {
        Some(path) => GridConfig::from_path(path)?,
        None => GridConfig::from_json(FOUR_BY_THREE)?,
    };
    let mdp = GridMdp::from_config(&config)?;
    mdp.check_consistency()?;
    info!(
        rows = mdp.rows(),
        cols = mdp.cols(),
        n_s = mdp.states().len(),
        "Grid world is consistent."
    );

    println!("Rewards:\n{}\n", format_grid(&mdp.to_grid(mdp.inner().rewards()), "#"));

    let rng = &mut StdRng::seed_from_u64(2718);
    let policy = mdp
        .states()
        .iter()
        .map(|s| (*s, *mdp.actions(s).choose(rng).unwrap_or(&None)))
        .collect::<HashMap<_, _>>();
    println!("Random policy:\n{}\n", format_grid(&mdp.to_arrows(&policy), "#"));

    let ep = episode(&mdp, rng, &policy, 100)?;
    let ret = ep
        .iter()
        .enumerate()
        .map(|(t, e)| mdp.gamma().powi(t as i32) * e.r)
        .sum::<f64>();
    println!(
        "Episode: {:?}",
        ep.iter().map(|e| e.s).collect::<Vec<_>>()
    );
    println!("Discounted return: {ret:.4}");

    Ok(())
}
