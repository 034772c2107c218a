use std::env;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use iris_mlp::{Dataset, MlpConfig, Network};

const SEED: u64 = 42;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <data.csv>", args[0]);
        process::exit(1);
    }

    if let Err(err) = run(&args[1]) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(path: &str) -> iris_mlp::Result<()> {
    let cfg = MlpConfig::default();
    cfg.validate()?;

    let mut data = Dataset::from_csv(path, cfg.input_dim)?;
    data.normalize()?;

    let mut rng = StdRng::seed_from_u64(SEED);
    let (train, test) = data.split_with_rng(cfg.test_fraction, &mut rng)?;
    println!(
        "loaded {} samples ({} train / {} test), {} classes",
        data.len(),
        train.len(),
        test.len(),
        data.n_classes()
    );

    let mut network = Network::from_config(&cfg, &mut rng)?;
    let report = network.fit(&train, cfg.epochs)?;
    println!(
        "trained {} epochs: loss {:.4} -> {:.4}",
        cfg.epochs, report.epoch_losses[0], report.final_loss
    );

    let eval = network.evaluate(&test)?;
    println!(
        "test accuracy {:.3}, test mse {:.4}",
        eval.accuracy, eval.mse
    );

    Ok(())
}
