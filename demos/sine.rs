use std::f64::consts::PI;

use digit_net::Network;
use rand::Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut network = Network::new(1, 20, 1)?;
    let mut rng = rand::thread_rng();
    let steps = 1_000_000;

    for step in 0..steps {
        let x = PI * rng.gen::<f64>();
        network.train(&[x], &[x.sin()], 0.7, 1e-6)?;
        if step % 100_000 == 0 {
            let y = network.infer(&[PI / 2.0])?[0];
            println!("Step {step}: f(pi/2) = {y:.4}");
        }
    }

    println!("   sin(x) :    net");
    for i in 0..20 {
        let x = PI * i as f64 / 20.0;
        println!("{:.6} : {:.6}", x.sin(), network.infer(&[x])?[0]);
    }
    Ok(())
}
