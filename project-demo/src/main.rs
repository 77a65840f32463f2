use log::info;
use rand::{rngs::StdRng, SeedableRng};

use vm::{compare, generate_reference_string, Policy, ReferencePattern, SimulationConfig, Simulator};

fn format_frames(frames: &[Option<usize>]) -> String {
    frames
        .iter()
        .map(|slot| match slot {
            Some(page) => format!("{:>2}", page),
            None => " -".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn replay(config: SimulationConfig) -> vm::Result<()> {
    let mut simulator = Simulator::new(config)?;

    println!("== {} ==", simulator.config().policy);

    simulator.run_while(|entry| {
        println!(
            "step {:>2}  page {:>2}  {}  [{}]",
            entry.step,
            entry.page,
            if entry.fault { "fault" } else { "hit  " },
            format_frames(&entry.frames)
        );
        true
    })?;

    println!("{}\n", simulator.statistics());

    Ok(())
}

fn main() -> vm::Result<()> {
    env_logger::init();

    let config = SimulationConfig::default().with_seed(0);

    for policy in Policy::ALL {
        replay(config.clone().with_policy(policy))?;
    }

    let mut rng = StdRng::seed_from_u64(2024);

    for pattern in ReferencePattern::ALL {
        let reference = generate_reference_string(100, 16, pattern, &mut rng)?;
        let comparison = compare(&reference, 4)?;

        info!("demo: compared policies over a {} workload", pattern);

        let row = comparison
            .iter()
            .map(|(policy, faults)| format!("{}={}", policy, faults))
            .collect::<Vec<_>>()
            .join(" ");

        println!("{:<10} {}", pattern, row);
    }

    Ok(())
}
