//! `devicepulse scan` — one-shot device and sampler inspection.

use std::sync::Arc;

use devicepulse_core::{ActivityLiveness, Liveness, Sampler, StatusProbes, default_samplers};

pub fn run(package: &str, serial: Option<&str>, adb: &str) {
    let channel = super::make_channel(adb, serial);
    let liveness = ActivityLiveness::new(Arc::clone(&channel), package);
    let probes = StatusProbes::new(Arc::clone(&channel), package);

    println!("Package:  {package}");
    if let Some(serial) = serial {
        println!("Device:   {serial}");
    }
    println!(
        "Alive:    {}",
        if liveness.is_alive() { "yes" } else { "no" }
    );

    let status = probes.snapshot();
    println!(
        "Status:   camera={} screen_capture={} foreground={} display_on={}",
        status.camera, status.screen_capture, status.foreground, status.display_on
    );
    println!();

    println!("Samplers:");
    for (name, built) in default_samplers(channel.as_ref(), package) {
        match built {
            Ok(sampler) => {
                println!("  \u{2705} {:<12} {}", name, sampler.header().join(", "));
            }
            Err(err) => {
                println!("  \u{274C} {name:<12} unavailable: {err}");
            }
        }
    }
}
