use sandworks_engine::Sandbox;

#[test]
fn perf_smoke_step() {
    let mut sandbox = Sandbox::new().unwrap();
    sandbox.init(64, 128);
    for x in 0..128 {
        for y in 0..32 {
            sandbox.paint(x, y, "sand").unwrap();
        }
    }
    let stats = sandbox.step();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.particles_processed(), 128 * 32);
    assert_eq!(sandbox.particle_count(), 128 * 32);
}
