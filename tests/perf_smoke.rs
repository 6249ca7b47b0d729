use caseflow_engine::AirflowSimulation;

#[test]
fn perf_smoke_tick() {
    let mut sim = AirflowSimulation::new();
    sim.enable_perf_metrics(true);
    for _ in 0..120 {
        sim.tick(1.0 / 60.0);
    }
    let stats = sim.get_perf_stats();
    assert!(stats.tick_ms() >= 0.0);
    assert!(stats.forces_ms() >= 0.0);
    assert_eq!(stats.live_count(), sim.live_count());
    assert_eq!(stats.capacity(), 8000);
}
