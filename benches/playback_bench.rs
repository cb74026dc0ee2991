use criterion::{criterion_group, criterion_main, Criterion, black_box};
use mate_replay::board::CozyRules;
use mate_replay::scenario::builtin_scenarios;
use mate_replay::timer::TimerQueue;
use mate_replay::Playback;

fn bench_scholars_replay(c: &mut Criterion) {
    let scenario = builtin_scenarios().into_iter().next().expect("builtin scenario");
    let moves = scenario.parse_moves().expect("builtin moves parse");
    c.bench_function("replay_scholars_mate", |ben| {
        ben.iter(|| {
            let mut p = Playback::new(CozyRules, TimerQueue::new());
            p.load(moves.clone(), None).unwrap();
            for _ in 0..moves.len() { black_box(p.step().unwrap()); }
            black_box(p.cursor())
        })
    });
}

criterion_group!(benches, bench_scholars_replay);
criterion_main!(benches);
