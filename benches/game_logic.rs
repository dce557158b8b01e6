use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::pieces::try_rotate;
use blockfall::core::{Board, GameSnapshot, GameState};
use blockfall::engine::Engine;
use blockfall::types::{GameAction, InputSnapshot, PieceKind, Rotation, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.restart();
            }
            state.tick(black_box(TICK_MS));
        })
    });
}

fn bench_engine_step(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    let input = InputSnapshot {
        left_held: true,
        soft_held: true,
        ..InputSnapshot::default()
    };

    c.bench_function("engine_step_held_input", |b| {
        b.iter(|| {
            if engine.state().game_over() {
                engine.restart();
            }
            engine.step(TICK_MS, black_box(&input));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let filled = Board::from_rows(&["##########"; 4]);

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = filled.clone();
            board.clear_full_rows();
            black_box(board);
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.game_over() {
                state.restart();
            }
            state.apply_action(GameAction::HardDrop);
            state.tick(black_box(100));
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::from_rows(&["#.........", "..........", "#.#......."]);

    c.bench_function("try_rotate_with_kicks", |b| {
        b.iter(|| {
            try_rotate(
                black_box(PieceKind::T),
                Rotation::North,
                1,
                17,
                true,
                |x, y| board.is_open(x, y),
            )
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut snapshot = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snapshot);
            black_box(&snapshot);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_engine_step,
    bench_line_clear,
    bench_hard_drop,
    bench_try_rotate,
    bench_snapshot
);
criterion_main!(benches);
