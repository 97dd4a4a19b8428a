use chessrules::{attack, legal, Board, CastlingRights, Color, Coord, GameState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const BOARDS: [(&str, &str); 7] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR",
    ),
    (
        "sicilian",
        "r.b.k..r/..qnbppp/p..ppn../.p....B./...NPPP./..N..Q../PPP....P/..KR.B.R",
    ),
    (
        "middle",
        ".rq.r.k./.p...ppp/pB...n../...ppP../Pbb.P.../.PN..B../..P..QPP/R.R....K",
    ),
    (
        "open_position",
        "....r.k./...R.ppp/......../.....P../p......./......PP/....pK../.rN.B...",
    ),
    ("queen", "......K./......../......../.k...q../...Q..../......../......../........"),
    (
        "pawn_attack",
        "....k.../......../......../pppppppp/PPPPPPPP/......../......../....K...",
    ),
    (
        "cydonia",
        ".....K../.N.N.N../......../.N.N.N../.n.n.n../......../.n.n.n../.....k..",
    ),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, diagram)| (name, Board::from_diagram(diagram).unwrap()))
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for coord in Coord::iter() {
                        black_box(attack::is_cell_attacked(&board, coord, color));
                    }
                }
            })
        });
    }
}

fn bench_king_attack(c: &mut Criterion) {
    let mut group = c.benchmark_group("king_attack");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(legal::is_check(&board, Color::White).unwrap()))
        });
    }
}

fn bench_has_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_legal_moves");
    for (name, mut board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(legal::has_legal_moves(&mut board, Color::White).unwrap()))
        });
    }
}

fn bench_legal_destinations(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_destinations");
    for (name, mut board) in boards() {
        let pieces = board.color(Color::White);
        group.bench_function(name, |b| {
            b.iter(|| {
                for src in pieces {
                    black_box(
                        legal::legal_destinations(&mut board, CastlingRights::FRESH, src)
                            .unwrap(),
                    );
                }
            })
        });
    }
}

fn bench_attempt_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("attempt_move");
    for (name, board) in boards() {
        let game = GameState::from_position(
            board,
            Color::White,
            CastlingRights::FRESH,
            Default::default(),
        )
        .unwrap();
        let moves: Vec<(Coord, Coord)> = game
            .selectable_pieces(Color::White)
            .into_iter()
            .flat_map(|src| {
                let dsts = game.legal_destinations(src).unwrap();
                dsts.into_iter().map(move |dst| (src, dst))
            })
            .collect();
        group.bench_function(name, |b| {
            b.iter(|| {
                for &(src, dst) in &moves {
                    let mut game = game.clone();
                    black_box(game.attempt_move(src, dst).unwrap());
                }
            })
        });
    }
}

criterion_group!(
    chess,
    bench_is_attacked,
    bench_king_attack,
    bench_has_legal_moves,
    bench_legal_destinations,
    bench_attempt_move,
);

criterion_main!(chess);
