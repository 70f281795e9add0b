//! Chain behaviour observed through recording collaborators.

use std::collections::HashMap;

use snake_chain::core::{
    ConsumeOutcome, Playfield, RoundKeeper, RoundStatus, RunStatus, ScoreBoard, SegmentRenderer,
    SnakeConfig, SnakeRun,
};
use snake_chain::types::{ColorId, Direction, DirectionKey, InputEvent, Position, TICK_MS};

const A: ColorId = ColorId::ALL[0];
const B: ColorId = ColorId::ALL[1];
const C: ColorId = ColorId::ALL[2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Visual {
    position: Position,
    color: ColorId,
    visible: bool,
}

/// Tracks every handle it hands out.
#[derive(Debug, Default)]
struct RecordingRenderer {
    next: u32,
    live: HashMap<u32, Visual>,
    released: Vec<u32>,
    head: Position,
}

impl SegmentRenderer for RecordingRenderer {
    type Handle = u32;

    fn place_segment(&mut self, position: Position, color: ColorId) -> u32 {
        let id = self.next;
        self.next += 1;
        self.live.insert(
            id,
            Visual {
                position,
                color,
                visible: false,
            },
        );
        id
    }

    fn release_segment(&mut self, handle: u32) {
        assert!(self.live.remove(&handle).is_some(), "double release of {handle}");
        self.released.push(handle);
    }

    fn reveal_segment(&mut self, handle: &u32) {
        if let Some(v) = self.live.get_mut(handle) {
            v.visible = true;
        }
    }

    fn reposition_segment(&mut self, handle: &u32, position: Position) {
        if let Some(v) = self.live.get_mut(handle) {
            v.position = position;
        }
    }

    fn set_head(&mut self, position: Position, _angle: u16) {
        self.head = position;
    }
}

#[derive(Debug)]
struct RecordingKeeper {
    multiplier: u32,
    scores: Vec<(u64, u32)>,
    cleared: Vec<(ColorId, usize)>,
    deaths: u32,
    queries: u32,
}

impl Default for RecordingKeeper {
    fn default() -> Self {
        Self {
            multiplier: 1,
            scores: Vec::new(),
            cleared: Vec::new(),
            deaths: 0,
            queries: 0,
        }
    }
}

impl RoundKeeper for RecordingKeeper {
    fn multiplier(&self) -> u32 {
        self.multiplier
    }

    fn report_score(&mut self, delta: u64, new_multiplier: u32) {
        self.scores.push((delta, new_multiplier));
        self.multiplier = new_multiplier;
    }

    fn report_group_cleared(&mut self, color: ColorId, count: usize) {
        self.cleared.push((color, count));
    }

    fn report_death(&mut self) {
        self.deaths += 1;
    }

    fn query_round_state(&mut self) -> RoundStatus {
        self.queries += 1;
        RoundStatus::Continue
    }
}

type Run = SnakeRun<RecordingRenderer, RecordingKeeper>;

fn run_at(start: Position) -> Run {
    let config = SnakeConfig {
        start,
        ..SnakeConfig::default()
    };
    SnakeRun::new(config, RecordingRenderer::default(), RecordingKeeper::default())
}

fn key(k: DirectionKey) -> InputEvent {
    InputEvent::Key(k)
}

fn tick(run: &mut Run) {
    assert_eq!(run.advance(TICK_MS), 1, "expected exactly one tick");
}

/// Head-up run that ate `colors` tail-first, one per tick, no matches expected.
fn grown(colors_head_to_tail: &[ColorId]) -> Run {
    let mut run = run_at(Position::new(0, -210));
    run.handle_input(key(DirectionKey::W));
    for &c in colors_head_to_tail.iter().rev() {
        assert_eq!(run.on_consume(c), ConsumeOutcome::Grace);
        tick(&mut run);
    }
    run
}

fn colors(run: &Run) -> Vec<ColorId> {
    run.chain().colors().collect()
}

fn positions(run: &Run) -> Vec<Position> {
    run.chain().positions().collect()
}

/// Every visible segment is one tile from its predecessor, starting at the head.
fn assert_contiguous(run: &Run) {
    let tile = run.config().tile_size;
    let mut prev = run.head();
    for seg in run.chain().segments().iter().filter(|s| s.is_visible()) {
        let d = seg.position() - prev;
        assert_eq!(
            d.x.abs() + d.y.abs(),
            tile,
            "gap between {prev:?} and {:?}",
            seg.position()
        );
        prev = seg.position();
    }
}

#[test]
fn chain_stays_contiguous_through_turns_and_growth() {
    let mut run = run_at(Position::ORIGIN);
    let path = [
        (DirectionKey::W, 3),
        (DirectionKey::D, 3),
        (DirectionKey::S, 5),
        (DirectionKey::A, 4),
    ];
    let feed = [A, B, C, A, B, C];
    let mut fed = 0;

    for (k, steps) in path {
        assert!(run.handle_input(key(k)).is_some());
        for _ in 0..steps {
            if fed < feed.len() {
                run.on_consume(feed[fed]);
                fed += 1;
            }
            tick(&mut run);
            assert_contiguous(&run);
            assert!(run.chain().segments().iter().all(|s| s.is_visible()));
        }
    }

    assert_eq!(run.chain().len(), feed.len());
    // Renderer agrees with the chain.
    for seg in run.chain().segments() {
        let v = run.renderer().live[seg.visual()];
        assert_eq!(v.position, seg.position());
        assert_eq!(v.color, seg.color());
        assert!(v.visible);
    }
}

#[test]
fn accepted_directions_alternate_axes() {
    let mut run = run_at(Position::ORIGIN);
    let inputs = [
        DirectionKey::D,
        DirectionKey::A,
        DirectionKey::ArrowUp,
        DirectionKey::S,
        DirectionKey::ArrowDown,
        DirectionKey::ArrowLeft,
        DirectionKey::D,
        DirectionKey::W,
    ];
    let accepted: Vec<Direction> = inputs
        .iter()
        .filter_map(|&k| run.handle_input(key(k)))
        .collect();

    assert_eq!(
        accepted,
        vec![Direction::Right, Direction::Up, Direction::Left, Direction::Up]
    );
    for pair in accepted.windows(2) {
        assert_ne!(pair[0].axis(), pair[1].axis());
        assert_ne!(pair[1], pair[0].opposite());
    }
}

#[test]
fn match_removes_exactly_three_and_closes_the_gap() {
    let mut run = grown(&[A, A, B]);
    let trail = positions(&run);
    let b_handle = *run.chain().segments()[2].visual();
    let placed_before = run.renderer().next;

    let outcome = run.on_consume(A);
    let ConsumeOutcome::Matched(group) = outcome else {
        panic!("expected a match, got {outcome:?}");
    };
    assert_eq!(group.color, A);

    let r = run.renderer();
    assert_eq!(r.next, placed_before + 1);
    assert_eq!(r.released.len(), 3);
    assert!(!r.released.contains(&b_handle));

    assert_eq!(colors(&run), vec![B]);
    assert_eq!(*run.chain().segments()[0].visual(), b_handle);
    assert_eq!(positions(&run), vec![trail[0]]);
    assert_eq!(r.live[&b_handle].position, trail[0]);
    assert_contiguous(&run);

    assert_eq!(run.keeper().scores, vec![(1600, 2)]);
    assert_eq!(run.keeper().cleared, vec![(A, 3)]);
}

#[test]
fn no_match_when_fewer_than_three() {
    let mut run = grown(&[A]);
    assert_eq!(run.on_consume(A), ConsumeOutcome::Grace);
    assert!(run.renderer().released.is_empty());
    assert!(run.keeper().scores.is_empty());
    assert!(run.chain().grace_pending());
}

#[test]
fn bomb_removes_every_segment_of_the_head_color() {
    let mut run = grown(&[A, B, A, A, C]);
    let trail = positions(&run);

    assert_eq!(run.on_bomb_trigger(), 3);

    assert_eq!(colors(&run), vec![B, C]);
    assert_eq!(positions(&run), trail[..2].to_vec());
    assert_contiguous(&run);
    assert_eq!(run.renderer().released.len(), 3);
    assert_eq!(run.renderer().live.len(), 2);
    assert_eq!(run.keeper().scores, vec![(900, 1)]);
    assert_eq!(run.keeper().cleared, vec![(A, 3)]);
}

#[test]
fn removals_after_a_plain_tick_land_on_the_moved_trail() {
    let mut run = grown(&[A, B, A, A, C]);
    tick(&mut run);
    assert!(!run.chain().grace_pending());
    let head = run.head();
    let trail = positions(&run);
    assert_eq!(trail[0], head - Position::new(0, 30));

    assert_eq!(run.on_bomb_trigger(), 3);
    assert_eq!(colors(&run), vec![B, C]);
    assert_eq!(positions(&run), trail[..2].to_vec());
    assert_contiguous(&run);

    // [B, B, C] after the grace tick, then one plain tick before the match.
    assert_eq!(run.on_consume(B), ConsumeOutcome::Grace);
    tick(&mut run);
    tick(&mut run);
    assert_eq!(colors(&run), vec![B, B, C]);
    let trail = positions(&run);

    assert!(matches!(run.on_consume(B), ConsumeOutcome::Matched(_)));
    assert_eq!(colors(&run), vec![C]);
    assert_eq!(positions(&run), vec![trail[0]]);
    assert_eq!(trail[0], run.head() - Position::new(0, 30));
    assert_contiguous(&run);

    let r = run.renderer();
    assert_eq!(r.live.len(), 1);
    let c_handle = run.chain().segments()[0].visual();
    assert_eq!(r.live[c_handle].position, trail[0]);
    assert!(r.live[c_handle].visible);
}

#[test]
fn bomb_on_empty_chain_does_nothing() {
    let mut run = run_at(Position::ORIGIN);
    assert_eq!(run.on_bomb_trigger(), 0);
    assert!(run.keeper().scores.is_empty());
}

#[test]
fn leaving_the_playfield_releases_everything_once() {
    let mut run = run_at(Position::new(1, 0));
    run.handle_input(key(DirectionKey::D));
    tick(&mut run);
    for c in [A, B, C] {
        run.on_consume(c);
        tick(&mut run);
    }
    assert_eq!(run.head(), Position::new(121, 0));
    assert_eq!(run.chain().len(), 3);
    assert!(run.is_alive());

    tick(&mut run);
    assert_eq!(run.head(), Position::new(151, 0));
    assert_eq!(run.renderer().head, run.head());
    assert!(!Playfield::DEFAULT.contains(run.head()));
    assert_eq!(run.status(), RunStatus::Dead);
    assert!(run.chain().is_empty());
    assert_eq!(run.renderer().released.len(), 3);
    assert!(run.renderer().live.is_empty());
    assert_eq!(run.keeper().deaths, 1);

    let queries = run.keeper().queries;
    assert_eq!(run.advance(TICK_MS * 10), 0);
    assert_eq!(run.head(), Position::new(151, 0));
    assert_eq!(run.keeper().deaths, 1);
    assert_eq!(run.keeper().queries, queries);
    assert!(run.time_until_next_tick_ms().is_none());
}

#[test]
fn spawned_segment_waits_one_tick() {
    let mut run = grown(&[B]);
    let head = run.head();
    let old = positions(&run);

    run.on_consume(A);
    let fresh = run.chain().segments()[0].position();
    assert_eq!(fresh, head);
    assert!(!run.chain().segments()[0].is_visible());

    // Grace tick: the newcomer appears where it spawned, the rest holds.
    tick(&mut run);
    assert!(run.chain().segments()[0].is_visible());
    assert_eq!(positions(&run)[0], fresh);
    assert_eq!(positions(&run)[1..].to_vec(), old);
    assert_contiguous(&run);

    // Next tick everything follows.
    let before = run.head();
    tick(&mut run);
    assert_eq!(positions(&run)[0], before);
    assert_eq!(positions(&run)[1], fresh);
}

#[test]
fn score_board_doubles_on_match_and_scales_bombs() {
    let mut run = SnakeRun::new(SnakeConfig::default(), RecordingRenderer::default(), ScoreBoard::new());
    run.handle_input(key(DirectionKey::W));

    fn eat(run: &mut SnakeRun<RecordingRenderer, ScoreBoard>, c: ColorId) -> ConsumeOutcome {
        let outcome = run.on_consume(c);
        assert_eq!(run.advance(TICK_MS), 1);
        outcome
    }

    eat(&mut run, A);
    eat(&mut run, A);
    assert!(matches!(eat(&mut run, A), ConsumeOutcome::Matched(_)));
    assert_eq!(run.keeper().points(), 1600);
    assert_eq!(run.keeper().multiplier_value(), 2);

    run.handle_input(key(DirectionKey::D));
    eat(&mut run, C);
    eat(&mut run, C);
    assert!(matches!(eat(&mut run, C), ConsumeOutcome::Matched(_)));
    assert_eq!(run.keeper().points(), 1600 + 3200);
    assert_eq!(run.keeper().multiplier_value(), 4);

    eat(&mut run, B);
    eat(&mut run, B);
    assert_eq!(run.on_bomb_trigger(), 2);
    assert_eq!(run.keeper().points(), 4800 + 300 * 2 * 4);
    assert_eq!(run.keeper().multiplier_value(), 4);
    assert_eq!(run.keeper().cleared()[C.index() as usize], 3);
    assert_eq!(run.keeper().cleared()[B.index() as usize], 2);
    assert!(run.is_alive());
}
