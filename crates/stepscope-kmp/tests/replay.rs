//! Scrubbing through string-matching traces with the replay cursor.

use stepscope_core::Replay;
use stepscope_kmp::search::{search, SearchStep};

#[test]
fn jump_between_matches_and_back() {
    let t = search("AAAA", "AA");
    let mut r = Replay::new(&t);

    let starts: Vec<usize> = std::iter::from_fn(|| {
        r.next_where(|k| matches!(k, SearchStep::Found { .. }))
            .map(|f| *f.state.matches.last().unwrap_or(&usize::MAX))
    })
    .collect();
    assert_eq!(starts, vec![0, 1, 2]);

    // Back from the last hit, the previous one only knows two matches.
    let f = r
        .prev_where(|k| matches!(k, SearchStep::Found { .. }))
        .unwrap();
    assert_eq!(f.state.matches, vec![0, 1]);
}

#[test]
fn any_frame_renders_without_its_neighbours() {
    let t = search("ABABDABABCABAB", "ABABC");
    let frames: Vec<_> = t.iter().cloned().collect();
    let mut r = Replay::new(&t);
    for idx in (0..t.len()).rev() {
        assert_eq!(r.seek(idx).unwrap(), &frames[idx]);
    }
    assert!(r.seek(t.len()).is_err());
}

#[test]
fn cursor_positions_match_step_kinds() {
    let t = search("ABC", "BC");
    for f in &t {
        match f.kind {
            SearchStep::Compare { i, j, .. } => {
                assert_eq!(f.state.i, i);
                assert_eq!(f.state.j, j as isize);
            }
            SearchStep::Advance { i, j } => {
                assert_eq!(f.state.i, i);
                assert_eq!(f.state.j, j as isize);
            }
            SearchStep::Fallback { to, .. } => assert_eq!(f.state.j, to),
            SearchStep::Init | SearchStep::Found { .. } => {}
        }
    }
}
