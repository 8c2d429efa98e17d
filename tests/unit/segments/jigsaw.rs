use super::*;

fn fps30() -> Fps {
    Fps::whole(30).unwrap()
}

fn table(n: usize) -> PieceTable {
    PieceTable::new(
        (0..n)
            .map(|i| (format!("piece_{i:02}"), [i as f64 * 100.0, 50.0]))
            .collect(),
    )
}

fn page(n: usize, random_order: bool) -> JigsawPage {
    let config = JigsawConfig {
        random_order,
        text: "Done!".to_owned(),
        ..JigsawConfig::default()
    };
    JigsawPage::with_loader(config, PieceLoader::ready(table(n)))
}

#[test]
fn table_parses_and_rejects_bad_input() {
    let t = PieceTable::from_json(r#"{"b": [10, 20], "a": [1.5, 2.5]}"#).unwrap();
    let ids: Vec<_> = t.iter().map(|(id, _)| id.to_owned()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(PieceTable::from_json(r#"{"a": [1]}"#).is_err());
    assert!(PieceTable::from_json("not json").is_err());
}

#[test]
fn missing_file_is_an_error() {
    let err = PieceTable::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, FamilyError::Other(_)));
}

#[test]
fn puzzle_area_is_seventy_percent_and_centred() {
    let r = puzzle_rect(Canvas::FULL_HD);
    assert!((r.width() - 1344.0).abs() < 1e-9);
    assert!((r.height() - 1344.0 / (1456.0 / 816.0)).abs() < 1e-9);
    assert!((r.center() - Canvas::FULL_HD.center()).hypot() < 1e-9);
}

#[test]
fn layout_is_deterministic_and_staggered() {
    let cfg = JigsawConfig::default();
    let a = JigsawLayout::build(&table(6), &cfg, Canvas::FULL_HD, fps30());
    let b = JigsawLayout::build(&table(6), &cfg, Canvas::FULL_HD, fps30());
    assert_eq!(a, b);
    assert_eq!(a.sequence_frames, 180.0);
    for (i, p) in a.pieces.iter().enumerate() {
        assert_eq!(p.order, i);
        assert_eq!(p.reveal_frame, i as f64 * 180.0);
        let off = p.start.x <= -200.0
            || p.start.x >= 1920.0 + 200.0
            || p.start.y <= -200.0
            || p.start.y >= 1080.0 + 200.0;
        assert!(off, "{} starts on screen at {:?}", p.id, p.start);
    }
    let mut ids: Vec<_> = a.pieces.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    assert_eq!(ids.len(), 6);
    ids.dedup();
    assert_eq!(ids.len(), 6);
}

#[test]
fn ordered_layout_follows_ids() {
    let cfg = JigsawConfig {
        random_order: false,
        ..JigsawConfig::default()
    };
    let l = JigsawLayout::build(&table(4), &cfg, Canvas::FULL_HD, fps30());
    let ids: Vec<_> = l.pieces.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["piece_00", "piece_01", "piece_02", "piece_03"]);
    let scale = 1344.0 / 1456.0;
    assert!((l.pieces[1].target.x - (288.0 + 100.0 * scale)).abs() < 1e-9);
}

#[test]
fn piece_flies_pauses_and_springs_home() {
    let cfg = JigsawConfig::default();
    let l = JigsawLayout::build(&table(2), &cfg, Canvas::FULL_HD, fps30());
    let piece = &l.pieces[1];
    let pose = |t: f64| piece_pose(piece, &cfg, Canvas::FULL_HD, fps30(), t);
    let r = piece.reveal_frame;

    assert!(pose(r - 1.0).is_none());
    let start = pose(r).unwrap();
    assert_eq!(start.position, piece.start);
    assert_eq!(start.rotation_deg, 180.0);
    assert_eq!(start.scale_x, -1.0);

    let mid = pose(r + 30.0).unwrap();
    assert_eq!(mid.rotation_deg, 90.0);
    assert_eq!(mid.scale_x, 0.0);

    let center = Canvas::FULL_HD.center();
    assert_eq!(pose(r + 60.0).unwrap().position, center);
    assert_eq!(pose(r + 119.0).unwrap().position, center);

    let settled = pose(r + 10_000.0).unwrap();
    assert!((settled.position - piece.target).hypot() < 1e-6);
}

#[test]
fn pending_table_renders_no_pieces() {
    let (_tx, rx) = std::sync::mpsc::channel();
    let loader = PieceLoader {
        state: PieceLoad::Pending(rx),
    };
    assert!(loader.is_pending());
    let page = JigsawPage::with_loader(JigsawConfig::default(), loader);
    let ops = page.render(&FrameCtx::new(0, 100, fps30()));
    assert_eq!(ops.len(), 2);
    assert!(ops.iter().all(|o| !o.source().unwrap_or("").starts_with("jigsaw/piece_0")));
}

#[test]
fn loader_thread_delivers_table_once() {
    let dir = std::env::temp_dir().join(format!("finger-family-jigsaw-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("jigsaw")).unwrap();
    std::fs::write(
        dir.join("jigsaw/piece_data.json"),
        r#"{"p1": [0, 0], "p2": [10, 10]}"#,
    )
    .unwrap();

    let page = JigsawPage::new(JigsawConfig::default(), &dir);
    assert!(page.wait_loaded());
    let layout = page.layout(Canvas::FULL_HD, fps30()).unwrap();
    assert_eq!(layout.pieces.len(), 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_load_stays_empty() {
    let page = JigsawPage::new(JigsawConfig::default(), Path::new("/nonexistent-asset-root"));
    assert!(!page.wait_loaded());
    assert_eq!(page.render(&FrameCtx::new(10, 100, fps30())).len(), 2);
}

#[test]
fn layout_is_memoised_until_inputs_change() {
    let p = page(3, true);
    let a = p.layout(Canvas::FULL_HD, fps30()).unwrap();
    let b = p.layout(Canvas::FULL_HD, fps30()).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    let c = p.layout(Canvas { width: 1280, height: 720 }, fps30()).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_ne!(a.key, c.key);
}

#[test]
fn pieces_accumulate_and_caption_fades_in() {
    let p = page(2, false);
    let count = |f: u64| {
        p.render(&FrameCtx::new(f, 420, fps30()))
            .iter()
            .filter(|o| o.source().is_some_and(|s| s.starts_with("jigsaw/piece_0")))
            .count()
    };
    assert_eq!(count(0), 1);
    assert_eq!(count(179), 1);
    assert_eq!(count(180), 2);
    assert_eq!(count(400), 2);

    let caption_opacity = |f: u64| {
        p.render(&FrameCtx::new(f, 420, fps30()))
            .iter()
            .find_map(|o| match o {
                DrawOp::Text { text, opacity, .. } if text == "Done!" => Some(*opacity),
                _ => None,
            })
            .unwrap()
    };
    assert_eq!(caption_opacity(360 + 30), 0.0);
    assert_eq!(caption_opacity(360 + 45), 0.5);
    assert_eq!(caption_opacity(360 + 60), 1.0);
}

#[test]
fn duration_counts_pieces_and_tail() {
    let cfg = JigsawConfig::default();
    assert_eq!(cfg.duration_frames(5, fps30()), 5 * 180 + 60);
    assert_eq!(cfg.duration_frames(0, fps30()), 60);
}
