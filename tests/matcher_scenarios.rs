use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use screenmatch::lowlevel::resize_bilinear;
use screenmatch::{Image, MatchConfig, Matcher, Metric, Region, ScaleRange, Template};

fn random_rgb(rng: &mut StdRng, width: usize, height: usize) -> Image {
    let mut data = vec![0u8; width * height * 3];
    rng.fill(&mut data[..]);
    Image::rgb(data, width, height).unwrap()
}

fn embed(base: &mut Image, patch: &Image, x0: usize, y0: usize) {
    let c = base.channels().count();
    let base_w = base.width();
    let mut data = base.data().to_vec();
    for y in 0..patch.height() {
        let src = patch.view().row(y).unwrap();
        let start = ((y0 + y) * base_w + x0) * c;
        data[start..start + src.len()].copy_from_slice(src);
    }
    *base = Image::new(data, base_w, base.height(), base.channels()).unwrap();
}

#[test]
fn find_best_locates_unmodified_template() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut base = random_rgb(&mut rng, 100, 100);
    let patch = random_rgb(&mut rng, 10, 10);
    embed(&mut base, &patch, 20, 15);
    let template = Template::new("claim_button", patch);

    let best = Matcher::default()
        .find_best(base.view(), &template, 0.95, None)
        .unwrap()
        .expect("template should be found");
    assert_eq!(best.region, Region::new(20, 15, 10, 10));
    assert!(best.score >= 0.95);
    assert_eq!(best.template.as_str(), "claim_button");
    assert_eq!(best.scale, 1.0);
}

#[test]
fn find_all_reports_every_copy_best_first() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut base = random_rgb(&mut rng, 80, 60);
    let patch = random_rgb(&mut rng, 8, 8);
    embed(&mut base, &patch, 50, 10);
    embed(&mut base, &patch, 5, 40);
    let template = Template::new("coin", patch);

    let result = Matcher::default()
        .find_all(base.view(), &template, 0.95, None)
        .unwrap();
    let regions: Vec<Region> = result.candidates.iter().map(|c| c.region).collect();
    assert_eq!(
        regions,
        vec![Region::new(50, 10, 8, 8), Region::new(5, 40, 8, 8)]
    );
    assert_eq!(result.metric, "pixel_diff");
    assert_eq!(result.comparisons, (73 * 53) as u64);
}

#[test]
fn scale_range_finds_enlarged_template() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut base = random_rgb(&mut rng, 100, 100);
    let native = random_rgb(&mut rng, 20, 20);
    let enlarged = resize_bilinear(native.view(), 24, 24).unwrap();
    embed(&mut base, &enlarged, 30, 40);
    let template = Template::new("daily_reward", native);
    let matcher = Matcher::default();

    let range = ScaleRange::new(0.8, 1.3, 0.1).unwrap();
    let result = matcher
        .find_all(base.view(), &template, 0.9, Some(&range))
        .unwrap();
    let best = result.best().expect("scaled template should be found");
    assert!(best.score >= 0.9);
    assert_eq!(best.region, Region::new(30, 40, 24, 24));
    assert!((best.scale - 1.2).abs() < 1e-4);

    assert!(matcher
        .find_best(base.view(), &template, 0.95, None)
        .unwrap()
        .is_none());
    let native_only = matcher.find_all(base.view(), &template, 0.0, None).unwrap();
    let native_best = native_only.best().unwrap();
    assert!(native_best.score < 0.5, "{}", native_best.score);
}

#[test]
fn results_are_deterministic_with_scan_order_ties() {
    let mut rng = StdRng::seed_from_u64(8);
    let base = random_rgb(&mut rng, 40, 30);
    let template = Template::new("t", random_rgb(&mut rng, 6, 6));
    let matcher = Matcher::default();

    let first = matcher.find_all(base.view(), &template, 0.0, None).unwrap();
    let second = matcher.find_all(base.view(), &template, 0.0, None).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.candidates.len(), 35 * 25);

    for pair in first.candidates.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.score >= b.score);
        if a.score == b.score {
            assert!((a.region.y, a.region.x) < (b.region.y, b.region.x));
        }
    }
}

#[test]
fn good_enough_stops_at_first_sufficient_window() {
    let mut rng = StdRng::seed_from_u64(16);
    let mut base = random_rgb(&mut rng, 60, 50);
    let patch = random_rgb(&mut rng, 10, 10);

    // Three of 100 pixels inverted: score 0.97 at (5, 5).
    let mut degraded = patch.data().to_vec();
    for px in [0usize, 33, 77] {
        for v in &mut degraded[px * 3..px * 3 + 3] {
            *v ^= 0x80;
        }
    }
    let degraded = Image::rgb(degraded, 10, 10).unwrap();
    embed(&mut base, &degraded, 5, 5);
    embed(&mut base, &patch, 40, 30);
    let template = Template::new("t", patch);

    let exhaustive = Matcher::default()
        .find_best(base.view(), &template, 0.9, None)
        .unwrap()
        .unwrap();
    assert_eq!(exhaustive.region, Region::new(40, 30, 10, 10));
    assert_eq!(exhaustive.score, 1.0);

    let eager = Matcher::default()
        .with_config(MatchConfig {
            good_enough: Some(0.95),
            ..MatchConfig::default()
        })
        .find_best(base.view(), &template, 0.9, None)
        .unwrap()
        .unwrap();
    assert_eq!(eager.region, Region::new(5, 5, 10, 10));
    assert!((eager.score - 0.97).abs() < 1e-6);
}

#[test]
fn ncc_tolerates_brightness_shift_where_pixel_diff_does_not() {
    let mut rng = StdRng::seed_from_u64(32);
    let mut base = random_rgb(&mut rng, 50, 40);
    let patch_data: Vec<u8> = (0..12 * 12 * 3).map(|_| rng.random_range(0..200u8)).collect();
    let brighter: Vec<u8> = patch_data.iter().map(|v| v + 40).collect();
    let patch = Image::rgb(patch_data, 12, 12).unwrap();
    embed(&mut base, &Image::rgb(brighter, 12, 12).unwrap(), 17, 9);
    let template = Template::new("banner", patch);

    let ncc = Matcher::new(Metric::Ncc)
        .find_best(base.view(), &template, 0.95, None)
        .unwrap()
        .unwrap();
    assert_eq!(ncc.region, Region::new(17, 9, 12, 12));
    assert_eq!(ncc.score, 1.0);

    assert!(Matcher::default()
        .find_best(base.view(), &template, 0.95, None)
        .unwrap()
        .is_none());
}

#[test]
fn gray_templates_match_in_gray_captures() {
    let mut rng = StdRng::seed_from_u64(64);
    let mut data = vec![0u8; 30 * 20];
    rng.fill(&mut data[..]);
    let mut base = Image::gray(data, 30, 20).unwrap();
    let mut patch = vec![0u8; 5 * 4];
    rng.fill(&mut patch[..]);
    let patch = Image::gray(patch, 5, 4).unwrap();
    embed(&mut base, &patch, 25, 16);
    let template = Template::new("corner", patch);

    for metric in [Metric::pixel_diff(), Metric::Ncc] {
        let best = Matcher::new(metric)
            .find_best(base.view(), &template, 0.99, None)
            .unwrap()
            .unwrap();
        assert_eq!(best.region, Region::new(25, 16, 5, 4), "{metric:?}");
    }
}
