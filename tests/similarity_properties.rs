use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use screenmatch::{is_similar, score, Image, Matcher, MatchError, Metric};

const METRICS: [Metric; 3] = [Metric::pixel_diff(), Metric::Ncc, Metric::DHash];

fn random_rgb(rng: &mut StdRng, width: usize, height: usize) -> Image {
    let mut data = vec![0u8; width * height * 3];
    rng.fill(&mut data[..]);
    Image::rgb(data, width, height).unwrap()
}

fn perturbed(rng: &mut StdRng, img: &Image, amount: u8) -> Image {
    let data = img
        .data()
        .iter()
        .map(|&v| {
            let delta = rng.random_range(0..=amount);
            if rng.random::<bool>() {
                v.saturating_add(delta)
            } else {
                v.saturating_sub(delta)
            }
        })
        .collect();
    Image::new(data, img.width(), img.height(), img.channels()).unwrap()
}

#[test]
fn identical_images_score_one_for_every_metric() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..4 {
        let img = random_rgb(&mut rng, 17, 9);
        for metric in METRICS {
            assert_eq!(score(img.view(), img.view(), &metric).unwrap(), 1.0, "{metric:?}");
        }
    }
}

#[test]
fn uniform_image_is_similar_to_itself() {
    let img = Image::rgb(vec![90u8; 8 * 8 * 3], 8, 8).unwrap();
    for metric in METRICS {
        assert_eq!(score(img.view(), img.view(), &metric).unwrap(), 1.0, "{metric:?}");
    }
}

#[test]
fn scores_are_symmetric_and_bounded() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..8 {
        let a = random_rgb(&mut rng, 12, 10);
        let b = perturbed(&mut rng, &a, 60);
        let c = random_rgb(&mut rng, 12, 10);
        for metric in METRICS {
            for (x, y) in [(&a, &b), (&a, &c), (&b, &c)] {
                let forward = score(x.view(), y.view(), &metric).unwrap();
                let backward = score(y.view(), x.view(), &metric).unwrap();
                assert_eq!(forward, backward, "{metric:?}");
                assert!((0.0..=1.0).contains(&forward), "{metric:?} {forward}");
            }
        }
    }
}

#[test]
fn similarity_is_monotone_in_threshold() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = random_rgb(&mut rng, 16, 16);
    let b = perturbed(&mut rng, &a, 20);
    let thresholds: Vec<f32> = (0..=20).map(|i| i as f32 / 20.0).collect();
    for metric in METRICS {
        let verdicts: Vec<bool> = thresholds
            .iter()
            .map(|&t| is_similar(a.view(), b.view(), t, &metric).unwrap())
            .collect();
        // Once false, stays false as the threshold rises.
        let first_false = verdicts.iter().position(|v| !v).unwrap_or(verdicts.len());
        assert!(verdicts[first_false..].iter().all(|v| !v), "{metric:?}");
        assert!(verdicts[0], "{metric:?}");
    }
}

#[test]
fn mismatched_dimensions_are_rejected_not_scored() {
    let a = Image::rgb(vec![0u8; 4 * 4 * 3], 4, 4).unwrap();
    let b = Image::rgb(vec![0u8; 4 * 5 * 3], 4, 5).unwrap();
    for metric in METRICS {
        let err = score(a.view(), b.view(), &metric).unwrap_err();
        assert_eq!(
            err,
            MatchError::DimensionMismatch {
                left_width: 4,
                left_height: 4,
                right_width: 4,
                right_height: 5,
            }
        );
    }
    let matcher = Matcher::default();
    assert!(matcher.similar_image(a.view(), b.view(), 0.5).is_err());
}

#[test]
fn threshold_outside_unit_interval_is_rejected() {
    let a = Image::gray(vec![1u8; 4], 2, 2).unwrap();
    let metric = Metric::default();
    assert_eq!(
        is_similar(a.view(), a.view(), 1.5, &metric),
        Err(MatchError::InvalidThreshold(1.5))
    );
    assert!(is_similar(a.view(), a.view(), -0.1, &metric).is_err());
}

#[test]
fn byte_identical_screenshots_are_similar() {
    let mut rng = StdRng::seed_from_u64(99);
    let shot = random_rgb(&mut rng, 64, 36);
    let copy = Image::new(shot.data().to_vec(), 64, 36, shot.channels()).unwrap();
    let matcher = Matcher::default();
    assert!(matcher.similar_image(shot.view(), copy.view(), 0.99).unwrap());
}

#[test]
fn maximally_different_images_are_not_similar() {
    let black = Image::rgb(vec![0u8; 32 * 20 * 3], 32, 20).unwrap();
    let white = Image::rgb(vec![255u8; 32 * 20 * 3], 32, 20).unwrap();
    for metric in [Metric::pixel_diff(), Metric::Ncc] {
        let matcher = Matcher::new(metric);
        assert!(!matcher.similar_image(black.view(), white.view(), 0.5).unwrap());
        let s = score(black.view(), white.view(), &metric).unwrap();
        assert!(s < 1e-6, "{metric:?} {s}");
    }
}

#[test]
fn small_noise_keeps_pixel_diff_and_ncc_high() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_rgb(&mut rng, 20, 20);
    let b = perturbed(&mut rng, &a, 4);
    assert_eq!(score(a.view(), b.view(), &Metric::pixel_diff()).unwrap(), 1.0);
    assert!(score(a.view(), b.view(), &Metric::Ncc).unwrap() > 0.99);
}
