use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shirabe_core::{FilenameNormalizer, HeuristicGuesser, detect_languages};

fn bench_normalize_and_guess(c: &mut Criterion) {
    let normalizer = FilenameNormalizer::new().unwrap();
    let guesser = HeuristicGuesser::new().unwrap();

    let inputs = vec![
        "@MovieHub [HDHub4u] Inception.2010.1080p.BluRay.x264.mkv",
        "t.me/FreeFlix Jawan.2023.Hindi.Tamil.DUAL.720p.WEB-DL.mkv",
        "[Judas] Golden Kamuy S03E01 (1080p) [HEVC].mkv",
        "Blade_Runner_2049_2017_2160p_WEB-DL_DDP5.1_Atmos.mkv",
        "DA Rips Parasite (2019) Korean 1080p.mp4",
    ];

    c.bench_function("normalize_single", |b| {
        b.iter(|| normalizer.normalize(black_box(inputs[0])));
    });

    c.bench_function("normalize_guess_detect_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let cleaned = normalizer.normalize(black_box(input));
                if let Ok(guess) = guesser.parse(&cleaned) {
                    black_box(detect_languages(input, &guess.languages));
                }
            }
        });
    });
}

criterion_group!(benches, bench_normalize_and_guess);
criterion_main!(benches);
