mod common;

use std::path::{Path, PathBuf};

use common::{generate_args, init_tracing};
use wfsynth::export::{ArtifactManifest, TASK_FILE};
use wfsynth::fs::MockFileSystem;
use wfsynth::run_generate;
use wfsynth::types::Archetype;

fn run(archetype: Archetype, seed: u64, ccr: Option<f64>) -> (MockFileSystem, ArtifactManifest) {
    init_tracing();
    let fs = MockFileSystem::new();
    let mut args = generate_args(archetype);
    args.seed = Some(seed);
    args.ccr = ccr;
    args.output = Some(PathBuf::from("out"));

    let outcome = run_generate(&fs, &args).expect("generation succeeds");
    (fs, outcome.manifest.expect("files written"))
}

#[test]
fn same_seed_gives_byte_identical_files() {
    for archetype in Archetype::ALL {
        let (first_fs, first) = run(archetype, 2024, Some(1.0));
        let (second_fs, second) = run(archetype, 2024, Some(1.0));

        assert_eq!(first, second, "{archetype}");
        for path in first_fs.file_paths() {
            assert_eq!(first_fs.contents(&path), second_fs.contents(&path));
        }
    }
}

#[test]
fn different_seeds_change_sizes() {
    let (_, first) = run(Archetype::Ligo, 1, Some(1.0));
    let (_, second) = run(Archetype::Ligo, 2, Some(1.0));
    assert_ne!(first.digest_of(TASK_FILE), second.digest_of(TASK_FILE));
}

#[test]
fn fixed_mode_task_file_ignores_the_seed() {
    let (first_fs, _) = run(Archetype::Montage, 1, None);
    let (second_fs, _) = run(Archetype::Montage, 2, None);
    let path = Path::new("out").join(TASK_FILE);
    assert_eq!(first_fs.contents(&path), second_fs.contents(&path));
}
