use super::*;
use crate::asset::AssetKind;
use std::fs::File;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn touch(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

/// Two style sources dated a minute in the past.
fn setup() -> (TempDir, BundleTarget, AssetSet) {
    let dir = TempDir::new().unwrap();
    let past = SystemTime::now() - Duration::from_secs(60);
    for name in ["a.css", "b.css"] {
        let path = dir.path().join(name);
        fs::write(&path, format!("/* {name} */")).unwrap();
        touch(&path, past);
    }
    let target = BundleTarget::new(dir.path().join("dist"), AssetKind::Style);
    let assets = AssetSet::new(["a.css", "b.css"]).with_base(dir.path());
    (dir, target, assets)
}

#[test]
fn test_missing_body_is_stale() {
    let (_dir, target, assets) = setup();
    let cache = BuildCache::default();
    assert_eq!(
        cache.check(&target, &assets),
        Staleness::Stale(StaleReason::MissingBody)
    );
}

#[test]
fn test_fresh_after_commit() {
    let (_dir, target, assets) = setup();
    let cache = BuildCache::default();

    cache.commit(&target, &assets, "a{}b{}").unwrap();
    assert_eq!(cache.check(&target, &assets), Staleness::Fresh);
    assert!(!cache.is_stale(&target, &assets));
    assert_eq!(cache.read(&target).unwrap(), "a{}b{}");
}

#[test]
fn test_reordered_entries_are_stale() {
    let (dir, target, assets) = setup();
    let cache = BuildCache::default();
    cache.commit(&target, &assets, "a{}b{}").unwrap();

    let swapped = AssetSet::new(["b.css", "a.css"]).with_base(dir.path());
    assert_eq!(
        cache.check(&target, &swapped),
        Staleness::Stale(StaleReason::EntriesChanged)
    );
}

#[test]
fn test_touched_source_is_stale() {
    let (dir, target, assets) = setup();
    let cache = BuildCache::default();
    cache.commit(&target, &assets, "a{}b{}").unwrap();

    let b = dir.path().join("b.css");
    touch(&b, SystemTime::now() + Duration::from_secs(60));
    assert_eq!(
        cache.check(&target, &assets),
        Staleness::Stale(StaleReason::SourceModified(b))
    );
}

#[test]
fn test_missing_source_does_not_force_rebuild() {
    let (dir, target, assets) = setup();
    let cache = BuildCache::default();
    cache.commit(&target, &assets, "a{}b{}").unwrap();

    fs::remove_file(dir.path().join("a.css")).unwrap();
    assert_eq!(cache.check(&target, &assets), Staleness::Fresh);
}

#[test]
fn test_missing_manifest_is_stale() {
    let (_dir, target, assets) = setup();
    let cache = BuildCache::default();
    cache.commit(&target, &assets, "a{}").unwrap();

    fs::remove_file(target.manifest_path()).unwrap();
    assert_eq!(
        cache.check(&target, &assets),
        Staleness::Stale(StaleReason::MissingManifest)
    );
}

#[test]
fn test_empty_or_corrupt_manifest_is_stale() {
    let (_dir, target, assets) = setup();
    let cache = BuildCache::default();
    cache.commit(&target, &assets, "a{}").unwrap();

    for content in ["", "not json", "{\"a\": 1}"] {
        fs::write(target.manifest_path(), content).unwrap();
        assert!(matches!(
            cache.check(&target, &assets),
            Staleness::Stale(StaleReason::BadManifest(_))
        ));
    }
}

#[test]
fn test_manifest_strips_public_root() {
    let (dir, target, assets) = setup();
    let cache = BuildCache::new(Some(dir.path().to_path_buf()));
    cache.commit(&target, &assets, "a{}b{}").unwrap();

    assert_eq!(
        read_manifest(&target.manifest_path()).unwrap(),
        vec!["/a.css", "/b.css"]
    );
    assert_eq!(cache.check(&target, &assets), Staleness::Fresh);

    // A differently rooted cache no longer matches the recorded entries
    let other = BuildCache::new(Some(dir.path().join("dist")));
    assert!(other.is_stale(&target, &assets));
}

#[test]
fn test_commit_replaces_previous_pair() {
    let (dir, target, assets) = setup();
    let cache = BuildCache::default();
    cache.commit(&target, &assets, "old").unwrap();

    let single = AssetSet::new(["a.css"]).with_base(dir.path());
    cache.commit(&target, &single, "new").unwrap();

    assert_eq!(cache.read(&target).unwrap(), "new");
    assert_eq!(cache.check(&target, &single), Staleness::Fresh);
    assert!(cache.is_stale(&target, &assets));
}

#[test]
fn test_commit_fails_when_output_is_a_file() {
    let (dir, _target, assets) = setup();
    let blocker = dir.path().join("dist");
    fs::write(&blocker, "").unwrap();

    let target = BundleTarget::new(&blocker, AssetKind::Style);
    let cache = BuildCache::default();
    assert!(matches!(
        cache.commit(&target, &assets, "a{}"),
        Err(CacheError::Write(..))
    ));
}

#[test]
fn test_read_missing_body() {
    let (_dir, target, _assets) = setup();
    assert!(matches!(
        BuildCache::default().read(&target),
        Err(CacheError::Read(..))
    ));
}

#[test]
fn test_clean_removes_target_files() {
    let (_dir, target, assets) = setup();
    let cache = BuildCache::default();
    cache.commit(&target, &assets, "a{}").unwrap();
    drop(cache.lock(&target).unwrap());

    let result = cache.clean(&target).unwrap();
    assert_eq!(
        result.removed,
        vec![target.manifest_path(), target.body_path()]
    );
    assert!(!target.body_path().exists());
    assert!(!target.manifest_path().exists());
    assert!(target.lock_path().exists());

    // Nothing left to remove
    assert!(cache.clean(&target).unwrap().removed.is_empty());
}

#[test]
fn test_clean_without_output_dir_creates_nothing() {
    let (_dir, target, _assets) = setup();
    let result = BuildCache::default().clean(&target).unwrap();
    assert!(result.removed.is_empty());
    assert!(!target.output_dir().exists());
}

#[test]
fn test_clean_waits_for_build_lock() {
    let (_dir, target, assets) = setup();
    let cache = BuildCache::default();
    cache.commit(&target, &assets, "a{}").unwrap();

    let held = cache.lock(&target).unwrap();
    let cleaner = {
        let (cache, target) = (cache.clone(), target.clone());
        std::thread::spawn(move || cache.clean(&target).unwrap())
    };

    std::thread::sleep(Duration::from_millis(200));
    assert!(target.body_path().exists());
    assert!(target.manifest_path().exists());

    drop(held);
    let result = cleaner.join().unwrap();
    assert_eq!(result.removed.len(), 2);
    assert!(!target.body_path().exists());
}
