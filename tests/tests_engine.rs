//! Documentation engine: caching, invalidation, and batch runs.

#[path = "helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use compdoc::Docgen;
use compdoc::base::{FileKey, Stamp};
use compdoc::cache::DocCache;
use compdoc::compile::{CompilerConfig, Module, StaticCompiler};
use compdoc::error::{DocError, ErrorCategory};
use compdoc::sema::TypeTable;

use helpers::fixtures::{
    CountingCompiler, FixedStamper, button_key, fixture_compiler, list_key,
};

fn counting_engine(
    stamp: Stamp,
) -> (Docgen, Arc<CountingCompiler<StaticCompiler>>, Arc<FixedStamper>) {
    let compiler = Arc::new(CountingCompiler::new(fixture_compiler()));
    let stamper = Arc::new(FixedStamper::new(stamp));
    let cache = Arc::new(DocCache::with_stamper(stamper.clone()));
    let engine = Docgen::new(compiler.clone()).with_cache(cache);
    (engine, compiler, stamper)
}

#[test]
fn test_second_run_reuses_the_cached_module() {
    let (engine, compiler, _stamper) = counting_engine(Stamp::from_millis(10));
    let key = button_key();

    let first = engine.document("source", &key).expect("first run");
    assert_eq!(compiler.calls(), 1);

    let second = engine.document("source", &key).expect("second run");
    assert_eq!(compiler.calls(), 1, "a fresh entry must not recompile");
    assert_eq!(second, first);
}

#[test]
fn test_stamp_change_recompiles_once_then_settles() {
    let (engine, compiler, stamper) = counting_engine(Stamp::from_millis(10));
    let key = button_key();

    engine.document("source", &key).expect("first run");
    assert_eq!(compiler.calls(), 1);

    // The file changes on disk: exactly one recompile, after which the
    // entry is stamped at the new time and reuse resumes.
    stamper.set(Some(Stamp::from_millis(20)));
    engine.document("source", &key).expect("after change");
    assert_eq!(compiler.calls(), 2);

    engine.document("source", &key).expect("settled");
    assert_eq!(compiler.calls(), 2, "the rebuilt entry must validate again");
}

#[test]
fn test_stampless_identity_recompiles_every_run() {
    let (engine, compiler, stamper) = counting_engine(Stamp::from_millis(10));
    let key = button_key();
    stamper.set(None);

    engine.document("source", &key).expect("first run");
    engine.document("source", &key).expect("second run");
    engine.document("source", &key).expect("third run");
    assert_eq!(
        compiler.calls(),
        3,
        "an unobservable file can never be trusted from cache"
    );
}

#[test]
fn test_document_populates_the_shared_cache() {
    let (engine, _compiler, _stamper) = counting_engine(Stamp::from_millis(10));
    let key = button_key();

    engine.document("let x;", &key).expect("document");

    let entry = engine.cache().get(&key).expect("fresh entry");
    assert_eq!(entry.stamp, Some(Stamp::from_millis(10)));
    assert_eq!(entry.text.as_deref(), Some("let x;"));
    assert!(entry.module.is_some());
    assert_eq!(entry.config, Some(CompilerConfig::default()));
}

#[test]
fn test_engine_config_reaches_the_cache_entry() {
    let compiler = Arc::new(CountingCompiler::new(fixture_compiler()));
    let stamper = Arc::new(FixedStamper::new(Stamp::from_millis(10)));
    let cache = Arc::new(DocCache::with_stamper(stamper));
    let config = CompilerConfig::rooted("/workspace");
    let engine = Docgen::new(compiler)
        .with_cache(cache)
        .with_config(config.clone());

    engine.document("source", &list_key()).expect("document");
    let entry = engine.cache().get(&list_key()).expect("fresh entry");
    assert_eq!(entry.config, Some(config));
}

#[test]
fn test_extraction_failure_does_not_poison_the_module_cache() {
    let broken = Module::new(FileKey::from("src/Broken.comp"), TypeTable::new());
    let key = broken.file.clone();
    let compiler = Arc::new(CountingCompiler::new(
        StaticCompiler::new().with_module(broken),
    ));
    let stamper = Arc::new(FixedStamper::new(Stamp::from_millis(10)));
    let cache = Arc::new(DocCache::with_stamper(stamper));
    let engine = Docgen::new(compiler.clone()).with_cache(cache);

    let err = engine.document("source", &key).expect_err("no entry function");
    assert!(matches!(err, DocError::EntryFunctionNotFound { .. }));

    // The module itself compiled fine and stays cached; only the
    // extraction keeps failing.
    let err = engine.document("source", &key).expect_err("still no entry");
    assert!(matches!(err, DocError::EntryFunctionNotFound { .. }));
    assert_eq!(compiler.calls(), 1);
}

#[test]
fn test_document_all_isolates_failures() {
    let (engine, compiler, _stamper) = counting_engine(Stamp::from_millis(10));
    let sources = vec![
        (button_key(), String::from("button source")),
        (list_key(), String::from("list source")),
        (FileKey::from("src/Missing.comp"), String::from("gone")),
    ];

    let results = engine.document_all(&sources);
    assert_eq!(results.len(), 3);
    assert_eq!(compiler.calls(), 3);

    assert_eq!(results[0].0, button_key());
    let button = results[0].1.as_ref().expect("button documents");
    assert!(!button.is_legacy());

    let list = results[1].1.as_ref().expect("list documents");
    assert!(list.is_legacy());

    let err = results[2].1.as_ref().expect_err("unregistered identity");
    assert!(matches!(err, DocError::Compile(_)));
    assert_eq!(err.category(), ErrorCategory::Compile);
}

#[test]
fn test_document_all_reuses_warm_entries() {
    let (engine, compiler, _stamper) = counting_engine(Stamp::from_millis(10));
    let sources = vec![
        (button_key(), String::from("button source")),
        (list_key(), String::from("list source")),
    ];

    engine.document_all(&sources);
    assert_eq!(compiler.calls(), 2);

    let results = engine.document_all(&sources);
    assert_eq!(compiler.calls(), 2, "warm batch must not recompile");
    assert!(results.iter().all(|(_, result)| result.is_ok()));
}
