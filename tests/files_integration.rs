use scroll_banner::Error;
use scroll_banner::config::Configuration;
use scroll_banner::tasks::files;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn recursive_scan_finds_images_in_path_order() {
    let tmp = tempdir().unwrap();
    let lib = tmp.path().join("lib");
    fs::create_dir_all(lib.join("nested")).unwrap();

    fs::write(lib.join("b.jpg"), b"x").unwrap();
    fs::write(lib.join("a.PNG"), b"x").unwrap();
    fs::write(lib.join("nested").join("c.jpeg"), b"x").unwrap();
    fs::write(lib.join("notes.txt"), b"x").unwrap();

    let cfg = Configuration {
        image_library_path: lib.clone(),
        ..Configuration::default()
    };

    let found = files::discover_images(&cfg).unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|h| h.path().strip_prefix(&lib).unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.PNG", "b.jpg", "nested/c.jpeg"]);
}

#[test]
fn explicit_list_skips_the_scan() {
    let cfg = Configuration {
        image_library_path: PathBuf::from("/definitely/not/here"),
        images: vec![PathBuf::from("dims.png"), PathBuf::from("dims1.png")],
        ..Configuration::default()
    };
    let found = files::discover_images(&cfg).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].path(), PathBuf::from("dims1.png"));
}

#[test]
fn empty_or_missing_library_is_an_error() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("readme.md"), b"x").unwrap();

    let cfg = Configuration {
        image_library_path: tmp.path().to_path_buf(),
        ..Configuration::default()
    };
    assert!(matches!(
        files::discover_images(&cfg),
        Err(Error::EmptyScan(_))
    ));

    let cfg = Configuration {
        image_library_path: tmp.path().join("missing"),
        ..Configuration::default()
    };
    assert!(matches!(files::discover_images(&cfg), Err(Error::BadDir(_))));
}
